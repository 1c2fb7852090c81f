//! Booking Aggregate
//!
//! The booking is stored and updated as one snapshot: aggregate status,
//! money fields, the quoted room-type lines and the concrete room
//! allocations under them. Commands load the snapshot, validate, mutate and
//! persist it inside a single write transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::guest::Guest;
use super::minibar::MinibarEntry;

/// Aggregate booking status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

/// Per-room sub-state within a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomBookingStatus {
    Pending,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

/// One allocated physical room. `end_date` moves on stay extension;
/// `actual_*` timestamps are set by check-in/check-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRoom {
    pub id: String,
    pub room_id: i64,
    pub room_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: RoomBookingStatus,
    pub actual_check_in_at: Option<i64>,
    pub actual_check_out_at: Option<i64>,
}

/// Quoted line: N rooms of one room type over `[start_date, end_date)`.
/// `nightly_price` is the rate agreed at creation and never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRoomType {
    pub id: String,
    pub room_type_id: i64,
    pub room_type_name: String,
    pub total_rooms: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub nightly_price: f64,
    pub rooms: Vec<BookingRoom>,
}

/// Booking aggregate snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub booking_number: String,
    pub property_id: i64,
    pub guest: Guest,
    pub status: BookingStatus,
    pub deposit_amount: f64,
    pub final_payment: f64,
    pub additional_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub left_amount: f64,
    pub discount_code: Option<String>,
    pub notes: Option<String>,
    pub cancel_reason: Option<String>,
    pub lines: Vec<BookingRoomType>,
    pub minibar: Vec<MinibarEntry>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Booking {
    pub fn new(
        id: String,
        booking_number: String,
        property_id: i64,
        guest: Guest,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            booking_number,
            property_id,
            guest,
            status: BookingStatus::Pending,
            deposit_amount: 0.0,
            final_payment: 0.0,
            additional_amount: 0.0,
            discount_amount: 0.0,
            total_amount: 0.0,
            left_amount: 0.0,
            discount_code: None,
            notes: None,
            cancel_reason: None,
            lines: Vec::new(),
            minibar: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }

    /// All allocated rooms across every line
    pub fn rooms(&self) -> impl Iterator<Item = &BookingRoom> {
        self.lines.iter().flat_map(|line| line.rooms.iter())
    }

    pub fn find_room(&self, booking_room_id: &str) -> Option<&BookingRoom> {
        self.rooms().find(|r| r.id == booking_room_id)
    }

    pub fn find_room_mut(&mut self, booking_room_id: &str) -> Option<&mut BookingRoom> {
        self.lines
            .iter_mut()
            .flat_map(|line| line.rooms.iter_mut())
            .find(|r| r.id == booking_room_id)
    }

    /// Rooms that still count for occupancy and billing
    pub fn active_rooms(&self) -> impl Iterator<Item = &BookingRoom> {
        self.rooms()
            .filter(|r| r.status != RoomBookingStatus::Cancelled)
    }
}
