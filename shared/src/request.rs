//! Request payloads for the front-desk engine
//!
//! Inbound command payloads. Field-level checks live here via `validator`
//! derives; cross-field business rules (date ordering, availability, state
//! guards) are re-validated inside the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Guest, StayContext};

/// One requested room-type line
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingLineRequest {
    pub room_type_id: i64,
    #[validate(range(min = 1, max = 50))]
    pub total_rooms: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Create a booking with one or more room-type lines
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub property_id: i64,
    #[validate(length(min = 1, max = 120))]
    pub guest_name: String,
    pub guest_phone: Option<String>,
    pub guest_email: Option<String>,
    pub guest_document_id: Option<String>,
    #[validate(length(min = 1), nested)]
    pub lines: Vec<BookingLineRequest>,
    #[validate(range(min = 0.0))]
    pub deposit_amount: f64,
    pub notes: Option<String>,
}

impl CreateBookingRequest {
    pub fn guest(&self) -> Guest {
        Guest {
            name: self.guest_name.clone(),
            phone: self.guest_phone.clone(),
            email: self.guest_email.clone(),
            document_id: self.guest_document_id.clone(),
        }
    }
}

/// Confirm a pending booking, optionally topping up the deposit
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmBookingRequest {
    pub booking_id: String,
    #[validate(range(min = 0.0))]
    pub deposit_amount: Option<f64>,
}

/// Check one allocated room in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub booking_id: String,
    pub booking_room_id: String,
}

/// Move an allocation to another physical room of the same type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoomRequest {
    pub booking_id: String,
    pub booking_room_id: String,
    pub new_room_id: i64,
}

/// Push an allocation's end date out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendStayRequest {
    pub booking_id: String,
    pub booking_room_id: String,
    pub new_end_date: NaiveDate,
}

/// Record minibar consumption on an in-house booking
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordMinibarRequest {
    pub booking_id: String,
    pub item_id: i64,
    #[validate(range(min = 1, max = 999))]
    pub consumed_quantity: u32,
}

/// Cancel a pending or confirmed booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    pub booking_id: String,
    pub reason: Option<String>,
}

/// Check a booking out and produce the invoice
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckOutRequest {
    pub booking_id: String,
    #[serde(default)]
    pub stay: StayContext,
    pub discount_code: Option<String>,
    #[validate(range(min = 0.0))]
    pub additional_amount: f64,
    #[validate(range(min = 0.0))]
    pub final_payment: f64,
    pub notes: Option<String>,
}

/// One walk-in F&B item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WalkInItemRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub unit_price: f64,
    #[validate(range(min = 1, max = 999))]
    pub quantity: u32,
}

/// Walk-in F&B order not tied to a booking
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WalkInOrderRequest {
    pub property_id: i64,
    #[validate(length(min = 1), nested)]
    pub items: Vec<WalkInItemRequest>,
    pub discount_code: Option<String>,
}
