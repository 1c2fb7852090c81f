//! Promotion Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What a promotion code may discount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionScope {
    /// Room charges of a hotel booking
    Booking,
    /// Food and beverage orders
    Food,
}

/// Promotion code entity. `code` is unique per property; `value` is the
/// discount percentage. The activity window is inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i64,
    pub property_id: i64,
    pub code: String,
    pub value: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub scope: PromotionScope,
    pub is_active: bool,
}
