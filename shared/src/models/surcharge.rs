//! Surcharge Rule Model

use serde::{Deserialize, Serialize};

/// Surcharge trigger kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurchargeKind {
    EarlyCheckIn,
    LateCheckOut,
    ExtraGuest,
}

/// Surcharge rule entity
///
/// `amount` is a percentage of the room subtotal when `is_percentage` is
/// set, otherwise a fixed amount. `ExtraGuest` fixed amounts are per extra
/// guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurchargeRule {
    pub id: i64,
    pub property_id: i64,
    pub kind: SurchargeKind,
    pub amount: f64,
    pub is_percentage: bool,
    pub is_active: bool,
}

/// Stay facts that trigger surcharges at checkout
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StayContext {
    pub early_check_in: bool,
    pub late_check_out: bool,
    pub extra_guests: u32,
}
