//! Property Model

use serde::{Deserialize, Serialize};

/// Hotel property entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// VAT rate as a percentage (e.g. 10.0 = 10%)
    pub vat_rate: f64,
    /// Default check-in time (HH:MM format)
    pub default_check_in: String,
    /// Default check-out time (HH:MM format)
    pub default_check_out: String,
    pub is_active: bool,
    pub created_at: i64,
}
