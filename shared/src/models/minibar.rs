//! Minibar Model

use serde::{Deserialize, Serialize};

/// Minibar catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinibarItem {
    pub id: i64,
    pub property_id: i64,
    pub name: String,
    pub unit_price: f64,
}

/// Minibar consumption recorded on a booking. The unit price is captured at
/// recording time so later catalog edits do not change the bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinibarEntry {
    pub item_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub original_quantity: u32,
    pub consumed_quantity: u32,
}
