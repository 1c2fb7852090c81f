//! Invoice Model
//!
//! Invoices are immutable once stored. Each line is tagged with the charge
//! component it came from; discount lines carry a negative amount.

use serde::{Deserialize, Serialize};

/// Where an invoice line came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeSource {
    RoomCharge,
    Fnb,
    Minibar,
    Surcharge,
    Discount,
}

/// One billed component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub source: ChargeSource,
    pub description: String,
    pub amount: f64,
}

/// Invoice entity. `booking_id` is `None` for walk-in F&B orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub booking_id: Option<String>,
    pub property_id: i64,
    pub lines: Vec<InvoiceLine>,
    pub total_amount: f64,
    pub created_at: i64,
}
