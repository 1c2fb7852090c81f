//! Room Type Model
//!
//! A room type carries its own pricing rule set. Rate resolution walks the
//! layers in precedence order: date-range override, weekday override, base
//! price.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date-range price override. Dates are inclusive calendar days; the
/// override applies to every night whose date falls inside the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRangePrice {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub created_at: i64,
}

/// Layered nightly pricing for one room type.
///
/// `weekday_prices` is indexed Monday = 0 .. Sunday = 6. Overlapping
/// date-range entries are allowed at the data level; the resolver breaks the
/// tie (newest `created_at` wins) and warns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingRuleSet {
    pub base_price: Option<f64>,
    pub weekday_prices: [Option<f64>; 7],
    pub date_range_prices: Vec<DateRangePrice>,
}

/// Room type entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    pub id: i64,
    pub property_id: i64,
    pub name: String,
    pub capacity: i32,
    pub pricing: PricingRuleSet,
    pub is_active: bool,
    pub created_at: i64,
}
