//! Nightly rate resolution
//!
//! Precedence per night: date-range override > weekday override > base
//! price. Resolution is a pure function of the rule set and the date; it
//! never touches storage.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use shared::models::PricingRuleSet;
use shared::{BookingError, BookingResult};

use crate::money::{to_decimal, to_f64};

/// Resolve the nightly rate for one date.
///
/// Overlapping date-range overrides are a configuration mistake: the entry
/// with the newest `created_at` wins (id breaks a further tie) and the
/// ambiguity is logged at warn level so it gets fixed upstream.
pub fn resolve_nightly_rate(pricing: &PricingRuleSet, date: NaiveDate) -> BookingResult<f64> {
    let mut matching: Vec<_> = pricing
        .date_range_prices
        .iter()
        .filter(|entry| entry.start_date <= date && date <= entry.end_date)
        .collect();

    if matching.len() > 1 {
        let ids: Vec<i64> = matching.iter().map(|e| e.id).collect();
        tracing::warn!(
            %date,
            entries = ?ids,
            "Overlapping date-range prices, newest entry wins"
        );
    }
    matching.sort_by_key(|entry| (entry.created_at, entry.id));
    if let Some(winner) = matching.last() {
        return Ok(winner.price);
    }

    let weekday = date.weekday().num_days_from_monday() as usize;
    if let Some(price) = pricing.weekday_prices[weekday] {
        return Ok(price);
    }

    if let Some(base) = pricing.base_price {
        return Ok(base);
    }

    Err(BookingError::rule_not_found(format!(
        "no base price or override covers {}",
        date
    )))
}

/// Sum nightly rates over the half-open range `[start, end)`.
pub fn quote_stay(
    pricing: &PricingRuleSet,
    start: NaiveDate,
    end: NaiveDate,
) -> BookingResult<f64> {
    if start >= end {
        return Err(BookingError::validation(format!(
            "start date {} must be before end date {}",
            start, end
        )));
    }
    let mut total = Decimal::ZERO;
    let mut night = start;
    while night < end {
        total += to_decimal(resolve_nightly_rate(pricing, night)?);
        night = night.succ_opt().ok_or_else(|| {
            BookingError::validation(format!("date overflow past {}", night))
        })?;
    }
    Ok(to_f64(total))
}
