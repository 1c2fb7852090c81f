//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic is done with `Decimal` internally, then converted
//! to `f64` for storage/serialization.

use rust_decimal::prelude::*;
use shared::BookingError;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed monetary amount per field
const MAX_AMOUNT: f64 = 100_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with inputs bounded by MAX_AMOUNT
        // is always within f64 representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Round a Decimal to 2 places, half-up
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate that a monetary field is finite, non-negative and within bounds
pub fn validate_amount(value: f64, field_name: &str) -> Result<(), BookingError> {
    if !value.is_finite() {
        return Err(BookingError::validation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    if value < 0.0 {
        return Err(BookingError::validation(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    if value > MAX_AMOUNT {
        return Err(BookingError::validation(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_AMOUNT, value
        )));
    }
    Ok(())
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff <= MONEY_TOLERANCE
}

/// Check whether `paid` covers `required` within tolerance
pub fn is_payment_sufficient(paid: f64, required: f64) -> bool {
    to_decimal(paid) >= to_decimal(required) - MONEY_TOLERANCE
}
