//! Promotion code validation and discount calculation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{ChargeSource, InvoiceLine, Promotion, PromotionScope};
use shared::{BookingError, BookingResult};

use crate::money::{round2, to_decimal, to_f64};

/// Validate a promotion against the order kind and produce the discount
/// line.
///
/// The lookup result is passed in (`None` when the code does not exist for
/// the property) so the function stays storage-free. On success the returned
/// line carries a negative amount, clamped so the discount never exceeds the
/// discounted subtotal.
pub fn validate_and_apply(
    promotion: Option<&Promotion>,
    code: &str,
    scope: PromotionScope,
    subtotal: f64,
    as_of: NaiveDate,
) -> BookingResult<InvoiceLine> {
    let promotion = promotion.ok_or_else(|| BookingError::invalid_code(code))?;

    if !promotion.is_active || as_of < promotion.start_date || as_of > promotion.end_date {
        return Err(BookingError::expired_code(code));
    }

    if promotion.scope != scope {
        let message = match promotion.scope {
            PromotionScope::Booking => "code only applies to room bookings",
            PromotionScope::Food => "code only applies to food and beverage orders",
        };
        return Err(BookingError::scope_mismatch(code, message));
    }

    let subtotal = to_decimal(subtotal).max(Decimal::ZERO);
    let discount = round2(subtotal * to_decimal(promotion.value) / Decimal::ONE_HUNDRED)
        .min(subtotal);

    Ok(InvoiceLine {
        source: ChargeSource::Discount,
        description: format!("Promotion {} (-{}%)", promotion.code, promotion.value),
        amount: to_f64(-discount),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Helper to create a test promotion
    fn make_promotion(code: &str, value: f64, scope: PromotionScope) -> Promotion {
        Promotion {
            id: 1,
            property_id: 1,
            code: code.to_string(),
            value,
            start_date: date(2026, 1, 1),
            end_date: date(2026, 12, 31),
            scope,
            is_active: true,
        }
    }

    #[test]
    fn unknown_code_is_invalid() {
        let err = validate_and_apply(None, "NOPE", PromotionScope::Food, 100.0, date(2026, 6, 1))
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidCode { .. }));
    }

    #[test]
    fn out_of_window_code_is_expired() {
        let promo = make_promotion("CODE15", 15.0, PromotionScope::Food);
        let err = validate_and_apply(
            Some(&promo),
            "CODE15",
            PromotionScope::Food,
            100.0,
            date(2027, 1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, BookingError::ExpiredCode { .. }));
    }

    #[test]
    fn disabled_code_is_expired() {
        let mut promo = make_promotion("CODE15", 15.0, PromotionScope::Food);
        promo.is_active = false;
        let err = validate_and_apply(
            Some(&promo),
            "CODE15",
            PromotionScope::Food,
            100.0,
            date(2026, 6, 1),
        )
        .unwrap_err();
        assert!(matches!(err, BookingError::ExpiredCode { .. }));
    }

    #[test]
    fn booking_code_rejected_for_food_order() {
        let promo = make_promotion("CODE10", 10.0, PromotionScope::Booking);
        let err = validate_and_apply(
            Some(&promo),
            "CODE10",
            PromotionScope::Food,
            100.0,
            date(2026, 6, 1),
        )
        .unwrap_err();
        assert!(matches!(err, BookingError::ScopeMismatch { .. }));
    }

    #[test]
    fn food_code_discounts_food_subtotal() {
        let promo = make_promotion("CODE15", 15.0, PromotionScope::Food);
        let line = validate_and_apply(
            Some(&promo),
            "CODE15",
            PromotionScope::Food,
            37.9,
            date(2026, 6, 1),
        )
        .unwrap();
        assert_eq!(line.source, ChargeSource::Discount);
        // -round2(37.9 * 0.15) = -5.69 (5.685 rounds half-up)
        assert_eq!(line.amount, -5.69);
    }

    #[test]
    fn discount_is_clamped_to_subtotal() {
        let promo = make_promotion("ALL", 150.0, PromotionScope::Booking);
        let line = validate_and_apply(
            Some(&promo),
            "ALL",
            PromotionScope::Booking,
            80.0,
            date(2026, 6, 1),
        )
        .unwrap();
        assert_eq!(line.amount, -80.0);
    }
}
