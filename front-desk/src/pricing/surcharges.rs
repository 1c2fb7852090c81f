//! Surcharge calculation
//!
//! Percentage rules always compute against the original room subtotal, so
//! several surcharges add up instead of compounding.

use rust_decimal::Decimal;
use shared::models::{ChargeSource, InvoiceLine, StayContext, SurchargeKind, SurchargeRule};

use crate::money::{round2, to_decimal, to_f64};

fn rule_applies(rule: &SurchargeRule, stay: &StayContext) -> bool {
    match rule.kind {
        SurchargeKind::EarlyCheckIn => stay.early_check_in,
        SurchargeKind::LateCheckOut => stay.late_check_out,
        SurchargeKind::ExtraGuest => stay.extra_guests > 0,
    }
}

fn rule_description(rule: &SurchargeRule, stay: &StayContext) -> String {
    match rule.kind {
        SurchargeKind::EarlyCheckIn => "Early check-in".to_string(),
        SurchargeKind::LateCheckOut => "Late check-out".to_string(),
        SurchargeKind::ExtraGuest => format!("Extra guest x{}", stay.extra_guests),
    }
}

/// Compute the surcharge lines triggered by the stay facts.
///
/// `ExtraGuest` amounts are per extra guest; the other kinds apply once.
pub fn apply_surcharges(
    rules: &[SurchargeRule],
    stay: &StayContext,
    room_subtotal: f64,
) -> Vec<InvoiceLine> {
    let subtotal = to_decimal(room_subtotal);
    let mut lines = Vec::new();

    for rule in rules {
        if !rule.is_active || !rule_applies(rule, stay) {
            continue;
        }

        let unit = if rule.is_percentage {
            subtotal * to_decimal(rule.amount) / Decimal::ONE_HUNDRED
        } else {
            to_decimal(rule.amount)
        };
        let amount = if rule.kind == SurchargeKind::ExtraGuest {
            unit * Decimal::from(stay.extra_guests)
        } else {
            unit
        };
        let amount = round2(amount);
        if amount <= Decimal::ZERO {
            continue;
        }

        lines.push(InvoiceLine {
            source: ChargeSource::Surcharge,
            description: rule_description(rule, stay),
            amount: to_f64(amount),
        });
    }

    lines
}
