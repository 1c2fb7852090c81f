//! Checkout calculation
//!
//! Builds the final bill from the booking snapshot: room charges re-resolved
//! from the current rule set over each allocation's dates, minibar
//! consumption at captured prices, surcharges against the room subtotal, an
//! optional booking-scoped discount and any manual additional amount. All
//! arithmetic runs on `Decimal` and every monetary result is clamped at
//! zero where the invariants require it.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{
    Booking, ChargeSource, InvoiceLine, Promotion, PromotionScope, RoomType, StayContext,
};
use shared::BookingResult;

use crate::money::{round2, to_decimal, to_f64};
use crate::pricing::{apply_surcharges, quote_stay, validate_and_apply};

/// Checkout request facts plus the catalog data the calculation needs
pub struct CheckoutContext<'a> {
    pub stay: &'a StayContext,
    pub surcharge_rules: &'a [shared::models::SurchargeRule],
    pub discount_code: Option<&'a str>,
    pub promotion: Option<&'a Promotion>,
    pub additional_amount: f64,
    pub final_payment: f64,
    pub as_of: NaiveDate,
}

/// Calculated bill
#[derive(Debug)]
pub struct CheckoutTotals {
    pub lines: Vec<InvoiceLine>,
    pub room_subtotal: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub left_amount: f64,
}

/// Compute the final bill for a booking.
///
/// `room_types` must contain every room type referenced by the booking's
/// lines; rates are re-resolved over each allocation's current dates so
/// extensions are billed at resolver rates.
pub fn calculate(
    booking: &Booking,
    room_types: &HashMap<i64, RoomType>,
    ctx: &CheckoutContext<'_>,
) -> BookingResult<CheckoutTotals> {
    let mut lines = Vec::new();
    let mut room_subtotal = Decimal::ZERO;

    for line in &booking.lines {
        let room_type = room_types.get(&line.room_type_id).ok_or_else(|| {
            shared::BookingError::not_found(format!("Room type {}", line.room_type_id))
        })?;
        for room in &line.rooms {
            if room.status == shared::models::RoomBookingStatus::Cancelled {
                continue;
            }
            let charge = quote_stay(&room_type.pricing, room.start_date, room.end_date)?;
            let nights = (room.end_date - room.start_date).num_days();
            room_subtotal += to_decimal(charge);
            lines.push(InvoiceLine {
                source: ChargeSource::RoomCharge,
                description: format!(
                    "Room {} ({}), {} nights",
                    room.room_number, line.room_type_name, nights
                ),
                amount: charge,
            });
        }
    }
    let room_subtotal_f64 = to_f64(room_subtotal);

    for entry in &booking.minibar {
        if entry.consumed_quantity == 0 {
            continue;
        }
        let amount = round2(
            to_decimal(entry.unit_price) * Decimal::from(entry.consumed_quantity),
        );
        lines.push(InvoiceLine {
            source: ChargeSource::Minibar,
            description: format!("Minibar: {} x{}", entry.name, entry.consumed_quantity),
            amount: to_f64(amount),
        });
    }

    lines.extend(apply_surcharges(ctx.surcharge_rules, ctx.stay, room_subtotal_f64));

    let mut discount_amount = 0.0;
    if let Some(code) = ctx.discount_code {
        let line = validate_and_apply(
            ctx.promotion,
            code,
            PromotionScope::Booking,
            room_subtotal_f64,
            ctx.as_of,
        )?;
        discount_amount = -line.amount;
        lines.push(line);
    }

    if ctx.additional_amount > 0.0 {
        lines.push(InvoiceLine {
            source: ChargeSource::Surcharge,
            description: "Additional charges".to_string(),
            amount: to_f64(round2(to_decimal(ctx.additional_amount))),
        });
    }

    let raw_total: Decimal = lines.iter().map(|l| to_decimal(l.amount)).sum();
    let total = raw_total.max(Decimal::ZERO);
    let left = (total - to_decimal(booking.deposit_amount) - to_decimal(ctx.final_payment))
        .max(Decimal::ZERO);

    Ok(CheckoutTotals {
        lines,
        room_subtotal: room_subtotal_f64,
        discount_amount,
        total_amount: to_f64(total),
        left_amount: to_f64(left),
    })
}
