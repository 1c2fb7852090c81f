//! Walk-in F&B invoicing
//!
//! Restaurant guests without a room get a standalone invoice: F&B lines,
//! an optional food-scoped promotion, no booking reference. The whole
//! order is written in one transaction.

use chrono::DateTime;
use rust_decimal::Decimal;
use shared::models::{ChargeSource, Invoice, InvoiceLine, PromotionScope};
use shared::request::WalkInOrderRequest;
use shared::util::snowflake_id;
use shared::{BookingError, BookingResult};
use validator::Validate;

use crate::booking::CommandMetadata;
use crate::money::{to_decimal, to_f64};
use crate::pricing::validate_and_apply;
use crate::storage::BookingStorage;

/// Build and persist the invoice for a walk-in order
pub fn create_walkin_invoice(
    storage: &BookingStorage,
    request: &WalkInOrderRequest,
    metadata: &CommandMetadata,
) -> BookingResult<Invoice> {
    request
        .validate()
        .map_err(|e| BookingError::validation(e.to_string()))?;

    let txn = storage.begin_write()?;
    if storage.is_command_processed_txn(&txn, &metadata.command_id)? {
        return Err(BookingError::validation(format!(
            "command {} was already processed",
            metadata.command_id
        )));
    }
    let property = storage
        .get_property_txn(&txn, request.property_id)?
        .ok_or_else(|| BookingError::not_found(format!("Property {}", request.property_id)))?;
    if !property.is_active {
        return Err(BookingError::validation(format!(
            "property {} is not active",
            property.code
        )));
    }

    let mut lines = Vec::with_capacity(request.items.len());
    let mut subtotal = Decimal::ZERO;
    for item in &request.items {
        let amount = to_decimal(item.unit_price) * Decimal::from(item.quantity);
        subtotal += amount;
        lines.push(InvoiceLine {
            source: ChargeSource::Fnb,
            description: format!("{} x{}", item.name, item.quantity),
            amount: to_f64(amount),
        });
    }

    if let Some(code) = &request.discount_code {
        let promotion = storage.get_promotion_txn(&txn, request.property_id, code)?;
        let as_of = DateTime::from_timestamp_millis(metadata.timestamp)
            .ok_or_else(|| BookingError::validation("invalid command timestamp"))?
            .date_naive();
        let discount = validate_and_apply(
            promotion.as_ref(),
            code,
            PromotionScope::Food,
            to_f64(subtotal),
            as_of,
        )?;
        subtotal += to_decimal(discount.amount);
        lines.push(discount);
    }

    let invoice = Invoice {
        id: snowflake_id(),
        booking_id: None,
        property_id: request.property_id,
        lines,
        total_amount: to_f64(subtotal.max(Decimal::ZERO)),
        created_at: metadata.timestamp,
    };
    storage.store_invoice(&txn, &invoice)?;
    storage.mark_command_processed(&txn, &metadata.command_id)?;
    txn.commit()
        .map_err(|e| BookingError::storage(e.to_string()))?;

    tracing::info!(
        invoice_id = invoice.id,
        total = invoice.total_amount,
        items = request.items.len(),
        "Walk-in order invoiced"
    );
    Ok(invoice)
}
