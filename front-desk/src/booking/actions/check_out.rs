//! CheckOut command handler
//!
//! Computes the final bill, emits the invoice, marks every room checked out
//! and flips the physical rooms to Dirty for housekeeping. A second
//! checkout is rejected, never recalculated.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use shared::models::{
    BookingStatus, Invoice, RoomBookingStatus, RoomStatus, RoomType, SurchargeRule,
};
use shared::request::CheckOutRequest;
use shared::util::snowflake_id;
use shared::BookingError;
use validator::Validate;

use crate::booking::checkout::{self, CheckoutContext};
use crate::booking::traits::{CommandContext, CommandHandler, CommandMetadata, CommandOutcome};
use crate::money::validate_amount;

/// CheckOut action. Surcharge rules are injected by the manager from its
/// per-property cache.
#[derive(Debug, Clone)]
pub struct CheckOutAction {
    pub request: CheckOutRequest,
    pub surcharge_rules: Vec<SurchargeRule>,
}

#[async_trait]
impl CommandHandler for CheckOutAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<CommandOutcome, BookingError> {
        let req = &self.request;
        req.validate()
            .map_err(|e| BookingError::validation(e.to_string()))?;
        validate_amount(req.additional_amount, "additional_amount")?;
        validate_amount(req.final_payment, "final_payment")?;

        let mut booking = ctx.load_booking(&req.booking_id)?;
        match booking.status {
            BookingStatus::CheckedIn => {}
            BookingStatus::CheckedOut => {
                return Err(BookingError::already_checked_out(&booking.id));
            }
            other => {
                return Err(BookingError::invalid_transition(format!(
                    "cannot check out a {:?} booking",
                    other
                )));
            }
        }
        for room in booking.active_rooms() {
            if room.status == RoomBookingStatus::Pending {
                return Err(BookingError::invalid_transition(format!(
                    "room {} has not checked in",
                    room.room_number
                )));
            }
        }

        let mut room_types: HashMap<i64, RoomType> = HashMap::new();
        for line in &booking.lines {
            if !room_types.contains_key(&line.room_type_id) {
                room_types.insert(line.room_type_id, ctx.room_type(line.room_type_id)?);
            }
        }

        let promotion = match &req.discount_code {
            Some(code) => ctx.promotion(booking.property_id, code)?,
            None => None,
        };
        let as_of = DateTime::from_timestamp_millis(metadata.timestamp)
            .ok_or_else(|| BookingError::validation("invalid command timestamp"))?
            .date_naive();

        let totals = checkout::calculate(
            &booking,
            &room_types,
            &CheckoutContext {
                stay: &req.stay,
                surcharge_rules: &self.surcharge_rules,
                discount_code: req.discount_code.as_deref(),
                promotion: promotion.as_ref(),
                additional_amount: req.additional_amount,
                final_payment: req.final_payment,
                as_of,
            },
        )?;

        // Release the physical rooms to housekeeping
        for alloc in booking.active_rooms() {
            let mut room = ctx.room(alloc.room_id)?;
            if room.status == RoomStatus::Available {
                room.status = RoomStatus::Dirty;
                ctx.store_room(&room)?;
            }
        }

        for line in &mut booking.lines {
            for room in &mut line.rooms {
                if room.status == RoomBookingStatus::CheckedIn {
                    room.status = RoomBookingStatus::CheckedOut;
                    room.actual_check_out_at = Some(metadata.timestamp);
                }
            }
        }
        booking.status = BookingStatus::CheckedOut;
        booking.discount_code = req.discount_code.clone();
        booking.discount_amount = totals.discount_amount;
        booking.additional_amount = req.additional_amount;
        booking.final_payment = req.final_payment;
        booking.total_amount = totals.total_amount;
        booking.left_amount = totals.left_amount;
        if req.notes.is_some() {
            booking.notes = req.notes.clone();
        }
        booking.updated_at = metadata.timestamp;

        let invoice = Invoice {
            id: snowflake_id(),
            booking_id: Some(booking.id.clone()),
            property_id: booking.property_id,
            lines: totals.lines,
            total_amount: totals.total_amount,
            created_at: metadata.timestamp,
        };

        tracing::info!(
            booking_id = %booking.id,
            invoice_id = invoice.id,
            total = invoice.total_amount,
            left = booking.left_amount,
            "Booking checked out"
        );
        Ok(CommandOutcome::with_invoice(booking, invoice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::actions::{CheckInAction, CreateBookingAction};
    use crate::booking::test_fixtures::{date, metadata, storage_with_catalog};
    use crate::storage::BookingStorage;
    use shared::models::{Booking, ChargeSource, StayContext};
    use shared::request::{BookingLineRequest, CheckInRequest, CreateBookingRequest};

    /// Create a 2-room booking over 2 nights and check both rooms in
    async fn in_house_booking(storage: &BookingStorage) -> Booking {
        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, storage);
        let action = CreateBookingAction {
            request: CreateBookingRequest {
                property_id: 1,
                guest_name: "Ada".to_string(),
                guest_phone: None,
                guest_email: None,
                guest_document_id: None,
                lines: vec![BookingLineRequest {
                    room_type_id: 10,
                    total_rooms: 2,
                    start_date: date(3, 1),
                    end_date: date(3, 3),
                }],
                deposit_amount: 100.0,
                notes: None,
            },
        };
        let mut booking = action.execute(&mut ctx, &metadata("cmd-create")).await.unwrap().booking;
        booking.status = BookingStatus::Confirmed;
        storage.store_booking(&txn, &booking).unwrap();
        storage.mark_booking_active(&txn, &booking.id).unwrap();
        txn.commit().unwrap();

        let room_ids: Vec<String> = booking.rooms().map(|r| r.id.clone()).collect();
        for (i, room_id) in room_ids.into_iter().enumerate() {
            let txn = storage.begin_write().unwrap();
            let mut ctx = CommandContext::new(&txn, storage);
            let action = CheckInAction {
                request: CheckInRequest {
                    booking_id: booking.id.clone(),
                    booking_room_id: room_id,
                },
            };
            booking = action
                .execute(&mut ctx, &metadata(&format!("cmd-in-{}", i)))
                .await
                .unwrap()
                .booking;
            storage.store_booking(&txn, &booking).unwrap();
            txn.commit().unwrap();
        }
        booking
    }

    fn checkout_request(booking_id: &str) -> CheckOutRequest {
        CheckOutRequest {
            booking_id: booking_id.to_string(),
            stay: StayContext::default(),
            discount_code: None,
            additional_amount: 0.0,
            final_payment: 0.0,
            notes: None,
        }
    }

    #[tokio::test]
    async fn produces_a_tagged_invoice_and_closes_the_booking() {
        let storage = storage_with_catalog();
        let booking = in_house_booking(&storage).await;

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);
        let mut request = checkout_request(&booking.id);
        request.stay.late_check_out = true;
        request.discount_code = Some("CODE10".to_string());
        let action = CheckOutAction {
            request,
            surcharge_rules: storage.surcharge_rules_for_property(1).unwrap(),
        };
        let outcome = action.execute(&mut ctx, &metadata("cmd-out")).await.unwrap();

        let booking = outcome.booking;
        let invoice = outcome.invoice.expect("checkout emits an invoice");
        assert_eq!(booking.status, BookingStatus::CheckedOut);
        assert!(booking.rooms().all(|r| r.actual_check_out_at.is_some()));

        // 2 rooms x 2 nights x 100 = 400; +10% late checkout; -10% discount
        assert_eq!(booking.total_amount, 400.0);
        assert_eq!(booking.discount_amount, 40.0);
        // 400 - 100 deposit
        assert_eq!(booking.left_amount, 300.0);

        let sources: Vec<ChargeSource> = invoice.lines.iter().map(|l| l.source).collect();
        assert!(sources.contains(&ChargeSource::RoomCharge));
        assert!(sources.contains(&ChargeSource::Surcharge));
        assert!(sources.contains(&ChargeSource::Discount));
        assert_eq!(invoice.total_amount, 400.0);
        txn.abort().unwrap();
    }

    #[tokio::test]
    async fn second_checkout_is_rejected_not_recalculated() {
        let storage = storage_with_catalog();
        let booking = in_house_booking(&storage).await;

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);
        let action = CheckOutAction {
            request: checkout_request(&booking.id),
            surcharge_rules: vec![],
        };
        let outcome = action.execute(&mut ctx, &metadata("cmd-out")).await.unwrap();
        storage.store_booking(&txn, &outcome.booking).unwrap();
        txn.commit().unwrap();

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);
        let err = action.execute(&mut ctx, &metadata("cmd-out-2")).await.unwrap_err();
        assert!(matches!(err, BookingError::AlreadyCheckedOut { .. }));
        txn.abort().unwrap();
    }

    #[tokio::test]
    async fn pending_rooms_block_checkout() {
        let storage = storage_with_catalog();
        let mut booking = in_house_booking(&storage).await;
        let first = booking.rooms().next().unwrap().id.clone();
        booking.find_room_mut(&first).unwrap().status = RoomBookingStatus::Pending;
        let txn = storage.begin_write().unwrap();
        storage.store_booking(&txn, &booking).unwrap();
        txn.commit().unwrap();

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);
        let action = CheckOutAction {
            request: checkout_request(&booking.id),
            surcharge_rules: vec![],
        };
        let err = action.execute(&mut ctx, &metadata("cmd-out")).await.unwrap_err();
        assert!(matches!(err, BookingError::InvalidTransition { .. }));
        txn.abort().unwrap();
    }

    #[tokio::test]
    async fn food_scoped_code_is_rejected_at_checkout() {
        let storage = storage_with_catalog();
        let booking = in_house_booking(&storage).await;

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);
        let mut request = checkout_request(&booking.id);
        request.discount_code = Some("CODE15".to_string());
        let action = CheckOutAction { request, surcharge_rules: vec![] };
        let err = action.execute(&mut ctx, &metadata("cmd-out")).await.unwrap_err();
        assert!(matches!(err, BookingError::ScopeMismatch { .. }));
        txn.abort().unwrap();
    }

    #[tokio::test]
    async fn physical_rooms_turn_dirty() {
        let storage = storage_with_catalog();
        let booking = in_house_booking(&storage).await;
        let room_id = booking.rooms().next().unwrap().room_id;

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);
        let action = CheckOutAction {
            request: checkout_request(&booking.id),
            surcharge_rules: vec![],
        };
        let outcome = action.execute(&mut ctx, &metadata("cmd-out")).await.unwrap();
        storage.store_booking(&txn, &outcome.booking).unwrap();
        txn.commit().unwrap();

        let txn = storage.begin_write().unwrap();
        let room = storage.get_room_txn(&txn, room_id).unwrap().unwrap();
        assert_eq!(room.status, RoomStatus::Dirty);
        txn.abort().unwrap();
    }
}
