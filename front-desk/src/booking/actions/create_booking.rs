//! CreateBooking command handler
//!
//! Validates the request, quotes nightly rates for every line, allocates
//! concrete rooms all-or-nothing across all lines and persists the booking
//! in Pending state.

use async_trait::async_trait;
use chrono::DateTime;
use shared::models::{Booking, BookingRoom, BookingRoomType, RoomBookingStatus};
use shared::request::CreateBookingRequest;
use shared::BookingError;
use validator::Validate;

use crate::booking::allocator;
use crate::booking::traits::{CommandContext, CommandHandler, CommandMetadata, CommandOutcome};
use crate::money::{to_decimal, to_f64, validate_amount};
use crate::pricing::quote_stay;

/// CreateBooking action
#[derive(Debug, Clone)]
pub struct CreateBookingAction {
    pub request: CreateBookingRequest,
}

#[async_trait]
impl CommandHandler for CreateBookingAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<CommandOutcome, BookingError> {
        let req = &self.request;
        req.validate()
            .map_err(|e| BookingError::validation(e.to_string()))?;
        validate_amount(req.deposit_amount, "deposit_amount")?;

        let property = ctx.property(req.property_id)?;
        if !property.is_active {
            return Err(BookingError::validation(format!(
                "property {} is not active",
                property.code
            )));
        }

        let today = DateTime::from_timestamp_millis(metadata.timestamp)
            .ok_or_else(|| BookingError::validation("invalid command timestamp"))?
            .date_naive();

        let booking_id = uuid::Uuid::new_v4().to_string();
        let mut booking = Booking::new(
            booking_id,
            ctx.next_booking_number(today)?,
            req.property_id,
            req.guest(),
            metadata.timestamp,
        );
        booking.deposit_amount = req.deposit_amount;
        booking.notes = req.notes.clone();

        // Rooms taken by earlier lines of this same command
        let mut claimed: Vec<i64> = Vec::new();

        for line in &req.lines {
            let room_type = ctx.room_type(line.room_type_id)?;
            if room_type.property_id != req.property_id {
                return Err(BookingError::validation(format!(
                    "room type {} does not belong to property {}",
                    line.room_type_id, req.property_id
                )));
            }
            if !room_type.is_active {
                return Err(BookingError::validation(format!(
                    "room type {} is not active",
                    room_type.name
                )));
            }

            let stay_total = quote_stay(&room_type.pricing, line.start_date, line.end_date)?;
            let nights = (line.end_date - line.start_date).num_days();
            let nightly_price =
                to_f64(to_decimal(stay_total) / rust_decimal::Decimal::from(nights));

            let rooms = allocator::allocate(
                ctx,
                line.room_type_id,
                line.total_rooms,
                line.start_date,
                line.end_date,
                &claimed,
            )?;
            claimed.extend(rooms.iter().map(|r| r.id));

            booking.lines.push(BookingRoomType {
                id: uuid::Uuid::new_v4().to_string(),
                room_type_id: room_type.id,
                room_type_name: room_type.name.clone(),
                total_rooms: line.total_rooms,
                start_date: line.start_date,
                end_date: line.end_date,
                nightly_price,
                rooms: rooms
                    .into_iter()
                    .map(|room| BookingRoom {
                        id: uuid::Uuid::new_v4().to_string(),
                        room_id: room.id,
                        room_number: room.number,
                        start_date: line.start_date,
                        end_date: line.end_date,
                        status: RoomBookingStatus::Pending,
                        actual_check_in_at: None,
                        actual_check_out_at: None,
                    })
                    .collect(),
            });
        }

        tracing::info!(
            booking_id = %booking.id,
            booking_number = %booking.booking_number,
            rooms = claimed.len(),
            operator = %metadata.operator_name,
            "Booking created"
        );
        Ok(CommandOutcome::booking(booking))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::test_fixtures::{date, metadata, storage_with_catalog};
    use shared::models::BookingStatus;
    use shared::request::BookingLineRequest;

    fn request(total_rooms: u32) -> CreateBookingRequest {
        CreateBookingRequest {
            property_id: 1,
            guest_name: "Ada Lovelace".to_string(),
            guest_phone: Some("+34 600 000 000".to_string()),
            guest_email: None,
            guest_document_id: None,
            lines: vec![BookingLineRequest {
                room_type_id: 10,
                total_rooms,
                start_date: date(3, 1),
                end_date: date(3, 3),
            }],
            deposit_amount: 50.0,
            notes: None,
        }
    }

    #[tokio::test]
    async fn creates_pending_booking_with_deterministic_rooms() {
        let storage = storage_with_catalog();
        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);

        let action = CreateBookingAction { request: request(2) };
        let outcome = action.execute(&mut ctx, &metadata("cmd-1")).await.unwrap();

        let booking = outcome.booking;
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.booking_number, "RES202601010001");
        assert_eq!(booking.lines.len(), 1);
        let numbers: Vec<_> = booking.rooms().map(|r| r.room_number.clone()).collect();
        assert_eq!(numbers, vec!["101", "102"]);
        assert_eq!(booking.lines[0].nightly_price, 100.0);
        assert_eq!(booking.deposit_amount, 50.0);
        txn.abort().unwrap();
    }

    #[tokio::test]
    async fn fails_all_or_nothing_when_rooms_run_out() {
        let storage = storage_with_catalog();
        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);

        let action = CreateBookingAction { request: request(4) };
        let err = action.execute(&mut ctx, &metadata("cmd-1")).await.unwrap_err();
        assert!(matches!(err, BookingError::InsufficientAvailability { .. }));
        txn.abort().unwrap();
    }

    #[tokio::test]
    async fn rejects_inverted_dates() {
        let storage = storage_with_catalog();
        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);

        let mut req = request(1);
        req.lines[0].start_date = date(3, 3);
        req.lines[0].end_date = date(3, 1);
        let action = CreateBookingAction { request: req };
        let err = action.execute(&mut ctx, &metadata("cmd-1")).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation { .. }));
        txn.abort().unwrap();
    }

    #[tokio::test]
    async fn rejects_unknown_room_type() {
        let storage = storage_with_catalog();
        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);

        let mut req = request(1);
        req.lines[0].room_type_id = 99;
        let action = CreateBookingAction { request: req };
        let err = action.execute(&mut ctx, &metadata("cmd-1")).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound { .. }));
        txn.abort().unwrap();
    }

    #[tokio::test]
    async fn two_lines_never_claim_the_same_room() {
        let storage = storage_with_catalog();
        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);

        let mut req = request(2);
        req.lines.push(BookingLineRequest {
            room_type_id: 10,
            total_rooms: 1,
            start_date: date(3, 1),
            end_date: date(3, 3),
        });
        let action = CreateBookingAction { request: req };
        let outcome = action.execute(&mut ctx, &metadata("cmd-1")).await.unwrap();

        let mut ids: Vec<i64> = outcome.booking.rooms().map(|r| r.room_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        txn.abort().unwrap();
    }
}
