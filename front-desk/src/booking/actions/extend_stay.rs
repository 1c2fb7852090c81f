//! ExtendStay command handler
//!
//! Pushes one allocation's end date out after re-checking the extension
//! interval for conflicts. The quoted line keeps its original dates; the
//! extra nights are billed at resolver rates during checkout.

use async_trait::async_trait;
use shared::models::{BookingStatus, RoomBookingStatus};
use shared::request::ExtendStayRequest;
use shared::BookingError;

use crate::booking::allocator::room_conflicts;
use crate::booking::traits::{CommandContext, CommandHandler, CommandMetadata, CommandOutcome};

/// ExtendStay action
#[derive(Debug, Clone)]
pub struct ExtendStayAction {
    pub request: ExtendStayRequest,
}

#[async_trait]
impl CommandHandler for ExtendStayAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<CommandOutcome, BookingError> {
        let mut booking = ctx.load_booking(&self.request.booking_id)?;

        match booking.status {
            BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::CheckedIn => {}
            other => {
                return Err(BookingError::invalid_transition(format!(
                    "cannot extend a stay while the booking is {:?}",
                    other
                )));
            }
        }

        let alloc = booking
            .find_room(&self.request.booking_room_id)
            .ok_or_else(|| {
                BookingError::not_found(format!("Booking room {}", self.request.booking_room_id))
            })?;
        match alloc.status {
            RoomBookingStatus::Pending | RoomBookingStatus::CheckedIn => {}
            other => {
                return Err(BookingError::invalid_transition(format!(
                    "cannot extend a {:?} room",
                    other
                )));
            }
        }
        if self.request.new_end_date <= alloc.end_date {
            return Err(BookingError::validation(format!(
                "new end date {} must be after the current end date {}",
                self.request.new_end_date, alloc.end_date
            )));
        }

        let (room_id, old_end, alloc_id) = (alloc.room_id, alloc.end_date, alloc.id.clone());
        if room_conflicts(ctx, room_id, old_end, self.request.new_end_date, Some(&alloc_id))? {
            return Err(BookingError::insufficient_availability(format!(
                "room {} is already booked between {} and {}",
                alloc.room_number, old_end, self.request.new_end_date
            )));
        }

        let alloc = booking
            .find_room_mut(&self.request.booking_room_id)
            .ok_or_else(|| {
                BookingError::not_found(format!("Booking room {}", self.request.booking_room_id))
            })?;
        alloc.end_date = self.request.new_end_date;
        booking.updated_at = metadata.timestamp;
        Ok(CommandOutcome::booking(booking))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::actions::CreateBookingAction;
    use crate::booking::test_fixtures::{date, metadata, storage_with_catalog};
    use crate::storage::BookingStorage;
    use shared::models::Booking;
    use shared::request::{BookingLineRequest, CreateBookingRequest};

    async fn seeded_booking(
        storage: &BookingStorage,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> Booking {
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
                    total_rooms: 1,
                    start_date: start,
                    end_date: end,
                }],
                deposit_amount: 0.0,
                notes: None,
            },
        };
        let booking = action.execute(&mut ctx, &metadata("cmd-create")).await.unwrap().booking;
        storage.store_booking(&txn, &booking).unwrap();
        storage.mark_booking_active(&txn, &booking.id).unwrap();
        txn.commit().unwrap();
        booking
    }

    #[tokio::test]
    async fn extends_into_free_nights() {
        let storage = storage_with_catalog();
        let booking = seeded_booking(&storage, date(3, 1), date(3, 3)).await;
        let alloc_id = booking.rooms().next().unwrap().id.clone();

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);
        let action = ExtendStayAction {
            request: ExtendStayRequest {
                booking_id: booking.id.clone(),
                booking_room_id: alloc_id,
                new_end_date: date(3, 5),
            },
        };
        let outcome = action.execute(&mut ctx, &metadata("cmd-2")).await.unwrap();
        assert_eq!(outcome.booking.rooms().next().unwrap().end_date, date(3, 5));
        txn.abort().unwrap();
    }

    #[tokio::test]
    async fn conflicting_extension_is_rejected() {
        let storage = storage_with_catalog();
        let first = seeded_booking(&storage, date(3, 1), date(3, 3)).await; // room 101
        // Wipe out the other two rooms so the follow-up booking lands on 101
        let second = seeded_booking(&storage, date(3, 3), date(3, 6)).await;
        assert_eq!(second.rooms().next().unwrap().room_id, 101);

        let alloc_id = first.rooms().next().unwrap().id.clone();
        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);
        let action = ExtendStayAction {
            request: ExtendStayRequest {
                booking_id: first.id.clone(),
                booking_room_id: alloc_id,
                new_end_date: date(3, 4),
            },
        };
        let err = action.execute(&mut ctx, &metadata("cmd-2")).await.unwrap_err();
        assert!(matches!(err, BookingError::InsufficientAvailability { .. }));
        txn.abort().unwrap();
    }

    #[tokio::test]
    async fn shrinking_is_not_an_extension() {
        let storage = storage_with_catalog();
        let booking = seeded_booking(&storage, date(3, 1), date(3, 3)).await;
        let alloc_id = booking.rooms().next().unwrap().id.clone();

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);
        let action = ExtendStayAction {
            request: ExtendStayRequest {
                booking_id: booking.id.clone(),
                booking_room_id: alloc_id,
                new_end_date: date(3, 2),
            },
        };
        let err = action.execute(&mut ctx, &metadata("cmd-2")).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation { .. }));
        txn.abort().unwrap();
    }
}
