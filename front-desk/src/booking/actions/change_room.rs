//! ChangeRoom command handler
//!
//! Moves an allocation to another physical room of the same type over the
//! same date window, re-running the overlap check for the target room.

use async_trait::async_trait;
use shared::models::{BookingStatus, RoomBookingStatus, RoomStatus};
use shared::request::ChangeRoomRequest;
use shared::BookingError;

use crate::booking::allocator::room_conflicts;
use crate::booking::traits::{CommandContext, CommandHandler, CommandMetadata, CommandOutcome};

/// ChangeRoom action
#[derive(Debug, Clone)]
pub struct ChangeRoomAction {
    pub request: ChangeRoomRequest,
}

#[async_trait]
impl CommandHandler for ChangeRoomAction {
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
                    "cannot change rooms while the booking is {:?}",
                    other
                )));
            }
        }

        let new_room = ctx.room(self.request.new_room_id)?;
        if new_room.status == RoomStatus::OutOfService {
            return Err(BookingError::validation(format!(
                "room {} is out of service",
                new_room.number
            )));
        }

        let line = booking
            .lines
            .iter_mut()
            .find(|line| line.rooms.iter().any(|r| r.id == self.request.booking_room_id))
            .ok_or_else(|| {
                BookingError::not_found(format!("Booking room {}", self.request.booking_room_id))
            })?;
        if new_room.room_type_id != line.room_type_id {
            return Err(BookingError::validation(format!(
                "room {} is not a {}",
                new_room.number, line.room_type_name
            )));
        }

        let alloc = line
            .rooms
            .iter_mut()
            .find(|r| r.id == self.request.booking_room_id)
            .ok_or_else(|| {
                BookingError::not_found(format!("Booking room {}", self.request.booking_room_id))
            })?;
        match alloc.status {
            RoomBookingStatus::Pending | RoomBookingStatus::CheckedIn => {}
            other => {
                return Err(BookingError::invalid_transition(format!(
                    "cannot move a {:?} room",
                    other
                )));
            }
        }
        if alloc.room_id == new_room.id {
            return Err(BookingError::validation("allocation already uses that room"));
        }

        let (start, end, alloc_id) = (alloc.start_date, alloc.end_date, alloc.id.clone());
        if room_conflicts(ctx, new_room.id, start, end, Some(&alloc_id))? {
            return Err(BookingError::insufficient_availability(format!(
                "room {} is occupied between {} and {}",
                new_room.number, start, end
            )));
        }

        // Re-borrow after the context read
        let alloc = booking
            .find_room_mut(&self.request.booking_room_id)
            .ok_or_else(|| {
                BookingError::not_found(format!("Booking room {}", self.request.booking_room_id))
            })?;
        let old_number = alloc.room_number.clone();
        alloc.room_id = new_room.id;
        alloc.room_number = new_room.number.clone();
        booking.updated_at = metadata.timestamp;

        tracing::info!(
            booking_id = %booking.id,
            from = %old_number,
            to = %new_room.number,
            "Room changed"
        );
        Ok(CommandOutcome::booking(booking))
    }
}
