//! CheckIn command handler
//!
//! Checks one allocated room in. The aggregate flips to CheckedIn with the
//! first room.

use async_trait::async_trait;
use shared::models::{BookingStatus, RoomBookingStatus};
use shared::request::CheckInRequest;
use shared::BookingError;

use crate::booking::lifecycle::{derive_booking_status, ensure_room_transition};
use crate::booking::traits::{CommandContext, CommandHandler, CommandMetadata, CommandOutcome};

/// CheckIn action
#[derive(Debug, Clone)]
pub struct CheckInAction {
    pub request: CheckInRequest,
}

#[async_trait]
impl CommandHandler for CheckInAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<CommandOutcome, BookingError> {
        let mut booking = ctx.load_booking(&self.request.booking_id)?;

        match booking.status {
            BookingStatus::Confirmed | BookingStatus::CheckedIn => {}
            other => {
                return Err(BookingError::invalid_transition(format!(
                    "cannot check a room in while the booking is {:?}",
                    other
                )));
            }
        }

        let room = booking
            .find_room_mut(&self.request.booking_room_id)
            .ok_or_else(|| {
                BookingError::not_found(format!("Booking room {}", self.request.booking_room_id))
            })?;
        ensure_room_transition(room.status, RoomBookingStatus::CheckedIn)?;
        room.status = RoomBookingStatus::CheckedIn;
        room.actual_check_in_at = Some(metadata.timestamp);

        booking.status = derive_booking_status(&booking);
        booking.updated_at = metadata.timestamp;
        Ok(CommandOutcome::booking(booking))
    }
}
