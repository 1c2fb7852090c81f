//! CancelBooking command handler
//!
//! Cancels a pending or confirmed booking and releases every allocated
//! room; the manager drops the booking from the active index so the rooms
//! immediately stop counting in overlap checks.

use async_trait::async_trait;
use shared::models::{BookingStatus, RoomBookingStatus};
use shared::request::CancelBookingRequest;
use shared::BookingError;

use crate::booking::lifecycle::ensure_booking_transition;
use crate::booking::traits::{CommandContext, CommandHandler, CommandMetadata, CommandOutcome};

/// CancelBooking action
#[derive(Debug, Clone)]
pub struct CancelBookingAction {
    pub request: CancelBookingRequest,
}

#[async_trait]
impl CommandHandler for CancelBookingAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<CommandOutcome, BookingError> {
        let mut booking = ctx.load_booking(&self.request.booking_id)?;
        ensure_booking_transition(booking.status, BookingStatus::Cancelled)?;

        booking.status = BookingStatus::Cancelled;
        booking.cancel_reason = self.request.reason.clone();
        for line in &mut booking.lines {
            for room in &mut line.rooms {
                if room.status != RoomBookingStatus::Cancelled {
                    room.status = RoomBookingStatus::Cancelled;
                }
            }
        }
        booking.updated_at = metadata.timestamp;

        tracing::info!(
            booking_id = %booking.id,
            reason = booking.cancel_reason.as_deref().unwrap_or("-"),
            "Booking cancelled"
        );
        Ok(CommandOutcome::booking(booking))
    }
}
