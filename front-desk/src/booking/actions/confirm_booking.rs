//! ConfirmBooking command handler
//!
//! Moves a pending booking to Confirmed once the deposit meets the
//! configured minimum.

use async_trait::async_trait;
use shared::models::BookingStatus;
use shared::request::ConfirmBookingRequest;
use shared::BookingError;

use crate::booking::lifecycle::ensure_booking_transition;
use crate::booking::traits::{CommandContext, CommandHandler, CommandMetadata, CommandOutcome};
use crate::money::{to_decimal, to_f64, validate_amount};

/// ConfirmBooking action. `min_deposit` comes from engine configuration.
#[derive(Debug, Clone)]
pub struct ConfirmBookingAction {
    pub request: ConfirmBookingRequest,
    pub min_deposit: f64,
}

#[async_trait]
impl CommandHandler for ConfirmBookingAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<CommandOutcome, BookingError> {
        let mut booking = ctx.load_booking(&self.request.booking_id)?;
        ensure_booking_transition(booking.status, BookingStatus::Confirmed)?;

        if let Some(top_up) = self.request.deposit_amount {
            validate_amount(top_up, "deposit_amount")?;
            booking.deposit_amount =
                to_f64(to_decimal(booking.deposit_amount) + to_decimal(top_up));
        }

        if booking.deposit_amount < self.min_deposit {
            return Err(BookingError::validation(format!(
                "deposit {:.2} below required minimum {:.2}",
                booking.deposit_amount, self.min_deposit
            )));
        }

        booking.status = BookingStatus::Confirmed;
        booking.updated_at = metadata.timestamp;
        Ok(CommandOutcome::booking(booking))
    }
}
