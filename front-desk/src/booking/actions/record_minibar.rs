//! RecordMinibar command handler
//!
//! Records minibar consumption on an in-house booking. The catalog price is
//! captured on first record so later catalog edits do not change the bill.

use async_trait::async_trait;
use shared::models::{BookingStatus, MinibarEntry};
use shared::request::RecordMinibarRequest;
use shared::BookingError;
use validator::Validate;

use crate::booking::traits::{CommandContext, CommandHandler, CommandMetadata, CommandOutcome};

/// RecordMinibar action
#[derive(Debug, Clone)]
pub struct RecordMinibarAction {
    pub request: RecordMinibarRequest,
}

#[async_trait]
impl CommandHandler for RecordMinibarAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<CommandOutcome, BookingError> {
        self.request
            .validate()
            .map_err(|e| BookingError::validation(e.to_string()))?;

        let mut booking = ctx.load_booking(&self.request.booking_id)?;
        if booking.status != BookingStatus::CheckedIn {
            return Err(BookingError::invalid_transition(format!(
                "minibar can only be recorded while checked in, booking is {:?}",
                booking.status
            )));
        }

        let item = ctx.minibar_item(self.request.item_id)?;
        if item.property_id != booking.property_id {
            return Err(BookingError::validation(format!(
                "minibar item {} does not belong to property {}",
                item.name, booking.property_id
            )));
        }

        match booking.minibar.iter_mut().find(|e| e.item_id == item.id) {
            Some(entry) => {
                entry.consumed_quantity += self.request.consumed_quantity;
                entry.original_quantity += self.request.consumed_quantity;
            }
            None => booking.minibar.push(MinibarEntry {
                item_id: item.id,
                name: item.name,
                unit_price: item.unit_price,
                original_quantity: self.request.consumed_quantity,
                consumed_quantity: self.request.consumed_quantity,
            }),
        }

        booking.updated_at = metadata.timestamp;
        Ok(CommandOutcome::booking(booking))
    }
}
