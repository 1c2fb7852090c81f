//! BookingsManager
//!
//! Owns the storage handle and runs every command through the same
//! pipeline: idempotency check, one write transaction, action execution,
//! snapshot + index + invoice persistence, commit. Storage failures retry
//! the whole command once; redb's single-writer lock serializes commands,
//! so two concurrent bookings can never allocate the same room.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use parking_lot::RwLock;
use shared::models::{Booking, Invoice, Room, RoomStatus, SurchargeRule};
use shared::request::{
    CancelBookingRequest, ChangeRoomRequest, CheckInRequest, CheckOutRequest,
    ConfirmBookingRequest, CreateBookingRequest, ExtendStayRequest, RecordMinibarRequest,
    WalkInOrderRequest,
};
use shared::{BookingError, BookingResult};

use crate::booking::actions::{
    CancelBookingAction, ChangeRoomAction, CheckInAction, CheckOutAction, ConfirmBookingAction,
    CreateBookingAction, ExtendStayAction, RecordMinibarAction,
};
use crate::booking::allocator::overlaps;
use crate::booking::lifecycle;
use crate::booking::traits::{CommandContext, CommandHandler, CommandMetadata, CommandOutcome};
use crate::config::EngineConfig;
use crate::pricing::quote_stay;
use crate::storage::BookingStorage;
use crate::walkin;

const RETRY_DELAY: Duration = Duration::from_millis(50);

fn duplicate_command(command_id: &str) -> BookingError {
    BookingError::validation(format!("command {} was already processed", command_id))
}

/// Front-desk command pipeline and read-side queries
pub struct BookingsManager {
    storage: BookingStorage,
    config: EngineConfig,
    /// Surcharge rules per property, loaded on first use
    surcharge_cache: RwLock<HashMap<i64, Vec<SurchargeRule>>>,
}

impl BookingsManager {
    pub fn new(storage: BookingStorage, config: EngineConfig) -> Self {
        Self {
            storage,
            config,
            surcharge_cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn storage(&self) -> &BookingStorage {
        &self.storage
    }

    // ========== Commands ==========

    pub fn create_booking(
        &self,
        request: CreateBookingRequest,
        metadata: &CommandMetadata,
    ) -> BookingResult<Booking> {
        let outcome = self.process(&CreateBookingAction { request }, metadata)?;
        Ok(outcome.booking)
    }

    pub fn confirm_booking(
        &self,
        request: ConfirmBookingRequest,
        metadata: &CommandMetadata,
    ) -> BookingResult<Booking> {
        let action = ConfirmBookingAction { request, min_deposit: self.config.min_deposit };
        Ok(self.process(&action, metadata)?.booking)
    }

    pub fn check_in(
        &self,
        request: CheckInRequest,
        metadata: &CommandMetadata,
    ) -> BookingResult<Booking> {
        Ok(self.process(&CheckInAction { request }, metadata)?.booking)
    }

    pub fn change_room(
        &self,
        request: ChangeRoomRequest,
        metadata: &CommandMetadata,
    ) -> BookingResult<Booking> {
        Ok(self.process(&ChangeRoomAction { request }, metadata)?.booking)
    }

    pub fn extend_stay(
        &self,
        request: ExtendStayRequest,
        metadata: &CommandMetadata,
    ) -> BookingResult<Booking> {
        Ok(self.process(&ExtendStayAction { request }, metadata)?.booking)
    }

    pub fn record_minibar(
        &self,
        request: RecordMinibarRequest,
        metadata: &CommandMetadata,
    ) -> BookingResult<Booking> {
        Ok(self.process(&RecordMinibarAction { request }, metadata)?.booking)
    }

    pub fn cancel_booking(
        &self,
        request: CancelBookingRequest,
        metadata: &CommandMetadata,
    ) -> BookingResult<Booking> {
        Ok(self.process(&CancelBookingAction { request }, metadata)?.booking)
    }

    /// Check a booking out: final bill, invoice, room release
    pub fn check_out(
        &self,
        request: CheckOutRequest,
        metadata: &CommandMetadata,
    ) -> BookingResult<(Booking, Invoice)> {
        let booking = self
            .storage
            .get_booking(&request.booking_id)
            .map_err(BookingError::from)?
            .ok_or_else(|| BookingError::not_found(format!("Booking {}", request.booking_id)))?;
        let surcharge_rules = self.surcharge_rules(booking.property_id)?;
        let outcome = self.process(&CheckOutAction { request, surcharge_rules }, metadata)?;
        let invoice = outcome
            .invoice
            .ok_or_else(|| BookingError::storage("checkout produced no invoice"))?;
        Ok((outcome.booking, invoice))
    }

    /// Invoice a walk-in F&B order that is not tied to any booking
    pub fn walk_in_order(
        &self,
        request: WalkInOrderRequest,
        metadata: &CommandMetadata,
    ) -> BookingResult<Invoice> {
        self.ensure_new_command(metadata)?;
        let mut attempt = 0;
        loop {
            match walkin::create_walkin_invoice(&self.storage, &request, metadata) {
                Err(err) if err.is_retryable() && attempt == 0 => {
                    tracing::warn!(command_id = %metadata.command_id, error = %err, "Retrying walk-in order after storage failure");
                    attempt += 1;
                    std::thread::sleep(RETRY_DELAY);
                }
                other => return other,
            }
        }
    }

    // ========== Pipeline ==========

    /// Fast-path rejection outside the write lock. Not authoritative: two
    /// concurrent submissions of one id can both pass this check, so
    /// `try_process` re-checks inside its write transaction.
    fn ensure_new_command(&self, metadata: &CommandMetadata) -> BookingResult<()> {
        if self
            .storage
            .is_command_processed(&metadata.command_id)
            .map_err(BookingError::from)?
        {
            return Err(duplicate_command(&metadata.command_id));
        }
        Ok(())
    }

    /// Run one command: single write transaction, retried once on a
    /// retryable storage failure.
    fn process(
        &self,
        action: &dyn CommandHandler,
        metadata: &CommandMetadata,
    ) -> BookingResult<CommandOutcome> {
        self.ensure_new_command(metadata)?;
        let mut attempt = 0;
        loop {
            match self.try_process(action, metadata) {
                Err(err) if err.is_retryable() && attempt == 0 => {
                    tracing::warn!(
                        command_id = %metadata.command_id,
                        error = %err,
                        "Retrying command after storage failure"
                    );
                    attempt += 1;
                    std::thread::sleep(RETRY_DELAY);
                }
                other => return other,
            }
        }
    }

    fn try_process(
        &self,
        action: &dyn CommandHandler,
        metadata: &CommandMetadata,
    ) -> BookingResult<CommandOutcome> {
        // The transaction aborts on drop, so any error below rolls back
        // everything the action wrote.
        let txn = self.storage.begin_write().map_err(BookingError::from)?;
        if self
            .storage
            .is_command_processed_txn(&txn, &metadata.command_id)
            .map_err(BookingError::from)?
        {
            return Err(duplicate_command(&metadata.command_id));
        }
        let mut ctx = CommandContext::new(&txn, &self.storage);
        let outcome = futures::executor::block_on(action.execute(&mut ctx, metadata))?;

        self.storage
            .store_booking(&txn, &outcome.booking)
            .map_err(BookingError::from)?;
        if lifecycle::is_active(outcome.booking.status) {
            self.storage
                .mark_booking_active(&txn, &outcome.booking.id)
                .map_err(BookingError::from)?;
        } else {
            self.storage
                .mark_booking_inactive(&txn, &outcome.booking.id)
                .map_err(BookingError::from)?;
        }
        if let Some(invoice) = &outcome.invoice {
            self.storage
                .store_invoice(&txn, invoice)
                .map_err(BookingError::from)?;
        }
        self.storage
            .mark_command_processed(&txn, &metadata.command_id)
            .map_err(BookingError::from)?;
        txn.commit()
            .map_err(|e| BookingError::storage(e.to_string()))?;
        Ok(outcome)
    }

    // ========== Caches ==========

    fn surcharge_rules(&self, property_id: i64) -> BookingResult<Vec<SurchargeRule>> {
        if let Some(rules) = self.surcharge_cache.read().get(&property_id) {
            return Ok(rules.clone());
        }
        let rules = self
            .storage
            .surcharge_rules_for_property(property_id)
            .map_err(BookingError::from)?;
        self.surcharge_cache.write().insert(property_id, rules.clone());
        Ok(rules)
    }

    /// Drop the cached surcharge rules after a catalog edit
    pub fn invalidate_surcharge_rules(&self, property_id: i64) {
        self.surcharge_cache.write().remove(&property_id);
    }

    // ========== Queries ==========

    pub fn booking(&self, booking_id: &str) -> BookingResult<Booking> {
        self.storage
            .get_booking(booking_id)
            .map_err(BookingError::from)?
            .ok_or_else(|| BookingError::not_found(format!("Booking {}", booking_id)))
    }

    pub fn invoices_for_booking(&self, booking_id: &str) -> BookingResult<Vec<Invoice>> {
        Ok(self.storage.invoices_for_booking(booking_id)?)
    }

    /// Bookings that still hold rooms
    pub fn active_bookings(&self) -> BookingResult<Vec<Booking>> {
        Ok(self.storage.list_active_bookings()?)
    }

    /// Rooms of the given type that are free over `[start, end)`
    pub fn available_rooms(
        &self,
        room_type_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BookingResult<Vec<Room>> {
        if start >= end {
            return Err(BookingError::validation(format!(
                "start date {} must be before end date {}",
                start, end
            )));
        }
        let rooms = self.storage.rooms_of_type(room_type_id)?;
        let active = self.storage.list_active_bookings()?;
        let mut free = Vec::new();
        for room in rooms {
            if room.status == RoomStatus::OutOfService {
                continue;
            }
            let taken = active.iter().any(|booking| {
                booking.rooms().any(|alloc| {
                    alloc.room_id == room.id
                        && alloc.status != shared::models::RoomBookingStatus::Cancelled
                        && overlaps(alloc.start_date, alloc.end_date, start, end)
                })
            });
            if !taken {
                free.push(room);
            }
        }
        Ok(free)
    }

    /// Price a prospective stay without touching any booking
    pub fn quote(
        &self,
        room_type_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BookingResult<f64> {
        let room_type = self
            .storage
            .get_room_type(room_type_id)
            .map_err(BookingError::from)?
            .ok_or_else(|| BookingError::not_found(format!("Room type {}", room_type_id)))?;
        quote_stay(&room_type.pricing, start, end)
    }
}
