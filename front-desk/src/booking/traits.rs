//! Command pipeline traits
//!
//! Every mutating operation is an action implementing [`CommandHandler`].
//! Actions run inside a single write transaction owned by the manager: they
//! read through [`CommandContext`], validate guards, mutate the aggregate
//! and return the new state for the manager to persist and commit.

use async_trait::async_trait;
use redb::WriteTransaction;
use shared::models::{Booking, Invoice, MinibarItem, Promotion, Property, Room, RoomType};
use shared::{BookingError, BookingResult};

use crate::storage::{BookingStorage, StorageError};

impl From<StorageError> for BookingError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::BookingNotFound(id) => {
                BookingError::not_found(format!("Booking {}", id))
            }
            other => BookingError::storage(other.to_string()),
        }
    }
}

/// Who ran the command, when, and under which idempotency key
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    pub operator_name: String,
    pub timestamp: i64,
}

/// What a command produced. The manager persists the booking snapshot,
/// maintains the active index from its status, and stores the invoice when
/// one was generated.
#[derive(Debug)]
pub struct CommandOutcome {
    pub booking: Booking,
    pub invoice: Option<Invoice>,
}

impl CommandOutcome {
    pub fn booking(booking: Booking) -> Self {
        Self { booking, invoice: None }
    }

    pub fn with_invoice(booking: Booking, invoice: Invoice) -> Self {
        Self { booking, invoice: Some(invoice) }
    }
}

/// Transaction-scoped read/write access for actions
pub struct CommandContext<'a> {
    txn: &'a WriteTransaction,
    storage: &'a BookingStorage,
}

impl<'a> CommandContext<'a> {
    pub fn new(txn: &'a WriteTransaction, storage: &'a BookingStorage) -> Self {
        Self { txn, storage }
    }

    pub fn load_booking(&self, booking_id: &str) -> BookingResult<Booking> {
        Ok(self.storage.load_booking_txn(self.txn, booking_id)?)
    }

    pub fn property(&self, property_id: i64) -> BookingResult<Property> {
        self.storage
            .get_property_txn(self.txn, property_id)?
            .ok_or_else(|| BookingError::not_found(format!("Property {}", property_id)))
    }

    pub fn room_type(&self, room_type_id: i64) -> BookingResult<RoomType> {
        self.storage
            .get_room_type_txn(self.txn, room_type_id)?
            .ok_or_else(|| BookingError::not_found(format!("Room type {}", room_type_id)))
    }

    pub fn room(&self, room_id: i64) -> BookingResult<Room> {
        self.storage
            .get_room_txn(self.txn, room_id)?
            .ok_or_else(|| BookingError::not_found(format!("Room {}", room_id)))
    }

    pub fn rooms_of_type(&self, room_type_id: i64) -> BookingResult<Vec<Room>> {
        Ok(self.storage.rooms_of_type_txn(self.txn, room_type_id)?)
    }

    pub fn promotion(&self, property_id: i64, code: &str) -> BookingResult<Option<Promotion>> {
        Ok(self.storage.get_promotion_txn(self.txn, property_id, code)?)
    }

    pub fn minibar_item(&self, item_id: i64) -> BookingResult<MinibarItem> {
        self.storage
            .get_minibar_item_txn(self.txn, item_id)?
            .ok_or_else(|| BookingError::not_found(format!("Minibar item {}", item_id)))
    }

    /// Snapshots of every booking that still holds rooms
    pub fn active_bookings(&self) -> BookingResult<Vec<Booking>> {
        let mut bookings = Vec::new();
        for id in self.storage.active_booking_ids_txn(self.txn)? {
            bookings.push(self.storage.load_booking_txn(self.txn, &id)?);
        }
        Ok(bookings)
    }

    /// Persist an updated room within the command transaction
    pub fn store_room(&self, room: &Room) -> BookingResult<()> {
        Ok(self.storage.store_room_txn(self.txn, room)?)
    }

    /// Allocate the next booking number within the command transaction
    pub fn next_booking_number(&self, today: chrono::NaiveDate) -> BookingResult<String> {
        Ok(self.storage.next_booking_number(self.txn, today)?)
    }
}

/// A mutating front-desk command
#[async_trait]
pub trait CommandHandler {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<CommandOutcome, BookingError>;
}
