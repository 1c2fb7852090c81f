//! redb-based storage layer for the front-desk engine
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `properties` | `property_id` | `Property` | Catalog |
//! | `room_types` | `room_type_id` | `RoomType` | Catalog + pricing rules |
//! | `rooms` | `room_id` | `Room` | Physical rooms |
//! | `surcharge_rules` | `rule_id` | `SurchargeRule` | Checkout adjustments |
//! | `promotions` | `(property_id, code)` | `Promotion` | Discount codes |
//! | `minibar_items` | `item_id` | `MinibarItem` | Minibar catalog |
//! | `bookings` | `booking_id` | `Booking` | Aggregate snapshots |
//! | `active_bookings` | `booking_id` | `()` | Open-booking index (overlap scans) |
//! | `invoices` | `invoice_id` | `Invoice` | Immutable invoices |
//! | `processed_commands` | `command_id` | `()` | Idempotency check |
//! | `counters` | name | `u64` | Booking number counter |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: once `commit()` returns the
//! data is on disk and the file is in a consistent state. Every mutating
//! command runs inside a single write transaction, so a failure anywhere
//! rolls the whole command back.

use redb::{
    Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use shared::models::{
    Booking, Invoice, MinibarItem, Promotion, Property, Room, RoomType, SurchargeRule,
};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Catalog: key = property_id, value = JSON-serialized Property
const PROPERTIES_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("properties");

/// Catalog: key = room_type_id, value = JSON-serialized RoomType
const ROOM_TYPES_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("room_types");

/// Catalog: key = room_id, value = JSON-serialized Room
const ROOMS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("rooms");

/// Catalog: key = rule_id, value = JSON-serialized SurchargeRule
const SURCHARGE_RULES_TABLE: TableDefinition<i64, &[u8]> =
    TableDefinition::new("surcharge_rules");

/// Promotions: key = (property_id, code), value = JSON-serialized Promotion
const PROMOTIONS_TABLE: TableDefinition<(i64, &str), &[u8]> = TableDefinition::new("promotions");

/// Catalog: key = item_id, value = JSON-serialized MinibarItem
const MINIBAR_ITEMS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("minibar_items");

/// Booking snapshots: key = booking_id, value = JSON-serialized Booking
const BOOKINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("bookings");

/// Index of bookings that still hold rooms: key = booking_id, value = empty
const ACTIVE_BOOKINGS_TABLE: TableDefinition<&str, ()> = TableDefinition::new("active_bookings");

/// Invoices: key = invoice_id, value = JSON-serialized Invoice
const INVOICES_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("invoices");

/// Idempotency: key = command_id, value = empty (existence check)
const PROCESSED_COMMANDS_TABLE: TableDefinition<&str, ()> =
    TableDefinition::new("processed_commands");

/// Counters: key = counter name, value = u64
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

const BOOKING_COUNT_KEY: &str = "booking_count";
const BOOKING_DATE_KEY: &str = "booking_date";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Booking not found: {0}")]
    BookingNotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

fn init_tables(db: &Database) -> StorageResult<()> {
    let write_txn = db.begin_write()?;
    {
        let _ = write_txn.open_table(PROPERTIES_TABLE)?;
        let _ = write_txn.open_table(ROOM_TYPES_TABLE)?;
        let _ = write_txn.open_table(ROOMS_TABLE)?;
        let _ = write_txn.open_table(SURCHARGE_RULES_TABLE)?;
        let _ = write_txn.open_table(PROMOTIONS_TABLE)?;
        let _ = write_txn.open_table(MINIBAR_ITEMS_TABLE)?;
        let _ = write_txn.open_table(BOOKINGS_TABLE)?;
        let _ = write_txn.open_table(ACTIVE_BOOKINGS_TABLE)?;
        let _ = write_txn.open_table(INVOICES_TABLE)?;
        let _ = write_txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        let _ = write_txn.open_table(COUNTERS_TABLE)?;
    }
    write_txn.commit()?;
    Ok(())
}

/// Front-desk storage backed by redb
#[derive(Clone)]
pub struct BookingStorage {
    db: Arc<Database>,
}

impl BookingStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        init_tables(&db)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        init_tables(&db)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Catalog Operations ==========

    pub fn upsert_property(&self, property: &Property) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(PROPERTIES_TABLE)?;
            let bytes = serde_json::to_vec(property)?;
            table.insert(property.id, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_property(&self, property_id: i64) -> StorageResult<Option<Property>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(PROPERTIES_TABLE)?;
        match table.get(property_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Read a property inside a write transaction
    pub fn get_property_txn(
        &self,
        txn: &WriteTransaction,
        property_id: i64,
    ) -> StorageResult<Option<Property>> {
        let table = txn.open_table(PROPERTIES_TABLE)?;
        match table.get(property_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn upsert_room_type(&self, room_type: &RoomType) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ROOM_TYPES_TABLE)?;
            let bytes = serde_json::to_vec(room_type)?;
            table.insert(room_type.id, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_room_type(&self, room_type_id: i64) -> StorageResult<Option<RoomType>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(ROOM_TYPES_TABLE)?;
        match table.get(room_type_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Read a room type inside a write transaction
    pub fn get_room_type_txn(
        &self,
        txn: &WriteTransaction,
        room_type_id: i64,
    ) -> StorageResult<Option<RoomType>> {
        let table = txn.open_table(ROOM_TYPES_TABLE)?;
        match table.get(room_type_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn upsert_room(&self, room: &Room) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ROOMS_TABLE)?;
            let bytes = serde_json::to_vec(room)?;
            table.insert(room.id, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Update a room inside an open write transaction
    pub fn store_room_txn(&self, txn: &WriteTransaction, room: &Room) -> StorageResult<()> {
        let mut table = txn.open_table(ROOMS_TABLE)?;
        let bytes = serde_json::to_vec(room)?;
        table.insert(room.id, bytes.as_slice())?;
        Ok(())
    }

    pub fn get_room_txn(&self, txn: &WriteTransaction, room_id: i64) -> StorageResult<Option<Room>> {
        let table = txn.open_table(ROOMS_TABLE)?;
        match table.get(room_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// All rooms of one room type, inside a write transaction
    pub fn rooms_of_type_txn(
        &self,
        txn: &WriteTransaction,
        room_type_id: i64,
    ) -> StorageResult<Vec<Room>> {
        let table = txn.open_table(ROOMS_TABLE)?;
        let mut rooms = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let room: Room = serde_json::from_slice(value.value())?;
            if room.room_type_id == room_type_id {
                rooms.push(room);
            }
        }
        Ok(rooms)
    }

    /// All rooms of one room type (read-only)
    pub fn rooms_of_type(&self, room_type_id: i64) -> StorageResult<Vec<Room>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(ROOMS_TABLE)?;
        let mut rooms = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let room: Room = serde_json::from_slice(value.value())?;
            if room.room_type_id == room_type_id {
                rooms.push(room);
            }
        }
        Ok(rooms)
    }

    pub fn upsert_surcharge_rule(&self, rule: &SurchargeRule) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SURCHARGE_RULES_TABLE)?;
            let bytes = serde_json::to_vec(rule)?;
            table.insert(rule.id, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn surcharge_rules_for_property(
        &self,
        property_id: i64,
    ) -> StorageResult<Vec<SurchargeRule>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SURCHARGE_RULES_TABLE)?;
        let mut rules = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let rule: SurchargeRule = serde_json::from_slice(value.value())?;
            if rule.property_id == property_id {
                rules.push(rule);
            }
        }
        Ok(rules)
    }

    pub fn upsert_promotion(&self, promotion: &Promotion) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(PROMOTIONS_TABLE)?;
            let bytes = serde_json::to_vec(promotion)?;
            table.insert((promotion.property_id, promotion.code.as_str()), bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Look a promotion up by (property, code) inside a write transaction
    pub fn get_promotion_txn(
        &self,
        txn: &WriteTransaction,
        property_id: i64,
        code: &str,
    ) -> StorageResult<Option<Promotion>> {
        let table = txn.open_table(PROMOTIONS_TABLE)?;
        match table.get((property_id, code))? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn upsert_minibar_item(&self, item: &MinibarItem) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(MINIBAR_ITEMS_TABLE)?;
            let bytes = serde_json::to_vec(item)?;
            table.insert(item.id, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_minibar_item_txn(
        &self,
        txn: &WriteTransaction,
        item_id: i64,
    ) -> StorageResult<Option<MinibarItem>> {
        let table = txn.open_table(MINIBAR_ITEMS_TABLE)?;
        match table.get(item_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    // ========== Booking Snapshot Operations ==========

    /// Store a booking snapshot within an open transaction
    pub fn store_booking(&self, txn: &WriteTransaction, booking: &Booking) -> StorageResult<()> {
        let mut table = txn.open_table(BOOKINGS_TABLE)?;
        let bytes = serde_json::to_vec(booking)?;
        table.insert(booking.id.as_str(), bytes.as_slice())?;
        Ok(())
    }

    /// Load a booking snapshot within an open write transaction
    pub fn load_booking_txn(
        &self,
        txn: &WriteTransaction,
        booking_id: &str,
    ) -> StorageResult<Booking> {
        let table = txn.open_table(BOOKINGS_TABLE)?;
        match table.get(booking_id)? {
            Some(guard) => Ok(serde_json::from_slice(guard.value())?),
            None => Err(StorageError::BookingNotFound(booking_id.to_string())),
        }
    }

    /// Load a booking snapshot (read-only)
    pub fn get_booking(&self, booking_id: &str) -> StorageResult<Option<Booking>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(BOOKINGS_TABLE)?;
        match table.get(booking_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Mark a booking as active (holds rooms)
    pub fn mark_booking_active(
        &self,
        txn: &WriteTransaction,
        booking_id: &str,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(ACTIVE_BOOKINGS_TABLE)?;
        table.insert(booking_id, ())?;
        Ok(())
    }

    /// Remove a booking from the active index
    pub fn mark_booking_inactive(
        &self,
        txn: &WriteTransaction,
        booking_id: &str,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(ACTIVE_BOOKINGS_TABLE)?;
        table.remove(booking_id)?;
        Ok(())
    }

    /// Ids of all bookings that still hold rooms, inside a write transaction
    pub fn active_booking_ids_txn(&self, txn: &WriteTransaction) -> StorageResult<Vec<String>> {
        let table = txn.open_table(ACTIVE_BOOKINGS_TABLE)?;
        let mut ids = Vec::new();
        for entry in table.iter()? {
            let (key, _) = entry?;
            ids.push(key.value().to_string());
        }
        Ok(ids)
    }

    /// Snapshots of all active bookings (read-only)
    pub fn list_active_bookings(&self) -> StorageResult<Vec<Booking>> {
        let txn = self.db.begin_read()?;
        let index = txn.open_table(ACTIVE_BOOKINGS_TABLE)?;
        let table = txn.open_table(BOOKINGS_TABLE)?;
        let mut bookings = Vec::new();
        for entry in index.iter()? {
            let (key, _) = entry?;
            if let Some(guard) = table.get(key.value())? {
                bookings.push(serde_json::from_slice(guard.value())?);
            }
        }
        Ok(bookings)
    }

    // ========== Invoice Operations ==========

    /// Store an invoice within an open transaction
    pub fn store_invoice(&self, txn: &WriteTransaction, invoice: &Invoice) -> StorageResult<()> {
        let mut table = txn.open_table(INVOICES_TABLE)?;
        let bytes = serde_json::to_vec(invoice)?;
        table.insert(invoice.id, bytes.as_slice())?;
        Ok(())
    }

    pub fn get_invoice(&self, invoice_id: i64) -> StorageResult<Option<Invoice>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(INVOICES_TABLE)?;
        match table.get(invoice_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn invoices_for_booking(&self, booking_id: &str) -> StorageResult<Vec<Invoice>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(INVOICES_TABLE)?;
        let mut invoices = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let invoice: Invoice = serde_json::from_slice(value.value())?;
            if invoice.booking_id.as_deref() == Some(booking_id) {
                invoices.push(invoice);
            }
        }
        Ok(invoices)
    }

    // ========== Idempotency Operations ==========

    /// Check whether a command was already processed (read-only)
    pub fn is_command_processed(&self, command_id: &str) -> StorageResult<bool> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        Ok(table.get(command_id)?.is_some())
    }

    /// Check a command id inside the command's own write transaction. The
    /// read-only variant races with a concurrent submission of the same id;
    /// this one sees every committed marker.
    pub fn is_command_processed_txn(
        &self,
        txn: &WriteTransaction,
        command_id: &str,
    ) -> StorageResult<bool> {
        let table = txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        Ok(table.get(command_id)?.is_some())
    }

    /// Record a command id within the command's own transaction
    pub fn mark_command_processed(
        &self,
        txn: &WriteTransaction,
        command_id: &str,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        table.insert(command_id, ())?;
        Ok(())
    }

    // ========== Booking Number ==========

    /// Next booking number, `RES{yyyymmdd}{seq}`. The daily counter lives in
    /// the same transaction as the booking insert, so numbers survive
    /// crashes without gaps or duplicates.
    pub fn next_booking_number(
        &self,
        txn: &WriteTransaction,
        today: chrono::NaiveDate,
    ) -> StorageResult<String> {
        let date_key = {
            use chrono::Datelike;
            today.year() as u64 * 10_000 + today.month() as u64 * 100 + today.day() as u64
        };
        let mut table = txn.open_table(COUNTERS_TABLE)?;
        let stored_date = table.get(BOOKING_DATE_KEY)?.map(|g| g.value()).unwrap_or(0);
        let count = if stored_date == date_key {
            table.get(BOOKING_COUNT_KEY)?.map(|g| g.value()).unwrap_or(0)
        } else {
            0
        };
        let next = count + 1;
        table.insert(BOOKING_DATE_KEY, date_key)?;
        table.insert(BOOKING_COUNT_KEY, next)?;
        Ok(format!("RES{}{:04}", date_key, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Guest, PricingRuleSet, RoomStatus};
    use shared::util::now_millis;

    fn make_room(id: i64, room_type_id: i64, number: &str) -> Room {
        Room {
            id,
            property_id: 1,
            room_type_id,
            number: number.to_string(),
            floor: 1,
            status: RoomStatus::Available,
            created_at: now_millis(),
        }
    }

    #[test]
    fn room_catalog_round_trip() {
        let storage = BookingStorage::open_in_memory().unwrap();
        storage.upsert_room(&make_room(101, 10, "101")).unwrap();
        storage.upsert_room(&make_room(102, 10, "102")).unwrap();
        storage.upsert_room(&make_room(201, 20, "201")).unwrap();

        let txn = storage.begin_write().unwrap();
        let rooms = storage.rooms_of_type_txn(&txn, 10).unwrap();
        assert_eq!(rooms.len(), 2);
        txn.abort().unwrap();
    }

    #[test]
    fn booking_snapshot_round_trip_and_active_index() {
        let storage = BookingStorage::open_in_memory().unwrap();
        let booking = Booking::new(
            "b-1".to_string(),
            "RES202601150001".to_string(),
            1,
            Guest { name: "Ada".to_string(), ..Default::default() },
            now_millis(),
        );

        let txn = storage.begin_write().unwrap();
        storage.store_booking(&txn, &booking).unwrap();
        storage.mark_booking_active(&txn, &booking.id).unwrap();
        txn.commit().unwrap();

        let loaded = storage.get_booking("b-1").unwrap().unwrap();
        assert_eq!(loaded.booking_number, "RES202601150001");
        assert_eq!(storage.list_active_bookings().unwrap().len(), 1);

        let txn = storage.begin_write().unwrap();
        storage.mark_booking_inactive(&txn, "b-1").unwrap();
        txn.commit().unwrap();
        assert!(storage.list_active_bookings().unwrap().is_empty());
    }

    #[test]
    fn load_booking_txn_fails_for_missing_id() {
        let storage = BookingStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        let result = storage.load_booking_txn(&txn, "missing");
        assert!(matches!(result, Err(StorageError::BookingNotFound(_))));
        txn.abort().unwrap();
    }

    #[test]
    fn promotion_lookup_is_scoped_by_property() {
        let storage = BookingStorage::open_in_memory().unwrap();
        let promo = Promotion {
            id: 1,
            property_id: 1,
            code: "CODE10".to_string(),
            value: 10.0,
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            scope: shared::models::PromotionScope::Booking,
            is_active: true,
        };
        storage.upsert_promotion(&promo).unwrap();

        let txn = storage.begin_write().unwrap();
        assert!(storage.get_promotion_txn(&txn, 1, "CODE10").unwrap().is_some());
        assert!(storage.get_promotion_txn(&txn, 2, "CODE10").unwrap().is_none());
        assert!(storage.get_promotion_txn(&txn, 1, "NOPE").unwrap().is_none());
        txn.abort().unwrap();
    }

    #[test]
    fn booking_numbers_increment_and_reset_daily() {
        let storage = BookingStorage::open_in_memory().unwrap();
        let day1 = chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let day2 = chrono::NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();

        let txn = storage.begin_write().unwrap();
        assert_eq!(storage.next_booking_number(&txn, day1).unwrap(), "RES202601150001");
        assert_eq!(storage.next_booking_number(&txn, day1).unwrap(), "RES202601150002");
        assert_eq!(storage.next_booking_number(&txn, day2).unwrap(), "RES202601160001");
        txn.commit().unwrap();
    }

    #[test]
    fn command_idempotency_marker() {
        let storage = BookingStorage::open_in_memory().unwrap();
        assert!(!storage.is_command_processed("cmd-1").unwrap());

        let txn = storage.begin_write().unwrap();
        storage.mark_command_processed(&txn, "cmd-1").unwrap();
        txn.commit().unwrap();

        assert!(storage.is_command_processed("cmd-1").unwrap());
        let txn = storage.begin_write().unwrap();
        assert!(storage.is_command_processed_txn(&txn, "cmd-1").unwrap());
        assert!(!storage.is_command_processed_txn(&txn, "cmd-2").unwrap());
        txn.abort().unwrap();
    }

    #[test]
    fn data_survives_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front_desk.redb");
        {
            let storage = BookingStorage::open(&path).unwrap();
            storage.upsert_room(&make_room(101, 10, "101")).unwrap();
        }
        let storage = BookingStorage::open(&path).unwrap();
        let txn = storage.begin_write().unwrap();
        assert!(storage.get_room_txn(&txn, 101).unwrap().is_some());
        txn.abort().unwrap();
    }

    #[test]
    fn room_type_pricing_survives_storage() {
        let storage = BookingStorage::open_in_memory().unwrap();
        let room_type = RoomType {
            id: 10,
            property_id: 1,
            name: "Double".to_string(),
            capacity: 2,
            pricing: PricingRuleSet {
                base_price: Some(100.0),
                weekday_prices: [None, None, None, None, Some(120.0), Some(130.0), None],
                date_range_prices: vec![],
            },
            is_active: true,
            created_at: now_millis(),
        };
        storage.upsert_room_type(&room_type).unwrap();
        let loaded = storage.get_room_type(10).unwrap().unwrap();
        assert_eq!(loaded.pricing.base_price, Some(100.0));
        assert_eq!(loaded.pricing.weekday_prices[5], Some(130.0));
    }
}
