//! Front-desk engine
//!
//! Booking and pricing resolution for a hotel property with an attached
//! restaurant:
//!
//! - **pricing**: nightly rate resolution, surcharges, promotion discounts
//! - **booking**: command pipeline over the booking aggregate (allocation,
//!   lifecycle, checkout invoicing)
//! - **storage**: redb-based persistence; every mutating command runs in one
//!   write transaction
//! - **walkin**: invoice creation for F&B orders without a booking
//!
//! # Data Flow
//!
//! 1. Caller submits a command to `BookingsManager`
//! 2. Manager checks idempotency and opens a write transaction
//! 3. The action validates guards and mutates the aggregate snapshot
//! 4. Snapshot, indices and any invoice are persisted; the transaction commits
//! 5. A typed result (or typed error) is returned

pub mod booking;
pub mod config;
pub mod logger;
pub mod money;
pub mod pricing;
pub mod storage;
pub mod walkin;

pub use booking::BookingsManager;
pub use config::EngineConfig;
pub use storage::BookingStorage;
