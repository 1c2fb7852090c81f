//! Booking command pipeline
//!
//! - **traits**: CommandHandler / CommandContext / CommandOutcome
//! - **lifecycle**: aggregate and per-room state guards
//! - **allocator**: all-or-nothing room selection with overlap exclusion
//! - **checkout**: final bill assembly
//! - **actions**: one module per command
//! - **manager**: transaction pipeline, caches, read-side queries

pub mod actions;
pub mod allocator;
pub mod checkout;
pub mod lifecycle;
pub mod manager;
pub mod traits;

pub use manager::BookingsManager;
pub use traits::{CommandContext, CommandHandler, CommandMetadata, CommandOutcome};
