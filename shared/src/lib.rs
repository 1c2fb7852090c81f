//! Shared types for the front-desk engine
//!
//! Domain models, request payloads, the unified error taxonomy and small
//! utilities used by every crate in the workspace.

pub mod error;
pub mod models;
pub mod request;
pub mod util;

// Re-exports
pub use error::{BookingError, BookingResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
