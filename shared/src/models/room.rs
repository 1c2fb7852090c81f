//! Room Model

use serde::{Deserialize, Serialize};

/// Operational room status, independent of booking state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Dirty,
    OutOfService,
}

/// Physical room entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub property_id: i64,
    pub room_type_id: i64,
    pub number: String,
    pub floor: i32,
    pub status: RoomStatus,
    pub created_at: i64,
}
