//! Room model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bookable room. Rooms are soft-deleted: `is_active` is flipped off
/// instead of removing the row, so reservation history keeps resolving.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub capacity: i64,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Room ids look like `room-1a2b3c4d`: a short stable handle that is
    /// readable in URLs and logs.
    pub fn new_room_id() -> String {
        let id = super::new_id();
        format!("room-{}", &id.replace('-', "")[..8])
    }
}
