//! Data models for Roombook.
//!
//! Defines the core types used throughout the system: reservations,
//! rooms, and users.

mod reservation;
mod room;
mod user;

pub use reservation::*;
pub use room::*;
pub use user::*;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new UUID
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
