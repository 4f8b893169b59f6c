//! Reservation models.
//!
//! A `Reservation` is the persisted record; `NewReservation` is the
//! client-supplied input. Updates never mutate in place: they produce a
//! fresh record via [`Reservation::with_changes`], keeping `id` and
//! `created_at` and refreshing `updated_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A booked time slot in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: String,
    /// Opaque room key. Not cross-checked against the room registry by
    /// the reservation core.
    pub room_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Display name of whoever booked the slot.
    pub requester: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a reservation (and the replacement values of an
/// update). Structural presence is the transport layer's problem; the
/// reservation core only interprets the times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    pub room_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub requester: String,
}

impl Reservation {
    /// Materialize a new reservation with a generated id and server-side
    /// timestamps.
    pub fn create(input: NewReservation) -> Self {
        let now = super::now();
        Self {
            id: super::new_id(),
            room_id: input.room_id,
            start_time: input.start_time,
            end_time: input.end_time,
            requester: input.requester,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy-with-changes for updates. `id` and `created_at` are immutable;
    /// everything else is replaced and `updated_at` is refreshed.
    pub fn with_changes(&self, input: NewReservation) -> Self {
        Self {
            id: self.id.clone(),
            room_id: input.room_id,
            start_time: input.start_time,
            end_time: input.end_time,
            requester: input.requester,
            created_at: self.created_at,
            updated_at: super::now(),
        }
    }
}
