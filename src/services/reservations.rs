//! Reservation booking service.
//!
//! The conflict-detection core of the system. All booking writes funnel
//! through here: time validation, the overlap scan against the room's
//! existing reservations, and the save. The service talks to storage only
//! through the [`ReservationStore`] trait, so it works identically over
//! SQLite, the in-memory store, or anything else.
//!
//! # Overlap rule
//!
//! Two intervals `[s1, e1)` and `[s2, e2)` conflict iff
//! `s1 < e2 && e1 > s2`, strict on both sides, so a reservation that
//! starts exactly when another ends is allowed.
//!
//! # Concurrency
//!
//! The check-then-save sequence is not atomic at the store level, so two
//! concurrent creates for the same room could otherwise both pass the scan
//! and both save. The service serializes writers per `room_id` with an
//! async lock held across the whole check+save, which closes that window
//! for every store backend. Reads take no lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::models::{NewReservation, Reservation};
use crate::store::ReservationStore;
use crate::{Error, Result};

#[derive(Clone)]
pub struct ReservationService {
    store: Arc<dyn ReservationStore>,
    // One async mutex per room id; the map itself is only touched briefly.
    room_locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl ReservationService {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self {
            store,
            room_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Validate and persist a new reservation.
    ///
    /// Rejects with `InvalidTime` when the start is in the past or the end
    /// precedes the start, and with `RoomAlreadyBooked` when the slot
    /// overlaps an existing reservation in the same room. On success the
    /// returned record carries a fresh id and server-side timestamps.
    pub async fn create(&self, input: NewReservation) -> Result<Reservation> {
        let lock = self.room_lock(&input.room_id);
        let _guard = lock.lock().await;

        validate_times(input.start_time, input.end_time)?;
        self.check_conflicts(&input, None).await?;

        self.store.save(Reservation::create(input)).await
    }

    /// Validate and persist a replacement for an existing reservation.
    ///
    /// Same checks as [`create`](Self::create), except the reservation
    /// being updated is excluded from the overlap scan: a reservation
    /// never conflicts with itself. `id` and `created_at` are preserved,
    /// `updated_at` is refreshed.
    pub async fn update(&self, id: &str, input: NewReservation) -> Result<Reservation> {
        let lock = self.room_lock(&input.room_id);
        let _guard = lock.lock().await;

        let current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Reservation not found: {}", id)))?;

        validate_times(input.start_time, input.end_time)?;
        self.check_conflicts(&input, Some(id)).await?;

        self.store.save(current.with_changes(input)).await
    }

    /// Delete a reservation. Fails with `NotFound` for an unknown id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(Error::NotFound(format!("Reservation not found: {}", id)));
        }
        self.store.delete_by_id(id).await
    }

    /// All reservations for a room, in storage order. Pure read.
    pub async fn list_by_room(&self, room_id: &str) -> Result<Vec<Reservation>> {
        self.store.find_by_room(room_id).await
    }

    /// Fetch a single reservation by id.
    pub async fn get_by_id(&self, id: &str) -> Result<Reservation> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Reservation not found: {}", id)))
    }

    /// Scan the candidate's room for overlapping reservations,
    /// skipping `exclude_id` when given (the update path).
    async fn check_conflicts(
        &self,
        candidate: &NewReservation,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        let existing = self.store.find_by_room(&candidate.room_id).await?;
        let conflict = existing.iter().any(|r| {
            exclude_id != Some(r.id.as_str())
                && overlaps(candidate.start_time, candidate.end_time, r)
        });

        if conflict {
            return Err(Error::RoomAlreadyBooked(format!(
                "room {} is already booked for the requested time",
                candidate.room_id
            )));
        }
        Ok(())
    }

    fn room_lock(&self, room_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.room_locks.lock().expect("room lock map poisoned");
        locks
            .entry(room_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}

/// Time-order checks shared by create and update.
///
/// `end == start` deliberately passes: the order check mirrors the
/// original behavior of rejecting only `end < start`, so a zero-duration
/// reservation is accepted.
fn validate_times(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if start < Utc::now() {
        return Err(Error::InvalidTime(
            "reservation cannot be in the past".to_string(),
        ));
    }
    if end < start {
        return Err(Error::InvalidTime(
            "end time cannot precede start time".to_string(),
        ));
    }
    Ok(())
}

/// Strict half-open interval overlap: `[start, end)` against `r`.
fn overlaps(start: DateTime<Utc>, end: DateTime<Utc>, r: &Reservation) -> bool {
    start < r.end_time && end > r.start_time
}
