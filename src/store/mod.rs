//! Reservation storage abstraction.
//!
//! The reservation core reads and writes through this trait so it can sit
//! in front of any backend: the SQLite implementation lives in
//! [`crate::db::SqliteReservationStore`], and [`InMemoryReservationStore`]
//! backs unit tests and embedded use.

mod memory;

pub use memory::InMemoryReservationStore;

use async_trait::async_trait;

use crate::models::Reservation;
use crate::Result;

/// Persistence operations the reservation core depends on.
///
/// `save` is an upsert: inserting a new id or replacing an existing one.
/// Backend failures surface as `Error::Database` / `Error::Store` and are
/// never retried here.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// All reservations for a room, in storage order.
    async fn find_by_room(&self, room_id: &str) -> Result<Vec<Reservation>>;

    /// Look up a single reservation.
    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>>;

    /// Whether a reservation with this id exists.
    async fn exists_by_id(&self, id: &str) -> Result<bool>;

    /// Insert or replace a reservation, returning the stored record.
    async fn save(&self, reservation: Reservation) -> Result<Reservation>;

    /// Remove a reservation. Removing an absent id is a no-op; callers
    /// that need a not-found guard check existence first.
    async fn delete_by_id(&self, id: &str) -> Result<()>;
}
