//! In-memory reservation store.
//!
//! A HashMap behind an RwLock. Used by the service unit tests and
//! anywhere a throwaway backend is good enough.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::ReservationStore;
use crate::models::Reservation;
use crate::{Error, Result};

#[derive(Default)]
pub struct InMemoryReservationStore {
    reservations: RwLock<HashMap<String, Reservation>>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Reservation>>> {
        self.reservations
            .read()
            .map_err(|_| Error::Store("reservation store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Reservation>>> {
        self.reservations
            .write()
            .map_err(|_| Error::Store("reservation store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn find_by_room(&self, room_id: &str) -> Result<Vec<Reservation>> {
        let map = self.read()?;
        Ok(map
            .values()
            .filter(|r| r.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(id))
    }

    async fn save(&self, reservation: Reservation) -> Result<Reservation> {
        self.write()?
            .insert(reservation.id.clone(), reservation.clone());
        Ok(reservation)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.write()?.remove(id);
        Ok(())
    }
}
