//! SQLite-backed reservation store.
//!
//! Implements [`ReservationStore`] over the shared pool. The overlap
//! logic lives in the service layer; this module only moves rows.

use async_trait::async_trait;

use super::DbPool;
use crate::models::Reservation;
use crate::store::ReservationStore;
use crate::Result;

#[derive(Clone)]
pub struct SqliteReservationStore {
    pool: DbPool,
}

impl SqliteReservationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for SqliteReservationStore {
    async fn find_by_room(&self, room_id: &str) -> Result<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE room_id = ?",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>> {
        let row = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM reservations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn save(&self, reservation: Reservation) -> Result<Reservation> {
        sqlx::query(
            r#"
            INSERT INTO reservations (id, room_id, start_time, end_time, requester, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                room_id    = excluded.room_id,
                start_time = excluded.start_time,
                end_time   = excluded.end_time,
                requester  = excluded.requester,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&reservation.id)
        .bind(&reservation.room_id)
        .bind(reservation.start_time)
        .bind(reservation.end_time)
        .bind(&reservation.requester)
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(reservation)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
