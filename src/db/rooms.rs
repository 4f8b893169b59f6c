//! Room database queries.

use chrono::Utc;

use super::DbPool;
use crate::models::Room;
use crate::{Error, Result};

/// Input for creating a room.
#[derive(Debug, Clone)]
pub struct CreateRoom {
    pub id: String,
    pub name: String,
    pub capacity: i64,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Input for updating a room. Only the provided fields change.
#[derive(Debug, Clone, Default)]
pub struct UpdateRoom {
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Create a new room.
pub async fn create_room(pool: &DbPool, input: CreateRoom) -> Result<Room> {
    let now = Utc::now();
    sqlx::query_as::<_, Room>(
        r#"
        INSERT INTO rooms (id, name, capacity, description, location, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, 1, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.id)
    .bind(&input.name)
    .bind(input.capacity)
    .bind(&input.description)
    .bind(&input.location)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::AlreadyExists(format!("Room {} already exists", input.id))
        }
        _ => Error::Database(e),
    })
}

/// Get a room by ID.
pub async fn get_room(pool: &DbPool, id: &str) -> Result<Room> {
    sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Room not found: {}", id)))
}

/// List active rooms, oldest first. Deactivated rooms stay in the table
/// but drop out of listings.
pub async fn list_active_rooms(pool: &DbPool) -> Result<Vec<Room>> {
    sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE is_active = 1 ORDER BY created_at ASC")
        .fetch_all(pool)
        .await
        .map_err(Error::Database)
}

/// Update a room. COALESCE keeps the stored value for absent fields.
pub async fn update_room(pool: &DbPool, id: &str, input: UpdateRoom) -> Result<Room> {
    sqlx::query_as::<_, Room>(
        r#"
        UPDATE rooms SET
            name        = COALESCE(?, name),
            capacity    = COALESCE(?, capacity),
            description = COALESCE(?, description),
            location    = COALESCE(?, location),
            updated_at  = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(input.capacity)
    .bind(&input.description)
    .bind(&input.location)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("Room not found: {}", id)))
}

/// Soft-delete a room by flipping is_active off.
pub async fn deactivate_room(pool: &DbPool, id: &str) -> Result<()> {
    let result = sqlx::query("UPDATE rooms SET is_active = 0, updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Room not found: {}", id)));
    }
    Ok(())
}
