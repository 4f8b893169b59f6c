//! Administrative user and room management.
//!
//! Thin business layer over the db queries: email-uniqueness checks on
//! user edits, the capacity floor on rooms, and room soft-deletion.

use crate::db::{self, CreateRoom, DbPool, UpdateRoom, UpdateUser};
use crate::models::{Room, User};
use crate::{Error, Result};

#[derive(Clone)]
pub struct AdminService {
    db: DbPool,
}

impl AdminService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // User management
    // ------------------------------------------------------------------

    pub async fn list_users(&self) -> Result<Vec<User>> {
        db::list_users(&self.db).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        db::get_user(&self.db, id).await
    }

    /// Update display name and/or email. A changed email must be unused.
    pub async fn update_user(&self, id: &str, input: UpdateUser) -> Result<User> {
        if let Some(ref email) = input.email {
            let current = db::get_user(&self.db, id).await?;
            if current.email != *email && db::email_exists(&self.db, email).await? {
                return Err(Error::AlreadyExists(format!(
                    "User with email {} already exists",
                    email
                )));
            }
        }
        db::update_user(&self.db, id, input).await
    }

    pub async fn change_user_email(&self, id: &str, email: &str) -> Result<User> {
        if email.is_empty() || !email.contains('@') {
            return Err(Error::Validation("A valid email is required".to_string()));
        }
        self.update_user(
            id,
            UpdateUser {
                email: Some(email.to_string()),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        db::delete_user(&self.db, id).await
    }

    // ------------------------------------------------------------------
    // Room management
    // ------------------------------------------------------------------

    pub async fn list_rooms(&self) -> Result<Vec<Room>> {
        db::list_active_rooms(&self.db).await
    }

    pub async fn get_room(&self, id: &str) -> Result<Room> {
        db::get_room(&self.db, id).await
    }

    pub async fn create_room(
        &self,
        name: &str,
        capacity: i64,
        description: Option<String>,
        location: Option<String>,
    ) -> Result<Room> {
        if name.is_empty() {
            return Err(Error::Validation("Room name is required".to_string()));
        }
        check_capacity(capacity)?;

        db::create_room(
            &self.db,
            CreateRoom {
                id: Room::new_room_id(),
                name: name.to_string(),
                capacity,
                description,
                location,
            },
        )
        .await
    }

    pub async fn update_room(&self, id: &str, input: UpdateRoom) -> Result<Room> {
        if let Some(capacity) = input.capacity {
            check_capacity(capacity)?;
        }
        db::update_room(&self.db, id, input).await
    }

    pub async fn change_room_name(&self, id: &str, name: &str) -> Result<Room> {
        if name.is_empty() {
            return Err(Error::Validation("Room name is required".to_string()));
        }
        db::update_room(
            &self.db,
            id,
            UpdateRoom {
                name: Some(name.to_string()),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn change_room_capacity(&self, id: &str, capacity: i64) -> Result<Room> {
        check_capacity(capacity)?;
        db::update_room(
            &self.db,
            id,
            UpdateRoom {
                capacity: Some(capacity),
                ..Default::default()
            },
        )
        .await
    }

    /// Rooms are never hard-deleted; deactivation hides them from
    /// listings while existing reservations keep resolving.
    pub async fn delete_room(&self, id: &str) -> Result<()> {
        db::deactivate_room(&self.db, id).await
    }
}

fn check_capacity(capacity: i64) -> Result<()> {
    if capacity < 1 {
        return Err(Error::Validation(
            "Capacity must be at least 1".to_string(),
        ));
    }
    Ok(())
}
