//! Application state for Roombook.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use crate::config::{self, AuthConfig};
use crate::db::{self, DbPool, SqliteReservationStore};
use crate::services::{AdminService, AuthService, ReservationService};
use crate::Result;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
    /// Authentication service.
    pub auth: AuthService,
    /// Reservation booking service.
    pub reservations: ReservationService,
    /// Administrative user/room management.
    pub admin: AdminService,
}

impl AppState {
    /// Create a new application state from global configuration,
    /// initializing the database.
    pub async fn new() -> Result<Self> {
        let config = config::config();

        let db = db::init_pool(&config.database.path).await?;
        db::initialize_schema(&db).await?;

        Ok(Self::from_pool(db, &config.auth))
    }

    /// Assemble state on top of an existing pool. Used by tests with an
    /// in-memory database.
    pub fn from_pool(db: DbPool, auth: &AuthConfig) -> Self {
        let store = Arc::new(SqliteReservationStore::new(db.clone()));

        Self {
            auth: AuthService::new(db.clone(), auth.jwt_secret.clone(), auth.token_ttl_hours),
            reservations: ReservationService::new(store),
            admin: AdminService::new(db.clone()),
            db,
        }
    }
}
