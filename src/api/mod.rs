//! API Routes for Roombook
//!
//! This module combines all API routes into a single router.
//!
//! Route structure:
//! - /auth/* - Registration and login (public) plus /auth/me (protected)
//! - /reservations/* - Booking CRUD (token-protected)
//! - /admin/* - User and room management (token-protected, admin)
//! - /health* - Health checks (public)

mod admin;
mod auth;
mod reservations;
pub mod status;

use axum::Router;

use crate::AppState;

/// Build the complete API router.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health endpoints (public)
        .merge(status::routes())
        // Authentication routes (mixed public/protected)
        .nest("/auth", auth::routes(state.clone()))
        // Booking endpoints (authenticated)
        .nest("/reservations", reservations::routes(state.clone()))
        // Admin endpoints (authenticated + admin role)
        .nest("/admin", admin::routes(state))
}
