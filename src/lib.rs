//! Roombook - Room Reservation Booking API
//!
//! Users register and authenticate, then book time slots in named rooms.
//! The reservation core rejects past or inverted time ranges and
//! overlapping bookings, serializing writers per room so concurrent
//! requests cannot double-book a slot.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

pub use error::{Error, Result};
pub use state::AppState;
