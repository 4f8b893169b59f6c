//! Reservation API endpoints.
//!
//! Routes:
//! - GET /reservations/:room_id - All reservations for a room
//! - GET /reservations/detail/:id - Single reservation by id
//! - POST /reservations - Create a reservation (201)
//! - PUT /reservations/:id - Replace a reservation's details
//! - DELETE /reservations/:id - Remove a reservation (204)
//!
//! Structural validation (non-empty fields) happens here; the time and
//! overlap rules live in the reservation service.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::require_auth;
use crate::models::{NewReservation, Reservation};
use crate::{AppState, Error, Result};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of POST /reservations and PUT /reservations/:id.
#[derive(Debug, Deserialize)]
pub struct ReservationRequest {
    pub room_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub requester: String,
}

impl ReservationRequest {
    /// Required-field validation; the booking rules are the service's job.
    fn into_new_reservation(self) -> Result<NewReservation> {
        if self.room_id.trim().is_empty() {
            return Err(Error::Validation("room_id is required".to_string()));
        }
        if self.requester.trim().is_empty() {
            return Err(Error::Validation("requester is required".to_string()));
        }
        Ok(NewReservation {
            room_id: self.room_id,
            start_time: self.start_time,
            end_time: self.end_time,
            requester: self.requester,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: String,
    pub room_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub requester: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        ReservationResponse {
            id: r.id,
            room_id: r.room_id,
            start_time: r.start_time,
            end_time: r.end_time,
            requester: r.requester,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_reservation))
        .route("/detail/:id", get(get_reservation))
        // GET takes a room id; PUT/DELETE take a reservation id. One
        // route entry because axum wants a single parameter name per
        // path segment.
        .route(
            "/:id",
            get(list_by_room)
                .put(update_reservation)
                .delete(delete_reservation),
        )
        .layer(from_fn_with_state(state, require_auth))
}

// ============================================================================
// Handlers
// ============================================================================

/// List all reservations for a room.
async fn list_by_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<ReservationResponse>>> {
    let reservations = state.reservations.list_by_room(&room_id).await?;
    Ok(Json(
        reservations.into_iter().map(ReservationResponse::from).collect(),
    ))
}

/// Fetch a single reservation.
async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReservationResponse>> {
    let reservation = state.reservations.get_by_id(&id).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// Create a reservation.
async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<ReservationRequest>,
) -> Result<impl IntoResponse> {
    let input = request.into_new_reservation()?;
    let reservation = state.reservations.create(input).await?;
    Ok((StatusCode::CREATED, Json(ReservationResponse::from(reservation))))
}

/// Replace a reservation's details.
async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ReservationRequest>,
) -> Result<Json<ReservationResponse>> {
    let input = request.into_new_reservation()?;
    let reservation = state.reservations.update(&id, input).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// Delete a reservation.
async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.reservations.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
