//! Administrative API endpoints.
//!
//! User and room management, restricted to administrators.
//!
//! Routes:
//! - GET /admin/users, GET/PATCH/DELETE /admin/users/:id
//! - POST /admin/users/:id/email - Change a user's email
//! - GET/POST /admin/rooms, PATCH/DELETE /admin/rooms/:id
//! - POST /admin/rooms/:id/name - Rename a room
//! - POST /admin/rooms/:id/capacity - Resize a room

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{UpdateRoom, UpdateUser};
use crate::middleware::{require_admin, require_auth};
use crate::models::{Room, User};
use crate::{AppState, Result};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailChangeRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            enabled: user.enabled,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub capacity: i64,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoomNameChangeRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RoomCapacityChangeRequest {
    pub capacity: i64,
}

#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: String,
    pub name: String,
    pub capacity: i64,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        RoomResponse {
            id: room.id,
            name: room.name,
            capacity: room.capacity,
            description: room.description,
            location: room.location,
            is_active: room.is_active,
            created_at: room.created_at,
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/:id/email", post(change_user_email))
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/:id", get(get_room).patch(update_room).delete(delete_room))
        .route("/rooms/:id/name", post(change_room_name))
        .route("/rooms/:id/capacity", post(change_room_capacity))
        .layer(from_fn(require_admin))
        .layer(from_fn_with_state(state, require_auth))
}

// ============================================================================
// User Handlers
// ============================================================================

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.admin.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = state.admin.get_user(&id).await?;
    Ok(Json(UserResponse::from(user)))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let user = state
        .admin
        .update_user(
            &id,
            UpdateUser {
                email: request.email,
                display_name: request.display_name,
            },
        )
        .await?;
    Ok(Json(UserResponse::from(user)))
}

async fn change_user_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<EmailChangeRequest>,
) -> Result<Json<UserResponse>> {
    let user = state.admin.change_user_email(&id, &request.email).await?;
    Ok(Json(UserResponse::from(user)))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.admin.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Room Handlers
// ============================================================================

async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomResponse>>> {
    let rooms = state.admin.list_rooms().await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoomResponse>> {
    let room = state.admin.get_room(&id).await?;
    Ok(Json(RoomResponse::from(room)))
}

async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse> {
    let room = state
        .admin
        .create_room(
            &request.name,
            request.capacity,
            request.description,
            request.location,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(RoomResponse::from(room))))
}

async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<RoomResponse>> {
    let room = state
        .admin
        .update_room(
            &id,
            UpdateRoom {
                name: request.name,
                capacity: request.capacity,
                description: request.description,
                location: request.location,
            },
        )
        .await?;
    Ok(Json(RoomResponse::from(room)))
}

async fn change_room_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RoomNameChangeRequest>,
) -> Result<Json<RoomResponse>> {
    let room = state.admin.change_room_name(&id, &request.name).await?;
    Ok(Json(RoomResponse::from(room)))
}

async fn change_room_capacity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RoomCapacityChangeRequest>,
) -> Result<Json<RoomResponse>> {
    let room = state
        .admin
        .change_room_capacity(&id, request.capacity)
        .await?;
    Ok(Json(RoomResponse::from(room)))
}

async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.admin.delete_room(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
