//! API Integration Tests for the Roombook server
//!
//! Tests the REST API endpoints using axum-test over an in-memory
//! SQLite database: health checks, the auth flow, and the full
//! reservation booking cycle including conflict and not-found mappings.

use axum::{
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    Router,
};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use roombook::api;
use roombook::config::AuthConfig;
use roombook::db::{self, DbPool};
use roombook::AppState;
use serde_json::{json, Value};

/// Helper function to create a Bearer Authorization header value
fn bearer_auth(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

// ============================================================================
// Test Setup Helpers
// ============================================================================

fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 24,
    }
}

async fn build_test_app() -> (TestServer, DbPool) {
    let pool = db::init_pool(":memory:")
        .await
        .expect("Failed to create test database");
    db::initialize_schema(&pool)
        .await
        .expect("Failed to apply schema");

    let state = AppState::from_pool(pool.clone(), &test_auth_config());

    let app = Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state);

    let server = TestServer::new(app).expect("Failed to create test server");

    (server, pool)
}

/// Register a user through the API and return their token.
async fn register(server: &TestServer, email: &str, name: &str) -> String {
    let response = server
        .post("/auth/register")
        .json(&json!({
            "email": email,
            "password": "password123",
            "display_name": name,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    body["token"].as_str().expect("token in response").to_string()
}

/// RFC3339 timestamp `hours` hours from now.
fn hours_from_now(hours: i64) -> String {
    (Utc::now() + Duration::hours(hours)).to_rfc3339()
}

// ============================================================================
// Health Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_returns_healthy() {
    let (server, _pool) = build_test_app().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_liveness_check_returns_ok() {
    let (server, _pool) = build_test_app().await;

    let response = server.get("/health/live").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_readiness_check_reports_database() {
    let (server, _pool) = build_test_app().await;

    let response = server.get("/health/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert!(body["checks"].is_array());
}

// ============================================================================
// Auth Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login_round_trip() {
    let (server, _pool) = build_test_app().await;

    let token = register(&server, "alice@example.com", "Alice").await;
    assert!(!token.is_empty());

    let response = server
        .post("/auth/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "password123",
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["email"], "alice@example.com");
    // First registered user is the admin
    assert_eq!(body["role"], "admin");
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_email_returns_409() {
    let (server, _pool) = build_test_app().await;
    register(&server, "alice@example.com", "Alice").await;

    let response = server
        .post("/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "password123",
            "display_name": "Other Alice",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let (server, _pool) = build_test_app().await;
    register(&server, "alice@example.com", "Alice").await;

    let response = server
        .post("/auth/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "wrong-password",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let (server, _pool) = build_test_app().await;
    let token = register(&server, "alice@example.com", "Alice").await;

    let response = server
        .get("/auth/me")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["display_name"], "Alice");
}

#[tokio::test]
async fn test_me_without_token_returns_401() {
    let (server, _pool) = build_test_app().await;

    let response = server.get("/auth/me").await;

    response.assert_status_unauthorized();
}

// ============================================================================
// Reservation Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_reservations_require_auth() {
    let (server, _pool) = build_test_app().await;

    let response = server.get("/reservations/room-1").await;
    response.assert_status_unauthorized();

    let response = server
        .get("/reservations/room-1")
        .add_header(AUTHORIZATION, bearer_auth("not-a-real-token"))
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_create_reservation_in_empty_room() {
    let (server, _pool) = build_test_app().await;
    let token = register(&server, "alice@example.com", "Alice").await;

    let response = server
        .post("/reservations")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({
            "room_id": "room-1",
            "start_time": hours_from_now(1),
            "end_time": hours_from_now(3),
            "requester": "Alice",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["id"].is_string());
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["room_id"], "room-1");
    assert_eq!(body["requester"], "Alice");
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_overlapping_reservation_returns_409() {
    let (server, _pool) = build_test_app().await;
    let token = register(&server, "alice@example.com", "Alice").await;

    let response = server
        .post("/reservations")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({
            "room_id": "room-1",
            "start_time": hours_from_now(1),
            "end_time": hours_from_now(3),
            "requester": "Alice",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    // Bob wants [T+1h30m, T+4h) which cuts into Alice's slot
    let response = server
        .post("/reservations")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({
            "room_id": "room-1",
            "start_time": (Utc::now() + Duration::minutes(90)).to_rfc3339(),
            "end_time": hours_from_now(4),
            "requester": "Bob",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "ROOM_ALREADY_BOOKED");
}

#[tokio::test]
async fn test_touching_reservation_is_accepted() {
    let (server, _pool) = build_test_app().await;
    let token = register(&server, "alice@example.com", "Alice").await;

    for (start, end, requester) in [(1, 3, "Alice"), (3, 5, "Bob")] {
        let response = server
            .post("/reservations")
            .add_header(AUTHORIZATION, bearer_auth(&token))
            .json(&json!({
                "room_id": "room-1",
                "start_time": hours_from_now(start),
                "end_time": hours_from_now(end),
                "requester": requester,
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let response = server
        .get("/reservations/room-1")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_past_reservation_returns_400() {
    let (server, _pool) = build_test_app().await;
    let token = register(&server, "alice@example.com", "Alice").await;

    let response = server
        .post("/reservations")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({
            "room_id": "room-1",
            "start_time": (Utc::now() - Duration::hours(1)).to_rfc3339(),
            "end_time": hours_from_now(1),
            "requester": "Alice",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_TIME");
}

#[tokio::test]
async fn test_inverted_times_return_400() {
    let (server, _pool) = build_test_app().await;
    let token = register(&server, "alice@example.com", "Alice").await;

    let response = server
        .post("/reservations")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({
            "room_id": "room-1",
            "start_time": hours_from_now(3),
            "end_time": hours_from_now(1),
            "requester": "Alice",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_fields_return_400() {
    let (server, _pool) = build_test_app().await;
    let token = register(&server, "alice@example.com", "Alice").await;

    let response = server
        .post("/reservations")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({
            "room_id": "",
            "start_time": hours_from_now(1),
            "end_time": hours_from_now(2),
            "requester": "Alice",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_reservation_detail_and_delete_cycle() {
    let (server, _pool) = build_test_app().await;
    let token = register(&server, "alice@example.com", "Alice").await;

    let response = server
        .post("/reservations")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({
            "room_id": "room-1",
            "start_time": hours_from_now(1),
            "end_time": hours_from_now(2),
            "requester": "Alice",
        }))
        .await;
    let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = server
        .get(&format!("/reservations/detail/{}", id))
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], id.as_str());

    let response = server
        .delete(&format!("/reservations/{}", id))
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    // Fetching and deleting again both 404
    let response = server
        .get(&format!("/reservations/detail/{}", id))
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;
    response.assert_status_not_found();

    let response = server
        .delete(&format!("/reservations/{}", id))
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_update_reservation_keeps_id_and_maps_conflicts() {
    let (server, _pool) = build_test_app().await;
    let token = register(&server, "alice@example.com", "Alice").await;

    let create = |start: i64, end: i64, requester: &str| {
        json!({
            "room_id": "room-1",
            "start_time": hours_from_now(start),
            "end_time": hours_from_now(end),
            "requester": requester,
        })
    };

    let response = server
        .post("/reservations")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&create(1, 3, "Alice"))
        .await;
    let alice_id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = server
        .post("/reservations")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&create(4, 5, "Bob"))
        .await;
    let bob_id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    // Updating Alice's reservation to its own slot succeeds (no
    // self-conflict) and keeps the id.
    let response = server
        .put(&format!("/reservations/{}", alice_id))
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&create(1, 3, "Alice"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], alice_id.as_str());

    // Moving Bob onto Alice's slot conflicts
    let response = server
        .put(&format!("/reservations/{}", bob_id))
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&create(2, 4, "Bob"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    // Updating a nonexistent reservation 404s
    let response = server
        .put("/reservations/nope")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&create(6, 7, "Bob"))
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_list_unknown_room_is_empty() {
    let (server, _pool) = build_test_app().await;
    let token = register(&server, "alice@example.com", "Alice").await;

    let response = server
        .get("/reservations/no-such-room")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 0);
}
