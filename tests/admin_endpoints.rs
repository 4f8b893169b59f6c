//! Admin endpoint tests.
//!
//! Verifies the role gate on /admin/* and the user/room management
//! operations over real HTTP request/response cycles.

use axum::{
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    Router,
};
use axum_test::TestServer;
use roombook::api;
use roombook::config::AuthConfig;
use roombook::db;
use roombook::AppState;
use serde_json::{json, Value};

fn bearer_auth(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

/// Build a server plus an admin token (first registration) and a member
/// token (second registration).
async fn build_test_app() -> (TestServer, String, String) {
    let pool = db::init_pool(":memory:")
        .await
        .expect("Failed to create test database");
    db::initialize_schema(&pool)
        .await
        .expect("Failed to apply schema");

    let state = AppState::from_pool(
        pool,
        &AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 24,
        },
    );

    let app = Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    let admin_token = register(&server, "admin@example.com", "Admin").await;
    let member_token = register(&server, "member@example.com", "Member").await;

    (server, admin_token, member_token)
}

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
    response.json::<Value>()["token"].as_str().unwrap().to_string()
}

// ============================================================================
// Access control
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_auth() {
    let (server, _admin, _member) = build_test_app().await;

    let response = server.get("/admin/users").await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_admin_routes_reject_members() {
    let (server, _admin, member) = build_test_app().await;

    let response = server
        .get("/admin/users")
        .add_header(AUTHORIZATION, bearer_auth(&member))
        .await;
    response.assert_status_forbidden();

    let response = server
        .post("/admin/rooms")
        .add_header(AUTHORIZATION, bearer_auth(&member))
        .json(&json!({"name": "Boardroom", "capacity": 8}))
        .await;
    response.assert_status_forbidden();
}

// ============================================================================
// User management
// ============================================================================

#[tokio::test]
async fn test_list_and_get_users() {
    let (server, admin, _member) = build_test_app().await;

    let response = server
        .get("/admin/users")
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .await;
    response.assert_status_ok();

    let users: Value = response.json();
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    // Password hashes never leave the server
    for user in users {
        assert!(user.get("password_hash").is_none());
    }

    let id = users[0]["id"].as_str().unwrap();
    let response = server
        .get(&format!("/admin/users/{}", id))
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], id);
}

#[tokio::test]
async fn test_change_user_email_enforces_uniqueness() {
    let (server, admin, _member) = build_test_app().await;

    let users: Value = server
        .get("/admin/users")
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .await
        .json();
    let member_id = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["role"] == "member")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Taken address conflicts
    let response = server
        .post(&format!("/admin/users/{}/email", member_id))
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .json(&json!({"email": "admin@example.com"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    // A fresh address goes through
    let response = server
        .post(&format!("/admin/users/{}/email", member_id))
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .json(&json!({"email": "member2@example.com"}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["email"], "member2@example.com");
}

#[tokio::test]
async fn test_delete_user() {
    let (server, admin, member) = build_test_app().await;

    let users: Value = server
        .get("/admin/users")
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .await
        .json();
    let member_id = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["role"] == "member")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server
        .delete(&format!("/admin/users/{}", member_id))
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    // The deleted member's token stops working
    let response = server
        .get("/auth/me")
        .add_header(AUTHORIZATION, bearer_auth(&member))
        .await;
    response.assert_status_unauthorized();

    // Deleting again 404s
    let response = server
        .delete(&format!("/admin/users/{}", member_id))
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .await;
    response.assert_status_not_found();
}

// ============================================================================
// Room management
// ============================================================================

#[tokio::test]
async fn test_room_crud_cycle() {
    let (server, admin, _member) = build_test_app().await;

    let response = server
        .post("/admin/rooms")
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .json(&json!({
            "name": "Boardroom",
            "capacity": 8,
            "location": "3rd floor",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let room: Value = response.json();
    let room_id = room["id"].as_str().unwrap().to_string();
    assert!(room_id.starts_with("room-"));
    assert_eq!(room["capacity"], 8);

    // Rename and resize
    let response = server
        .post(&format!("/admin/rooms/{}/name", room_id))
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .json(&json!({"name": "War room"}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "War room");

    let response = server
        .post(&format!("/admin/rooms/{}/capacity", room_id))
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .json(&json!({"capacity": 12}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["capacity"], 12);

    // Soft-delete hides the room from listings
    let response = server
        .delete(&format!("/admin/rooms/{}", room_id))
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .get("/admin/rooms")
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 0);

    // But the row is still fetchable directly
    let response = server
        .get(&format!("/admin/rooms/{}", room_id))
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["is_active"], false);
}

#[tokio::test]
async fn test_room_capacity_validation() {
    let (server, admin, _member) = build_test_app().await;

    let response = server
        .post("/admin/rooms")
        .add_header(AUTHORIZATION, bearer_auth(&admin))
        .json(&json!({"name": "Closet", "capacity": 0}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
