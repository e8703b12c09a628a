//! End-to-end tests for the user API.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The API server running (cargo run -p user-registry-api)
//!
//! Run with: cargo test -p user-registry-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use user_registry_integration_tests::{ApiClient, unique_username};

async fn body(resp: reqwest::Response) -> Value {
    resp.json().await.expect("Failed to parse JSON body")
}

/// Register a fresh user and return `(id, username, email)`.
async fn create_user(api: &ApiClient, prefix: &str) -> (i64, String, String) {
    let username = unique_username(prefix);
    let email = format!("{username}@example.com");
    let resp = api
        .register(&username, &email, "secret123")
        .await
        .expect("Failed to register user");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body(resp).await["id"].as_i64().expect("id is an integer");
    (id, username, email)
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_health_endpoints() {
    let api = ApiClient::new();

    let resp = api.get("/health").await.expect("Failed to call /health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");

    let resp = api
        .get("/health/ready")
        .await
        .expect("Failed to call /health/ready");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_returns_created_user() {
    let api = ApiClient::new();
    let username = unique_username("reg");
    let email = format!("{username}@example.com");

    let resp = api
        .register(&format!("  {username} "), &email, "secret123")
        .await
        .expect("Failed to register user");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json = body(resp).await;
    assert!(json["id"].as_i64().is_some_and(|id| id > 0));
    assert_eq!(json["username"], username.as_str());
    assert_eq!(json["email"], email.as_str());
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_duplicate_username() {
    let api = ApiClient::new();
    let (_, username, _) = create_user(&api, "dupname").await;

    let resp = api
        .register(&username, &format!("other_{username}@example.com"), "secret123")
        .await
        .expect("Failed to register user");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
        body(resp).await["error"],
        format!("username '{username}' already exists")
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_duplicate_email() {
    let api = ApiClient::new();
    let (_, _, email) = create_user(&api, "dupmail").await;

    let resp = api
        .register(&unique_username("dupmail2"), &email, "secret123")
        .await
        .expect("Failed to register user");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
        body(resp).await["error"],
        format!("email '{email}' is already registered")
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_validation() {
    let api = ApiClient::new();

    let resp = api
        .register(&unique_username("short"), "short@example.com", "12345")
        .await
        .expect("Failed to register user");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body(resp).await["error"],
        "password must be at least 6 characters"
    );

    let resp = api
        .register_raw(&json!({"username": "x", "email": "no-at-sign", "password": "secret123"}))
        .await
        .expect("Failed to register user");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(resp).await["error"], "invalid email format");
}

// ============================================================================
// Listing & Search
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_list_includes_new_user_in_id_order() {
    let api = ApiClient::new();
    let (id, username, _) = create_user(&api, "list").await;

    let resp = api.list().await.expect("Failed to list users");
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body(resp).await;
    let users = json.as_array().expect("list is an array");
    assert!(
        users
            .iter()
            .any(|u| u["id"] == id && u["username"] == username.as_str())
    );

    let ids: Vec<i64> = users.iter().filter_map(|u| u["id"].as_i64()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_search_partial_case_insensitive() {
    let api = ApiClient::new();
    let (id, username, _) = create_user(&api, "SearchMe").await;

    let resp = api
        .search(&username.to_uppercase())
        .await
        .expect("Failed to search users");
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body(resp).await;
    let users = json.as_array().expect("search result is an array");
    assert!(users.iter().any(|u| u["id"] == id));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_search_no_match_is_empty_array() {
    let api = ApiClient::new();
    let resp = api
        .search(&unique_username("nobody"))
        .await
        .expect("Failed to search users");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await, json!([]));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_search_requires_username() {
    let api = ApiClient::new();
    let resp = api.get("/api/user").await.expect("Failed to search users");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Deletion
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_delete_then_not_found() {
    let api = ApiClient::new();
    let (id, _, _) = create_user(&api, "delete").await;

    let resp = api
        .delete(&id.to_string())
        .await
        .expect("Failed to delete user");
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body(resp).await;
    assert_eq!(json["id"], id);
    assert_eq!(
        json["message"],
        format!("user with ID {id} deleted successfully")
    );

    let resp = api
        .delete(&id.to_string())
        .await
        .expect("Failed to delete user");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body(resp).await["error"],
        format!("no user found with ID {id}")
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_delete_invalid_id() {
    let api = ApiClient::new();
    let resp = api.delete("abc").await.expect("Failed to delete user");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
