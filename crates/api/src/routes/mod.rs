//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! POST   /api/users/register   - Register a user
//! GET    /api/users            - List all users
//! GET    /api/user?username=   - Partial, case-insensitive username search
//! DELETE /api/users/{id}       - Delete a user by ID
//! ```
//!
//! `DELETE /api/users/` with no ID is answered with 400.

pub mod users;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the user API routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/register", post(users::register))
        .route("/api/users", get(users::list))
        .route("/api/user", get(users::search))
        .route("/api/users/", delete(users::delete_without_id))
        .route("/api/users/{id}", delete(users::delete))
}
