//! User registration API routes.
//!
//! JSON endpoints over the registration service. Responses never include the
//! password digest.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use user_registry_core::AccountId;

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::models::Account;
use crate::state::AppState;

/// Public view of an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: AccountId,
    pub username: String,
    pub email: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.to_string(),
            email: account.email.to_string(),
        }
    }
}

fn to_responses(accounts: &[Account]) -> Vec<AccountResponse> {
    accounts.iter().map(AccountResponse::from).collect()
}

// ============================================================================
// Registration
// ============================================================================

/// Registration request body.
///
/// Missing fields are treated as empty and rejected by validation.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Register a new user.
///
/// POST /api/users/register
///
/// The body is decoded as JSON whatever its `Content-Type`.
///
/// # Errors
///
/// Returns 400 for a malformed body or invalid input, 409 when the username
/// or email is taken, and 500 for store failures.
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    let request: RegisterRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid request body: {e}")))?;

    let account = state
        .registration()
        .register(&request.username, &request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

// ============================================================================
// Lookup
// ============================================================================

/// List all users ordered by ID.
///
/// GET /api/users
///
/// # Errors
///
/// Returns 500 if the query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AccountResponse>>> {
    let accounts = state.registration().list().await?;
    Ok(Json(to_responses(&accounts)))
}

/// Query parameters for username search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub username: Option<String>,
}

/// Search users by partial, case-insensitive username.
///
/// GET /api/user?username=<term>
///
/// # Errors
///
/// Returns 400 when `username` is missing or blank, 500 if the query fails.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<AccountResponse>>> {
    let term = params
        .username
        .filter(|term| !term.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("parameter 'username' is required".to_string()))?;

    let accounts = state.registration().search(&term).await?;
    Ok(Json(to_responses(&accounts)))
}

// ============================================================================
// Deletion
// ============================================================================

/// Response after deleting a user.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: AccountId,
    pub message: String,
}

/// Delete a user by ID.
///
/// DELETE /api/users/{id}
///
/// # Errors
///
/// Returns 400 for a non-integer ID, 404 when no user has the ID, and 500 if
/// the statement fails.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id: AccountId = raw_id
        .parse()
        .map_err(|e| AppError::BadRequest(format!("invalid ID: {e}")))?;

    state.registration().delete(id).await.map_err(|e| match e {
        RepositoryError::NotFound => AppError::NotFound(format!("no user found with ID {id}")),
        other => AppError::Database(other),
    })?;

    Ok(Json(DeleteResponse {
        id,
        message: format!("user with ID {id} deleted successfully"),
    }))
}

/// DELETE /api/users/ with the ID segment left empty.
///
/// # Errors
///
/// Always returns 400.
pub async fn delete_without_id() -> Result<Json<DeleteResponse>> {
    Err(AppError::BadRequest("invalid URL".to_string()))
}

/// JSON 404 for paths no route matches.
pub async fn not_found() -> AppError {
    AppError::NotFound("not found".to_string())
}
