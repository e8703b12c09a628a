//! Database operations for the user registry `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Registered accounts (id, username, email, password digest)
//!
//! # Schema
//!
//! There is no migrations framework. Both binaries call [`ensure_schema`] at
//! startup, which creates the table if it does not exist yet.

pub mod accounts;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use user_registry_core::{AccountId, NewAccount};

pub use accounts::AccountRepository;

use crate::models::account::Account;

/// Unique constraint on `users.username`.
pub const USERNAME_CONSTRAINT: &str = "users_username_key";
/// Unique constraint on `users.email`.
pub const EMAIL_CONSTRAINT: &str = "users_email_key";

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username TEXT NOT NULL,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        CONSTRAINT users_username_key UNIQUE (username),
        CONSTRAINT users_email_key UNIQUE (email)
    )
";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Insert would duplicate an existing username.
    #[error("duplicate username")]
    DuplicateUsername,

    /// Insert would duplicate an existing email.
    #[error("duplicate email")]
    DuplicateEmail,

    /// Any other unique constraint violation.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Which unique constraint rejected an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueViolation {
    Username,
    Email,
    Other,
}

impl UniqueViolation {
    /// Classify a database error by SQLSTATE and constraint name.
    ///
    /// Returns `None` when the error is not a unique violation.
    #[must_use]
    pub fn classify(code: Option<&str>, constraint: Option<&str>) -> Option<Self> {
        if code != Some(UNIQUE_VIOLATION) {
            return None;
        }
        Some(match constraint {
            Some(USERNAME_CONSTRAINT) => Self::Username,
            Some(EMAIL_CONSTRAINT) => Self::Email,
            _ => Self::Other,
        })
    }
}

/// Storage operations behind both front-ends.
///
/// [`AccountRepository`] is the `PostgreSQL` implementation.
pub trait AccountStore {
    /// Insert a validated account and return it with its assigned ID.
    ///
    /// Unique violations are reported as [`RepositoryError::DuplicateUsername`],
    /// [`RepositoryError::DuplicateEmail`] or [`RepositoryError::Conflict`].
    fn insert(
        &self,
        account: &NewAccount,
    ) -> impl Future<Output = Result<Account, RepositoryError>> + Send;

    /// Find the account whose username matches exactly.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    /// Find accounts whose username contains `term`, ignoring case.
    fn search_by_username(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<Account>, RepositoryError>> + Send;

    /// List every account ordered by ID.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Account>, RepositoryError>> + Send;

    /// Delete an account by ID.
    ///
    /// Returns [`RepositoryError::NotFound`] if no row was deleted.
    fn delete_by_id(
        &self,
        id: AccountId,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create the `users` table if it does not exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if the statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;
    tracing::info!("users table ready");
    Ok(())
}

/// Build an `ILIKE` pattern that matches `term` as a literal substring.
///
/// The term is lowercased and `\`, `%` and `_` are escaped.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
