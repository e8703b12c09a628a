//! Registration service.
//!
//! Validates registration input, hashes the password and stores the account,
//! translating store conflicts into user-facing errors. The console and the
//! HTTP API both go through this type.

use thiserror::Error;

use user_registry_core::{AccountId, NewAccount, ValidationError};

use crate::db::{AccountStore, RepositoryError};
use crate::models::account::Account;

/// Errors that can occur while registering an account.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Input failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Another account already uses this username.
    #[error("username '{0}' already exists")]
    UsernameTaken(String),

    /// Another account already uses this email.
    #[error("email '{0}' is already registered")]
    EmailTaken(String),

    /// Any other store failure.
    #[error("error inserting user: {0}")]
    Store(RepositoryError),
}

/// Account operations shared by both front-ends.
pub struct RegistrationService<S> {
    store: S,
}

impl<S: AccountStore> RegistrationService<S> {
    /// Create a new registration service over a store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and register a new account.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::Invalid` if the input fails validation.
    /// Returns `RegistrationError::UsernameTaken` or `RegistrationError::EmailTaken`
    /// if the store reports a uniqueness conflict.
    /// Returns `RegistrationError::Store` for other store failures.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, RegistrationError> {
        let new_account = NewAccount::parse(username, email, password)?;

        let account = self
            .store
            .insert(&new_account)
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateUsername => {
                    RegistrationError::UsernameTaken(new_account.username.to_string())
                }
                RepositoryError::DuplicateEmail => {
                    RegistrationError::EmailTaken(new_account.email.to_string())
                }
                other => RegistrationError::Store(other),
            })?;

        tracing::info!(
            account_id = %account.id,
            username = %account.username,
            "Account registered"
        );
        Ok(account)
    }

    /// Look up an account by exact username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn find(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
        self.store.find_by_username(username.trim()).await
    }

    /// Case-insensitive partial match on username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn search(&self, term: &str) -> Result<Vec<Account>, RepositoryError> {
        self.store.search_by_username(term.trim()).await
    }

    /// List all accounts ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        self.store.list_all().await
    }

    /// Delete an account by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no account has this ID.
    pub async fn delete(&self, id: AccountId) -> Result<(), RepositoryError> {
        self.store.delete_by_id(id).await?;
        tracing::info!(account_id = %id, "Account deleted");
        Ok(())
    }
}
