//! Console error type.

use thiserror::Error;

use user_registry_api::db::RepositoryError;
use user_registry_api::services::RegistrationError;
use user_registry_core::AccountId;

/// Errors that can occur while running a console command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database connection or schema error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Registration was rejected or failed.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Repository query failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// No account has the requested ID.
    #[error("no user found with ID {0}")]
    UserNotFound(AccountId),
}
