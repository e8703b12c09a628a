//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client with a JSON body of the form
//! `{"error": "<message>"}`. All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::RegistrationError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Registration was rejected or failed.
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Registration(err) => match err {
                RegistrationError::Invalid(_) => StatusCode::BAD_REQUEST,
                RegistrationError::UsernameTaken(_) | RegistrationError::EmailTaken(_) => {
                    StatusCode::CONFLICT
                }
                RegistrationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message shown to the client.
    ///
    /// Server-side failures are reduced to a generic message.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Registration(RegistrationError::Store(_)) => "error registering user".to_string(),
            Self::Registration(err) => err.to_string(),
            Self::Database(RepositoryError::NotFound) => "not found".to_string(),
            Self::Database(_) => "Internal server error".to_string(),
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use user_registry_core::{EmailError, ValidationError};

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("no user found with ID 3".to_string());
        assert_eq!(err.to_string(), "Not found: no user found with ID 3");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::DataCorruption(
                "bad".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_registration_status_codes() {
        let invalid = RegistrationError::Invalid(ValidationError::Email(EmailError::Empty));
        assert_eq!(get_status(invalid.into()), StatusCode::BAD_REQUEST);

        let taken = RegistrationError::UsernameTaken("alice".to_string());
        assert_eq!(get_status(taken.into()), StatusCode::CONFLICT);

        let taken = RegistrationError::EmailTaken("a@b".to_string());
        assert_eq!(get_status(taken.into()), StatusCode::CONFLICT);

        let store = RegistrationError::Store(RepositoryError::Conflict("x".to_string()));
        assert_eq!(get_status(store.into()), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_public_messages_hide_internals() {
        let err = AppError::Database(RepositoryError::DataCorruption("secret detail".to_string()));
        assert_eq!(err.public_message(), "Internal server error");

        let err: AppError =
            RegistrationError::Store(RepositoryError::Conflict("users_pkey".to_string())).into();
        assert!(!err.public_message().contains("users_pkey"));

        let err: AppError = RegistrationError::UsernameTaken("alice".to_string()).into();
        assert_eq!(err.public_message(), "username 'alice' already exists");
    }
}
