//! Registration input validation.

use thiserror::Error;

use super::{Email, EmailError, Password, PasswordDigest, PasswordError, Username, UsernameError};

/// The first rule a registration request broke.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Username(#[from] UsernameError),
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// A registration request that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: Username,
    pub email: Email,
    pub password_digest: PasswordDigest,
}

impl NewAccount {
    /// Validate raw registration input and hash the password.
    ///
    /// Fields are trimmed and checked in order: username, email, password.
    /// Only the first failure is reported.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first field that is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use user_registry_core::{NewAccount, ValidationError, EmailError};
    ///
    /// let account = NewAccount::parse("alice", "alice@example.com", "secret1").unwrap();
    /// assert_eq!(account.username.as_str(), "alice");
    ///
    /// let err = NewAccount::parse("bob", "bob.example.com", "x").unwrap_err();
    /// assert_eq!(err, ValidationError::Email(EmailError::MissingAtSymbol));
    /// ```
    pub fn parse(username: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        let username = Username::parse(username)?;
        let email = Email::parse(email)?;
        let password = Password::parse(password)?;

        Ok(Self {
            username,
            email,
            password_digest: password.digest(),
        })
    }
}
