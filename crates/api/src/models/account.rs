//! Account domain type.
//!
//! Validated domain object, separate from the database row type.

use user_registry_core::{AccountId, Email, PasswordDigest, Username};

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Store-assigned ID.
    pub id: AccountId,
    /// Unique username.
    pub username: Username,
    /// Unique email address.
    pub email: Email,
    /// Unsalted SHA-256 digest of the password.
    pub password_digest: PasswordDigest,
}
