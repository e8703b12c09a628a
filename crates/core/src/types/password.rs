//! Plaintext password and its stored digest.
//!
//! The digest is an unsalted SHA-256 of the trimmed password, hex encoded.
//! It is a placeholder for credential storage, not a password-hashing scheme.

use core::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Errors that can occur when parsing a [`Password`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The input string is empty after trimming.
    #[error("password cannot be empty")]
    Empty,
    /// The input is shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
}

/// A validated plaintext password.
///
/// `Debug` output is redacted so the value never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Minimum length in UTF-8 bytes, counted after trimming.
    pub const MIN_LENGTH: usize = 6;

    /// Parse a `Password` from user input.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Empty`] if the trimmed input is empty and
    /// [`PasswordError::TooShort`] if it is shorter than
    /// [`Password::MIN_LENGTH`] bytes.
    pub fn parse(s: &str) -> Result<Self, PasswordError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(PasswordError::Empty);
        }

        if s.len() < Self::MIN_LENGTH {
            return Err(PasswordError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the plaintext as a string slice.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Compute the stored digest for this password.
    #[must_use]
    pub fn digest(&self) -> PasswordDigest {
        PasswordDigest::from_password(self)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// Hex-encoded SHA-256 digest of a password, as stored in the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Number of leading characters shown by [`PasswordDigest::preview`].
    pub const PREVIEW_LENGTH: usize = 10;

    /// Hash a validated password.
    #[must_use]
    pub fn from_password(password: &Password) -> Self {
        Self(hex::encode(Sha256::digest(password.expose().as_bytes())))
    }

    /// Wrap a digest read back from the store.
    #[must_use]
    pub const fn from_stored(digest: String) -> Self {
        Self(digest)
    }

    /// Returns the digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for listings: the first ten characters followed by `...`.
    ///
    /// ```
    /// use user_registry_core::PasswordDigest;
    ///
    /// let digest = PasswordDigest::from_stored("0123456789abcdef".to_owned());
    /// assert_eq!(digest.preview(), "0123456789...");
    /// ```
    #[must_use]
    pub fn preview(&self) -> String {
        if self.0.chars().count() <= Self::PREVIEW_LENGTH {
            return self.0.clone();
        }
        let head: String = self.0.chars().take(Self::PREVIEW_LENGTH).collect();
        format!("{head}...")
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PasswordDigest {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PasswordDigest {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PasswordDigest {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
