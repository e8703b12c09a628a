//! Account repository for database operations.
//!
//! Queries are built at runtime with `sqlx::query_as` so the crate compiles
//! without a live database.

use sqlx::PgPool;

use user_registry_core::{AccountId, Email, NewAccount, PasswordDigest, Username};

use super::{AccountStore, RepositoryError, UniqueViolation, contains_pattern};
use crate::models::account::Account;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `users` queries.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: AccountId::new(row.id),
            username,
            email,
            password_digest: PasswordDigest::from_stored(row.password_hash),
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl AccountStore for AccountRepository<'_> {
    async fn insert(&self, account: &NewAccount) -> Result<Account, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash
            ",
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_digest)
        .fetch_one(self.pool)
        .await
        .map_err(map_insert_error)?;

        row.try_into()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r"
            SELECT id, username, email, password_hash
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn search_by_username(&self, term: &str) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r"
            SELECT id, username, email, password_hash
            FROM users
            WHERE username ILIKE $1
            ORDER BY id
            ",
        )
        .bind(contains_pattern(term))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list_all(&self) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r"
            SELECT id, username, email, password_hash
            FROM users
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn delete_by_id(&self, id: AccountId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Translate an insert failure, naming the unique constraint that fired.
fn map_insert_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        match UniqueViolation::classify(db_err.code().as_deref(), db_err.constraint()) {
            Some(UniqueViolation::Username) => return RepositoryError::DuplicateUsername,
            Some(UniqueViolation::Email) => return RepositoryError::DuplicateEmail,
            Some(UniqueViolation::Other) => {
                return RepositoryError::Conflict(format!(
                    "{} (constraint: {})",
                    db_err.message(),
                    db_err.constraint().unwrap_or("unknown")
                ));
            }
            None => {}
        }
    }
    RepositoryError::Database(e)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(username: &str, email: &str) -> AccountRow {
        AccountRow {
            id: 7,
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: "abc123".to_owned(),
        }
    }

    #[test]
    fn test_row_into_account() {
        let account: Account = row("alice", "alice@example.com").try_into().unwrap();
        assert_eq!(account.id, AccountId::new(7));
        assert_eq!(account.username.as_str(), "alice");
        assert_eq!(account.email.as_str(), "alice@example.com");
        assert_eq!(account.password_digest.as_str(), "abc123");
    }

    #[test]
    fn test_row_with_invalid_email_is_corruption() {
        let result: Result<Account, _> = row("alice", "not-an-email").try_into();
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_row_with_blank_username_is_corruption() {
        let result: Result<Account, _> = row("  ", "a@b").try_into();
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_non_database_error_passes_through() {
        let err = map_insert_error(sqlx::Error::RowNotFound);
        assert!(matches!(
            err,
            RepositoryError::Database(sqlx::Error::RowNotFound)
        ));
    }
}
