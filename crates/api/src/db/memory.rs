//! In-memory [`AccountStore`] for tests.
//!
//! Mirrors the `users` table: IDs count up from 1, username and email are
//! unique, and listings are ordered by ID.

use std::sync::Mutex;

use user_registry_core::{AccountId, NewAccount};

use super::{AccountStore, RepositoryError};
use crate::models::account::Account;

/// Account store backed by a `Vec` behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Account>>,
    next_id: Mutex<i64>,
    reject_inserts: bool,
}

impl MemoryStore {
    /// A store whose inserts always fail with a constraint the registry does
    /// not know about.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            reject_inserts: true,
            ..Self::default()
        }
    }

    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<Account>> {
        self.rows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl AccountStore for MemoryStore {
    async fn insert(&self, account: &NewAccount) -> Result<Account, RepositoryError> {
        if self.reject_inserts {
            return Err(RepositoryError::Conflict(
                "duplicate key (constraint: users_pkey)".to_owned(),
            ));
        }

        let mut rows = self.rows();
        if rows.iter().any(|r| r.username == account.username) {
            return Err(RepositoryError::DuplicateUsername);
        }
        if rows.iter().any(|r| r.email == account.email) {
            return Err(RepositoryError::DuplicateEmail);
        }

        let id = {
            let mut next_id = self
                .next_id
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *next_id += 1;
            AccountId::new(*next_id)
        };

        let stored = Account {
            id,
            username: account.username.clone(),
            email: account.email.clone(),
            password_digest: account.password_digest.clone(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
        Ok(self
            .rows()
            .iter()
            .find(|r| r.username.as_str() == username)
            .cloned())
    }

    async fn search_by_username(&self, term: &str) -> Result<Vec<Account>, RepositoryError> {
        let term = term.to_lowercase();
        Ok(self
            .rows()
            .iter()
            .filter(|r| r.username.as_str().to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Account>, RepositoryError> {
        Ok(self.rows().clone())
    }

    async fn delete_by_id(&self, id: AccountId) -> Result<(), RepositoryError> {
        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
