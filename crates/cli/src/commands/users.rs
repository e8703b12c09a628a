//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! # Register a user
//! ureg register -u alice -e alice@example.com -p secret1
//!
//! # List, look up and search
//! ureg list
//! ureg find alice
//! ureg search ali
//!
//! # Delete without the confirmation prompt
//! ureg delete 3 --yes
//! ```
//!
//! Every command writes its result to the given writer so the same code backs
//! the interactive menu.

use std::io::{BufRead, Write};

use user_registry_api::db::{AccountStore, RepositoryError};
use user_registry_api::models::Account;
use user_registry_api::services::RegistrationService;
use user_registry_core::AccountId;

use crate::error::CliError;

/// Register an account and report its ID.
///
/// # Errors
///
/// Returns `CliError::Registration` if validation or the insert fails.
pub async fn register<S: AccountStore>(
    service: &RegistrationService<S>,
    out: &mut impl Write,
    username: &str,
    email: &str,
    password: &str,
) -> Result<Account, CliError> {
    let account = service.register(username, email, password).await?;
    writeln!(
        out,
        "User '{}' registered successfully! ID: {}",
        account.username, account.id
    )?;
    Ok(account)
}

/// Print every account with a preview of its password digest.
///
/// # Errors
///
/// Returns `CliError` if the query or the write fails.
pub async fn list<S: AccountStore>(
    service: &RegistrationService<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let accounts = service.list().await?;

    if accounts.is_empty() {
        writeln!(out, "No users registered yet.")?;
        return Ok(());
    }

    writeln!(out, "--- Registered Users ---")?;
    for account in &accounts {
        writeln!(
            out,
            "ID: {}, Username: {}, Email: {}, PasswordHash (preview): {}",
            account.id,
            account.username,
            account.email,
            account.password_digest.preview()
        )?;
    }
    writeln!(out, "------------------------")?;
    Ok(())
}

/// Look up an account by exact username.
///
/// # Errors
///
/// Returns `CliError` if the query or the write fails. A missing account is
/// reported on `out`, not as an error.
pub async fn find<S: AccountStore>(
    service: &RegistrationService<S>,
    out: &mut impl Write,
    username: &str,
) -> Result<Option<Account>, CliError> {
    let username = username.trim();
    let account = service.find(username).await?;

    match &account {
        Some(account) => writeln!(
            out,
            "User found: ID: {}, Username: {}, Email: {}",
            account.id, account.username, account.email
        )?,
        None => writeln!(out, "User '{username}' not found.")?,
    }
    Ok(account)
}

/// Print accounts whose username contains `term`, ignoring case.
///
/// # Errors
///
/// Returns `CliError` if the query or the write fails.
pub async fn search<S: AccountStore>(
    service: &RegistrationService<S>,
    out: &mut impl Write,
    term: &str,
) -> Result<Vec<Account>, CliError> {
    let term = term.trim();
    let accounts = service.search(term).await?;

    if accounts.is_empty() {
        writeln!(out, "No users matching '{term}'.")?;
    }
    for account in &accounts {
        writeln!(
            out,
            "ID: {}, Username: {}, Email: {}",
            account.id, account.username, account.email
        )?;
    }
    Ok(accounts)
}

/// Delete an account by ID.
///
/// # Errors
///
/// Returns `CliError::UserNotFound` if no account has this ID.
pub async fn delete<S: AccountStore>(
    service: &RegistrationService<S>,
    out: &mut impl Write,
    id: AccountId,
) -> Result<(), CliError> {
    service.delete(id).await.map_err(|e| match e {
        RepositoryError::NotFound => CliError::UserNotFound(id),
        other => CliError::Repository(other),
    })?;
    writeln!(out, "User with ID {id} deleted successfully.")?;
    Ok(())
}

/// Ask before deleting. Only `y` or `yes` (any case) confirms.
///
/// End of input counts as "no".
///
/// # Errors
///
/// Returns `std::io::Error` if reading or writing fails.
pub fn confirm_delete(
    input: &mut impl BufRead,
    out: &mut impl Write,
    id: AccountId,
) -> std::io::Result<bool> {
    write!(
        out,
        "Are you sure you want to delete the user with ID {id}? (y/N): "
    )?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use user_registry_api::db::memory::MemoryStore;

    use super::*;

    fn service() -> RegistrationService<MemoryStore> {
        RegistrationService::new(MemoryStore::default())
    }

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_register_reports_id() {
        let service = service();
        let mut out = Vec::new();
        register(&service, &mut out, "alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(text(out), "User 'alice' registered successfully! ID: 1\n");
    }

    #[tokio::test]
    async fn test_register_error_is_not_printed() {
        let service = service();
        let mut out = Vec::new();
        let err = register(&service, &mut out, "alice", "alice@example.com", "123")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "password must be at least 6 characters");
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_list_empty() {
        let mut out = Vec::new();
        list(&service(), &mut out).await.unwrap();
        assert_eq!(text(out), "No users registered yet.\n");
    }

    #[tokio::test]
    async fn test_list_shows_digest_preview() {
        let service = service();
        service
            .register("alice", "alice@example.com", "password")
            .await
            .unwrap();

        let mut out = Vec::new();
        list(&service, &mut out).await.unwrap();
        let output = text(out);
        assert!(output.contains("ID: 1, Username: alice, Email: alice@example.com, "));
        assert!(output.contains("PasswordHash (preview): 5e884898da...\n"));
        assert!(output.starts_with("--- Registered Users ---\n"));
    }

    #[tokio::test]
    async fn test_find_found_and_missing() {
        let service = service();
        service
            .register("alice", "alice@example.com", "secret1")
            .await
            .unwrap();

        let mut out = Vec::new();
        assert!(find(&service, &mut out, " alice ").await.unwrap().is_some());
        assert!(find(&service, &mut out, "bob").await.unwrap().is_none());
        assert_eq!(
            text(out),
            "User found: ID: 1, Username: alice, Email: alice@example.com\nUser 'bob' not found.\n"
        );
    }

    #[tokio::test]
    async fn test_search_partial() {
        let service = service();
        service
            .register("Alice", "a@example.com", "secret1")
            .await
            .unwrap();
        service
            .register("bob", "b@example.com", "secret1")
            .await
            .unwrap();

        let mut out = Vec::new();
        let found = search(&service, &mut out, "LIC").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(text(out), "ID: 1, Username: Alice, Email: a@example.com\n");

        let mut out = Vec::new();
        assert!(search(&service, &mut out, "zed").await.unwrap().is_empty());
        assert_eq!(text(out), "No users matching 'zed'.\n");
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut out = Vec::new();
        let err = delete(&service(), &mut out, AccountId::new(9))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::UserNotFound(_)));
        assert_eq!(err.to_string(), "no user found with ID 9");
    }

    #[test]
    fn test_confirm_delete_answers() {
        for (answer, expected) in [
            ("y\n", true),
            ("YES\n", true),
            (" Yes \n", true),
            ("n\n", false),
            ("\n", false),
            ("", false),
            ("s\n", false),
        ] {
            let mut out = Vec::new();
            let mut input = answer.as_bytes();
            let confirmed = confirm_delete(&mut input, &mut out, AccountId::new(2)).unwrap();
            assert_eq!(confirmed, expected, "answer: {answer:?}");
            assert_eq!(
                text(out),
                "Are you sure you want to delete the user with ID 2? (y/N): "
            );
        }
    }
}
