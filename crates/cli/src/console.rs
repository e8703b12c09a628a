//! Interactive menu loop.
//!
//! Reads choices line by line and dispatches to [`crate::commands::users`].
//! Command failures are printed and the loop continues; end of input exits.

use std::io::{BufRead, Write};

use user_registry_api::db::AccountStore;
use user_registry_api::services::RegistrationService;
use user_registry_core::AccountId;

use crate::commands::users;
use crate::error::CliError;

const MENU: &str = "\
Choose an option:
1. Register new user
2. List all users
3. Find user by username
4. Delete user by ID
5. Exit";

/// Menu loop over any line source and sink.
pub struct Console<'a, S, R, W> {
    service: &'a RegistrationService<S>,
    input: R,
    output: W,
}

impl<'a, S, R, W> Console<'a, S, R, W>
where
    S: AccountStore,
    R: BufRead,
    W: Write,
{
    /// Create a console reading from `input` and writing to `output`.
    pub const fn new(service: &'a RegistrationService<S>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Run until the user picks "Exit" or input ends.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Io` if the terminal cannot be read or written.
    /// Command failures are printed instead.
    pub async fn run(&mut self) -> Result<(), CliError> {
        writeln!(self.output, "Interactive User Registration System (PostgreSQL)")?;
        writeln!(self.output, "--------------------------------------------------")?;

        loop {
            writeln!(self.output, "\n{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let keep_going = match choice.as_str() {
                "1" => self.register().await?,
                "2" => self.list().await?,
                "3" => self.find().await?,
                "4" => self.delete().await?,
                "5" => false,
                _ => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        writeln!(self.output, "Exiting...")?;
        Ok(())
    }

    /// Print `label` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, CliError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    async fn register(&mut self) -> Result<bool, CliError> {
        writeln!(self.output, "\n--- Register New User ---")?;
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(false);
        };
        let Some(email) = self.prompt("Enter email: ")? else {
            return Ok(false);
        };
        let Some(password) = self.prompt("Enter password (min 6 characters): ")? else {
            return Ok(false);
        };

        match users::register(self.service, &mut self.output, &username, &email, &password)
            .await
        {
            Ok(_) => {}
            Err(CliError::Io(e)) => return Err(e.into()),
            Err(e) => writeln!(self.output, "Error registering user: {e}")?,
        }
        Ok(true)
    }

    async fn list(&mut self) -> Result<bool, CliError> {
        writeln!(self.output)?;
        match users::list(self.service, &mut self.output).await {
            Ok(()) => {}
            Err(CliError::Io(e)) => return Err(e.into()),
            Err(e) => writeln!(self.output, "Error listing users: {e}")?,
        }
        Ok(true)
    }

    async fn find(&mut self) -> Result<bool, CliError> {
        let Some(username) = self.prompt("\nEnter the username to search for: ")? else {
            return Ok(false);
        };

        match users::find(self.service, &mut self.output, &username).await {
            Ok(_) => {}
            Err(CliError::Io(e)) => return Err(e.into()),
            Err(e) => writeln!(self.output, "Error finding user: {e}")?,
        }
        Ok(true)
    }

    async fn delete(&mut self) -> Result<bool, CliError> {
        writeln!(self.output, "\n--- Delete User by ID ---")?;
        let Some(raw_id) = self.prompt("Enter the ID of the user to delete: ")? else {
            return Ok(false);
        };

        let id: AccountId = match raw_id.parse() {
            Ok(id) => id,
            Err(e) => {
                writeln!(self.output, "Invalid ID: {e}. Please enter a number.")?;
                return Ok(true);
            }
        };

        if !users::confirm_delete(&mut self.input, &mut self.output, id)? {
            writeln!(self.output, "Delete cancelled.")?;
            return Ok(true);
        }

        match users::delete(self.service, &mut self.output, id).await {
            Ok(()) => {}
            Err(CliError::Io(e)) => return Err(e.into()),
            Err(e) => writeln!(self.output, "Error deleting user: {e}")?,
        }
        Ok(true)
    }
}
