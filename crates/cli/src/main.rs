//! User registry console.
//!
//! # Usage
//!
//! ```bash
//! # Interactive menu (default)
//! ureg
//!
//! # One-shot commands
//! ureg register -u alice -e alice@example.com -p secret1
//! ureg list
//! ureg find alice
//! ureg search ali
//! ureg delete 3 --yes
//!
//! # Create the users table and exit
//! ureg init-db
//! ```
//!
//! # Environment Variables
//!
//! - `POSTGRES_DSN` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`, then to a localhost default)
//! - `RUST_LOG` - log filter; logs go to stderr

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};

use user_registry_api::config::DatabaseConfig;
use user_registry_api::db::{self, AccountRepository};
use user_registry_api::services::RegistrationService;
use user_registry_core::AccountId;

mod commands;
mod console;
mod error;

use commands::users;
use console::Console;
use error::CliError;

#[derive(Parser)]
#[command(name = "ureg")]
#[command(author, version, about = "User registry console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu
    Interactive,
    /// Register a new user
    Register {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (min 6 characters)
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    List,
    /// Find a user by exact username
    Find {
        /// Username to look up
        username: String,
    },
    /// Search users by partial, case-insensitive username
    Search {
        /// Part of a username
        term: String,
    },
    /// Delete a user by ID
    Delete {
        /// User ID
        id: AccountId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Create the users table if it does not exist
    InitDb,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ureg=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let database = DatabaseConfig::from_env();
    database.warn_if_default();

    tracing::debug!("Connecting to database...");
    let pool = db::create_pool(&database.url).await?;
    db::ensure_schema(&pool).await?;

    let service = RegistrationService::new(AccountRepository::new(&pool));
    let mut stdout = std::io::stdout().lock();

    let result = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            Console::new(&service, std::io::stdin().lock(), &mut stdout)
                .run()
                .await
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            users::register(&service, &mut stdout, &username, &email, &password).await?;
            Ok(())
        }
        Commands::List => users::list(&service, &mut stdout).await,
        Commands::Find { username } => {
            users::find(&service, &mut stdout, &username).await?;
            Ok(())
        }
        Commands::Search { term } => {
            users::search(&service, &mut stdout, &term).await?;
            Ok(())
        }
        Commands::Delete { id, yes } => {
            let confirmed = yes
                || users::confirm_delete(&mut std::io::stdin().lock(), &mut stdout, id)?;
            if confirmed {
                users::delete(&service, &mut stdout, id).await
            } else {
                writeln!(stdout, "Delete cancelled.").map_err(CliError::from)
            }
        }
        Commands::InitDb => {
            tracing::info!("Database schema is up to date");
            Ok(())
        }
    };

    pool.close().await;
    tracing::debug!("Database connection closed");
    result
}
