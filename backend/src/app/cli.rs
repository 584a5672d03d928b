// cli.rs - operator commands for migrations and accounts
use std::io;
use std::io::Write;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::app::{self, MigrationError, MigrationSet};
use crate::auth;
use crate::core;
use crate::db;

const MIGRATION_SETS: [MigrationSet; 2] = [MigrationSet::Catalog, MigrationSet::Accounts];

#[rustfmt::skip]
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Checking migration status failed")]
    MigrationStatusCheckFailed { #[source] source: MigrationError },

    #[error("Running migrations failed")]
    MigrationRunFailed { #[source] source: MigrationError },

    #[error("Reading the password failed")]
    PasswordPromptFailed { #[source] source: io::Error },

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("Hashing the password failed")]
    PasswordHashingFailed { #[source] source: bcrypt::BcryptError },

    #[error("Creating the user failed")]
    UserCreationFailed { #[source] source: db::StoreError },
}

#[derive(Debug, Parser)]
#[command(name = "taproom")]
#[command(about = "Beer catalog REST server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Manage the catalog and accounts migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateCommand,
    },
    /// Create a user account, prompting for its password
    CreateUser {
        /// External id the user logs in with
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
}

#[derive(Clone, Copy, Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// List all embedded migrations
    List,
    /// Check if there are pending migrations
    Status,
}

impl Command {
    /// Commands that expect an up-to-date schema before they run.
    #[must_use]
    pub const fn needs_migrated_stores(&self) -> bool {
        !matches!(self, Self::Migrate { .. })
    }
}

/// Runs an operator command against the connected stores.
pub async fn run_cli(context: &core::Context, command: Command) -> Result<(), CliError> {
    match command {
        Command::Serve => Ok(()),
        Command::Migrate { action } => run_migrate(context, action).await,
        Command::CreateUser { user_id, name, email } => {
            print!("Enter password for user '{user_id}': ");
            io::stdout()
                .flush()
                .map_err(|e| CliError::PasswordPromptFailed { source: e })?;
            let password = rpassword::read_password().map_err(|e| CliError::PasswordPromptFailed { source: e })?;

            create_user(context, user_id, name, email, &password).await?;
            Ok(())
        }
    }
}

async fn run_migrate(context: &core::Context, action: MigrateCommand) -> Result<(), CliError> {
    for set in MIGRATION_SETS {
        let pool = match set {
            MigrationSet::Catalog => context.catalog.pool(),
            MigrationSet::Accounts => context.accounts.pool(),
        };

        match action {
            MigrateCommand::List => {
                let migrations = app::list_migrations(set);
                if migrations.is_empty() {
                    println!("No {} migrations found.", set.name());
                } else {
                    println!("Available {} migrations:", set.name());
                    for (i, migration) in migrations.iter().enumerate() {
                        println!("{}. {}", i + 1, migration);
                    }
                }
            }
            MigrateCommand::Status => match app::check_pending_migrations(pool, set).await {
                Ok(true) => println!("{}: there are pending migrations that need to be applied.", set.name()),
                Ok(false) => println!("{}: database is up to date. No pending migrations.", set.name()),
                Err(MigrationError::NoMigrationsApplied) => {
                    println!("{}: no migrations have been applied yet.", set.name());
                }
                Err(e) => return Err(CliError::MigrationStatusCheckFailed { source: e }),
            },
            MigrateCommand::Run => {
                app::run_migrations(pool, set)
                    .await
                    .map_err(|e| CliError::MigrationRunFailed { source: e })?;
                println!("{}: migrations applied successfully.", set.name());
            }
        }
    }
    Ok(())
}

/// Creates an account in the accounts store.
pub async fn create_user(
    context: &core::Context,
    user_id: String,
    name: String,
    email: String,
    password: &str,
) -> Result<(), CliError> {
    if password.trim().is_empty() {
        return Err(CliError::EmptyPassword);
    }

    let existing = context
        .accounts
        .find_by_user_id(&user_id, false)
        .await
        .map_err(|e| CliError::UserCreationFailed { source: e })?;
    if existing.is_some() {
        return Err(CliError::UserAlreadyExists(user_id));
    }

    let password_hash = auth::hash_password(password, context.settings.auth.password_hash_cost)
        .map_err(|e| CliError::PasswordHashingFailed { source: e })?;
    let new_account = db::NewAccount {
        user_id,
        name,
        email,
        password_hash,
    };
    let user_id = context
        .accounts
        .insert_one(new_account)
        .await
        .map_err(|e| CliError::UserCreationFailed { source: e })?;

    println!("User '{user_id}' created successfully!");
    Ok(())
}
