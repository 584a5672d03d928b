use sqlx::Error as SqlxError;
use sqlx::migrate::{MigrateError as SqlxMigrateError, Migrator};
use thiserror::Error;

use crate::db::DbPool;

static CATALOG_MIGRATOR: Migrator = sqlx::migrate!("./migrations/catalog");
static ACCOUNTS_MIGRATOR: Migrator = sqlx::migrate!("./migrations/accounts");

#[rustfmt::skip]
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Failed to run embedded {store} migrations")]
    EmbeddedMigrationFailed { store: &'static str, #[source] source: SqlxMigrateError },

    #[error("No migrations applied yet")]
    NoMigrationsApplied,

    #[error("Failed to fetch applied migrations")]
    FetchAppliedMigrationsFailed { #[from] source: SqlxError },
}

/// The two independent migration sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrationSet {
    Catalog,
    Accounts,
}

impl MigrationSet {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Accounts => "accounts",
        }
    }

    const fn migrator(self) -> &'static Migrator {
        match self {
            Self::Catalog => &CATALOG_MIGRATOR,
            Self::Accounts => &ACCOUNTS_MIGRATOR,
        }
    }
}

/// List all embedded migrations of a set
#[must_use]
pub fn list_migrations(set: MigrationSet) -> Vec<String> {
    set.migrator()
        .iter()
        .map(|m| format!("{}_{}", m.version, m.description))
        .collect::<Vec<_>>()
}

/// Runs the embedded migrations of a set
pub async fn run_migrations(db: &DbPool, set: MigrationSet) -> Result<(), MigrationError> {
    set.migrator()
        .run(db)
        .await
        .map_err(|e| MigrationError::EmbeddedMigrationFailed { store: set.name(), source: e })?;
    tracing::info!(store = set.name(), "Database migrations completed successfully.");
    Ok(())
}

/// Check if migrations need to be applied
pub async fn check_pending_migrations(db: &DbPool, set: MigrationSet) -> Result<bool, MigrationError> {
    let available = i64::try_from(set.migrator().iter().count()).unwrap_or(i64::MAX);
    let applied = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = TRUE")
        .fetch_one(db)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(e) if e.message().contains("no such table") => MigrationError::NoMigrationsApplied,
            _ => MigrationError::FetchAppliedMigrationsFailed { source: err },
        })?;
    Ok(available > applied)
}
