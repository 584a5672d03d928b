use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub type DbPool = sqlx::SqlitePool;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    #[error("Database operation failed: {0}")]
    OperationFailed(#[from] sqlx::Error),
}

impl StoreError {
    /// True when the store rejected a write because of a UNIQUE constraint.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::OperationFailed(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}

pub async fn connect(url: &str, max_connections: u32) -> Result<DbPool, StoreError> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(StoreError::ConnectionFailed)?
        .create_if_missing(true)
        .foreign_keys(true)
        // Increase SQLite busy timeout to handle concurrent connections better
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(StoreError::ConnectionFailed)?;

    tracing::info!(url, "Database pool initialized");
    Ok(pool)
}
