use serde::Serialize;
use sqlx::FromRow;

use crate::db::{DbPool, StoreError};

/// A user account. The hash is only loaded when asked for and never serialized.
#[derive(Debug, Serialize, FromRow)]
pub struct Account {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
}

#[derive(Debug)]
pub struct NewAccount {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// User accounts, kept in their own store apart from the catalog.
#[derive(Clone, Debug)]
pub struct AccountStore {
    pool: DbPool,
}

impl AccountStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub async fn insert_one(&self, new_account: NewAccount) -> Result<String, StoreError> {
        sqlx::query(
            r"
            INSERT INTO users (user_id, name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)
            ",
        )
        .bind(&new_account.user_id)
        .bind(&new_account.name)
        .bind(&new_account.email)
        .bind(&new_account.password_hash)
        .execute(&self.pool)
        .await?;
        Ok(new_account.user_id)
    }

    /// Finds an account by its external id; the password hash is projected out unless requested.
    pub async fn find_by_user_id(&self, user_id: &str, include_password: bool) -> Result<Option<Account>, StoreError> {
        let sql = if include_password {
            "SELECT user_id, name, email, password_hash FROM users WHERE user_id = ?"
        } else {
            "SELECT user_id, name, email, NULL AS password_hash FROM users WHERE user_id = ?"
        };
        let account = sqlx::query_as::<_, Account>(sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }
}
