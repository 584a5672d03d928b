use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Row, Sqlite};

use crate::db::{DbPool, StoreError};

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Parameterized access to the catalog tables.
///
/// Table and column names always come from `'static` resource declarations, never from
/// request input; every value travels as a bound `?` parameter.
#[derive(Clone, Debug)]
pub struct Gateway {
    pool: DbPool,
}

impl Gateway {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub async fn count(&self, table: &str) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let count = sqlx::query_scalar::<_, i64>(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Counts the rows whose columns equal all of the given body values.
    pub async fn count_matching(&self, table: &str, filters: &[(&str, &Value)]) -> Result<i64, StoreError> {
        let conditions = filters
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(" AND ");
        let sql = format!("SELECT COUNT(*) FROM {table} WHERE {conditions}");

        let query = filters
            .iter()
            .fold(sqlx::query(&sql), |query, (_, value)| bind_value(query, value));
        let row = query.fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>(0)?)
    }

    pub async fn select_page<T>(&self, table: &str, offset: i64, limit: i64) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = format!("SELECT * FROM {table} ORDER BY id LIMIT ? OFFSET ?");
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn select_by_id<T>(&self, table: &str, id: i64) -> Result<Option<T>, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = format!("SELECT * FROM {table} WHERE id = ?");
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// All rows whose `column` references `id`, ordered by id. Does not check that `id` exists.
    pub async fn select_where<T>(&self, table: &str, column: &str, id: i64) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = format!("SELECT * FROM {table} WHERE {column} = ? ORDER BY id");
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Inserts one row and returns its store-assigned id.
    pub async fn insert(&self, table: &str, fields: &Map<String, Value>) -> Result<i64, StoreError> {
        let columns = fields.keys().map(String::as_str).collect::<Vec<_>>().join(", ");
        let placeholders = vec!["?"; fields.len()].join(", ");
        let sql = format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})");

        let query = fields
            .values()
            .fold(sqlx::query(&sql), bind_value);
        let result = query.execute(&self.pool).await?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrites the given columns of one row; returns false when no row has that id.
    pub async fn update(&self, table: &str, id: i64, fields: &Map<String, Value>) -> Result<bool, StoreError> {
        let assignments = fields
            .keys()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {table} SET {assignments} WHERE id = ?");

        let query = fields
            .values()
            .fold(sqlx::query(&sql), bind_value)
            .bind(id);
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes one row; returns false when no row has that id.
    pub async fn delete(&self, table: &str, id: i64) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {table} WHERE id = ?");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Binds a JSON body value with the closest SQLite type.
fn bind_value<'q>(query: SqliteQuery<'q>, value: &Value) -> SqliteQuery<'q> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        Value::String(s) => query.bind(s.clone()),
        Value::Array(_) | Value::Object(_) => query.bind(value.to_string()),
    }
}
