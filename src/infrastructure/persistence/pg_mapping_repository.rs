//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Mapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// PostgreSQL repository for mapping storage and retrieval.
///
/// The table name is injected at construction, so statements are built once
/// with the quoted identifier and values are always bound as parameters.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
    table: String,
    insert_sql: String,
    find_sql: String,
}

impl PgMappingRepository {
    /// Creates a new repository over `table_name` with a database connection pool.
    pub fn new(pool: Arc<PgPool>, table_name: &str) -> Self {
        let table = quote_identifier(table_name);

        let insert_sql = format!(
            "INSERT INTO {table} (id, long_url, short_url, expiration_at) VALUES ($1, $2, $3, $4)"
        );
        let find_sql = format!(
            "SELECT id, long_url, short_url, expiration_at FROM {table} WHERE short_url = $1 LIMIT 1"
        );

        Self {
            pool,
            table,
            insert_sql,
            find_sql,
        }
    }

    /// Creates the mapping table and its unique index if they do not exist.
    ///
    /// The unique index on `short_url` turns an identifier collision into
    /// [`AppError::Conflict`] instead of a second row with the same short URL.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        let create_table = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id            TEXT        NOT NULL,
                long_url      TEXT        NOT NULL,
                short_url     TEXT        NOT NULL,
                expiration_at TIMESTAMPTZ NOT NULL
            )
            "#,
            table = self.table
        );
        sqlx::query(&create_table)
            .execute(self.pool.as_ref())
            .await?;

        let index = quote_identifier(&format!("{}_short_url_key", unquote(&self.table)));
        let create_index = format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {index} ON {table} (short_url)",
            table = self.table
        );
        sqlx::query(&create_index)
            .execute(self.pool.as_ref())
            .await?;

        tracing::debug!("Schema ready for table {}", self.table);
        Ok(())
    }

    /// Counts all stored mappings, expired ones included.
    pub async fn count(&self) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table);
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }

    /// Counts mappings that expired strictly before `now`.
    pub async fn count_expired_at(&self, now: DateTime<Utc>) -> Result<i64, AppError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE expiration_at < $1",
            self.table
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(now)
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, mapping: &Mapping) -> Result<(), AppError> {
        sqlx::query(&self.insert_sql)
            .bind(&mapping.id)
            .bind(&mapping.long_url)
            .bind(&mapping.short_url)
            .bind(mapping.expiration_at)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Mapping>, AppError> {
        let mapping = sqlx::query_as::<_, Mapping>(&self.find_sql)
            .bind(short_url)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(mapping)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}

/// Quotes a SQL identifier, doubling embedded quotes.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn unquote(quoted: &str) -> String {
    quoted[1..quoted.len() - 1].replace("\"\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("urls"), "\"urls\"");
        assert_eq!(quote_identifier("Url"), "\"Url\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_unquote_reverses_quote() {
        for name in ["urls", "Url", "a\"b"] {
            assert_eq!(unquote(&quote_identifier(name)), name);
        }
    }
}
