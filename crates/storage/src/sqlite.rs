//! SQLite uniqueness lookup.
//!
//! Only available with the `sqlite` feature.

#![cfg(feature = "sqlite")]

use async_trait::async_trait;
use sqlx::SqlitePool;
use validata::capability::UniquenessLookup;
use validata::foundation::LookupError;

use crate::check_identifiers;

/// `unique` backed by a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteUniqueness {
    pool: SqlitePool,
}

impl SqliteUniqueness {
    /// Wraps an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UniquenessLookup for SqliteUniqueness {
    async fn exists(&self, table: &str, column: &str, value: &str) -> Result<bool, LookupError> {
        check_identifiers(table, column)?;
        let query = format!("SELECT 1 FROM {table} WHERE CAST({column} AS TEXT) = ?1 LIMIT 1");

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(table, column, error = %e, "sqlite uniqueness lookup failed");
                LookupError::backend(e)
            })?;

        Ok(row.is_some())
    }
}
