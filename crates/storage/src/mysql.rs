//! MySQL uniqueness lookup.
//!
//! Only available with the `mysql` feature.

#![cfg(feature = "mysql")]

use async_trait::async_trait;
use sqlx::MySqlPool;
use validata::capability::UniquenessLookup;
use validata::foundation::LookupError;

use crate::check_identifiers;

/// `unique` backed by a MySQL pool.
///
/// The column is compared as `CHAR`, so numeric columns match their
/// decimal text.
#[derive(Debug, Clone)]
pub struct MySqlUniqueness {
    pool: MySqlPool,
}

impl MySqlUniqueness {
    /// Wraps an existing pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn query(table: &str, column: &str) -> String {
        format!("SELECT 1 FROM `{table}` WHERE CAST(`{column}` AS CHAR) = ? LIMIT 1")
    }
}

#[async_trait]
impl UniquenessLookup for MySqlUniqueness {
    async fn exists(&self, table: &str, column: &str, value: &str) -> Result<bool, LookupError> {
        check_identifiers(table, column)?;
        let query = Self::query(table, column);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(table, column, error = %e, "mysql uniqueness lookup failed");
                LookupError::backend(e)
            })?;

        Ok(row.is_some())
    }
}
