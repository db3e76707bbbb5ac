//! Postgres uniqueness lookup.
//!
//! Only available with the `postgres` feature.

#![cfg(feature = "postgres")]

use async_trait::async_trait;
use sqlx::PgPool;
use validata::capability::{UniquenessLookup, is_sql_identifier};
use validata::foundation::LookupError;

use crate::check_identifiers;

/// Lookup settings.
#[derive(Debug, Clone)]
pub struct PgUniquenessConfig {
    /// Schema the rule's tables live in.
    pub schema: String,
    /// Compare case-insensitively (`lower(col) = lower($1)`).
    pub case_insensitive: bool,
}

impl Default for PgUniquenessConfig {
    fn default() -> Self {
        Self {
            schema: "public".to_string(),
            case_insensitive: false,
        }
    }
}

/// `unique` backed by a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgUniqueness {
    pool: PgPool,
    config: PgUniquenessConfig,
}

impl PgUniqueness {
    /// Lookup with explicit settings.
    ///
    /// Fails if the configured schema is not a plain identifier.
    pub fn new(pool: PgPool, config: PgUniquenessConfig) -> Result<Self, LookupError> {
        if !is_sql_identifier(&config.schema) {
            return Err(LookupError::InvalidIdentifier(config.schema));
        }
        Ok(Self { pool, config })
    }

    /// Lookup over the `public` schema.
    pub fn with_pool(pool: PgPool) -> Self {
        Self {
            pool,
            config: PgUniquenessConfig::default(),
        }
    }

    fn query(&self, table: &str, column: &str) -> String {
        let schema = &self.config.schema;
        if self.config.case_insensitive {
            format!("SELECT 1 FROM {schema}.{table} WHERE lower({column}::text) = lower($1) LIMIT 1")
        } else {
            format!("SELECT 1 FROM {schema}.{table} WHERE {column}::text = $1 LIMIT 1")
        }
    }
}

#[async_trait]
impl UniquenessLookup for PgUniqueness {
    async fn exists(&self, table: &str, column: &str, value: &str) -> Result<bool, LookupError> {
        check_identifiers(table, column)?;
        let query = self.query(table, column);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(table, column, error = %e, "postgres uniqueness lookup failed");
                LookupError::backend(e)
            })?;

        Ok(row.is_some())
    }
}
