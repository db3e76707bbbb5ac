//! # validata-storage
//!
//! [`UniquenessLookup`](validata::capability::UniquenessLookup) backends for
//! the `unique:table.column` rule.
//!
//! - [`MemoryUniqueness`]: a process-local set of taken values, for tests and
//!   small deployments.
//! - `PgUniqueness` (feature `postgres`): `SELECT 1 ... LIMIT 1` against a
//!   Postgres pool.
//! - `MySqlUniqueness` (feature `mysql`): the same query with backtick-quoted
//!   names and a `CAST(... AS CHAR)` comparison.
//! - `SqliteUniqueness` (feature `sqlite`): the same query against SQLite.
//!
//! Table and column names come from rule text, so every backend rejects
//! anything that is not a plain SQL identifier before it builds a query.

#![warn(missing_docs)]

mod memory;
#[cfg(feature = "mysql")]
mod mysql;
#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryUniqueness;
#[cfg(feature = "mysql")]
pub use mysql::MySqlUniqueness;
#[cfg(feature = "postgres")]
pub use postgres::{PgUniqueness, PgUniquenessConfig};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteUniqueness;

use validata::capability::is_sql_identifier;
use validata::foundation::LookupError;

/// Fails with [`LookupError::InvalidIdentifier`] unless both names are plain
/// SQL identifiers.
pub(crate) fn check_identifiers(table: &str, column: &str) -> Result<(), LookupError> {
    for ident in [table, column] {
        if !is_sql_identifier(ident) {
            tracing::warn!(identifier = ident, "rejected uniqueness identifier");
            return Err(LookupError::InvalidIdentifier(ident.to_owned()));
        }
    }
    Ok(())
}
