//! SQLite backend against an in-memory database.

#![cfg(feature = "sqlite")]

use sqlx::sqlite::SqlitePoolOptions;
use validata::capability::UniquenessLookup;
use validata::foundation::LookupError;
use validata_storage::SqliteUniqueness;

async fn lookup() -> SqliteUniqueness {
    // One connection: every `:memory:` connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::query("CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO users (email) VALUES ('kofi@mail.gh')")
        .execute(&pool)
        .await
        .unwrap();
    SqliteUniqueness::new(pool)
}

#[tokio::test]
async fn finds_existing_rows() {
    let lookup = lookup().await;
    assert!(lookup.exists("users", "email", "kofi@mail.gh").await.unwrap());
    assert!(!lookup.exists("users", "email", "ama@mail.gh").await.unwrap());
    assert!(lookup.exists("users", "id", "1").await.unwrap());
}

#[tokio::test]
async fn missing_table_is_a_backend_error() {
    let err = lookup().await.exists("ghosts", "email", "x").await.unwrap_err();
    assert!(matches!(err, LookupError::Backend(_)));
}

#[tokio::test]
async fn identifiers_are_checked_first() {
    let err = lookup()
        .await
        .exists("users", "email; DROP TABLE users", "x")
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::InvalidIdentifier(_)));
}
