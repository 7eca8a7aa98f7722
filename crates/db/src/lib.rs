//! SQLite persistence for the city guide: pool setup, embedded migrations,
//! row models and repositories.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from a database URL.
///
/// Foreign-key enforcement is switched on for every connection. An in-memory
/// URL (`sqlite::memory:`) gets a single connection that is never recycled,
/// because each SQLite connection would otherwise see its own empty database.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
    } else {
        SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await
    }
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// How many places and events the directory currently lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DirectoryCounts {
    pub places: i64,
    pub events: i64,
}

/// Count places and events in one round trip.
pub async fn directory_counts(pool: &DbPool) -> Result<DirectoryCounts, sqlx::Error> {
    let (places, events): (i64, i64) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM places), (SELECT COUNT(*) FROM events)",
    )
    .fetch_one(pool)
    .await?;
    Ok(DirectoryCounts { places, events })
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await?;
    tracing::debug!("Migrations up to date");
    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
