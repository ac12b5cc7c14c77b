//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! The content store opens its pool through here on first use. Migrations
//! create the `site_config` table when absent, covering both first run and
//! upgrades from an older schema.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

fn db_max_connections() -> u32 {
    crate::config::env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS).max(1)
}

/// In-memory databases live and die with a single connection.
fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open the `SQLite` pool, creating the database file if needed, and run
/// migrations.
///
/// # Errors
///
/// Returns an error if the URL is malformed, the file cannot be opened, or
/// migrations fail.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = if is_memory_url(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(db_max_connections())
            .connect_with(options)
            .await?
    };

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}
