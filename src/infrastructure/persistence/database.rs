//! SQLite pool construction and schema migration.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

/// Connection settings for the backing store.
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Opens the pool, creating the database file if needed, and applies
/// pending migrations.
pub async fn connect(options: &DatabaseOptions) -> anyhow::Result<SqlitePool> {
    let mut connect_options = SqliteConnectOptions::from_str(&options.url)
        .with_context(|| format!("Invalid DATABASE_URL: {}", options.url))?
        .create_if_missing(true)
        .busy_timeout(options.busy_timeout);

    let max_connections = if is_in_memory(&options.url) {
        // Each in-memory connection is its own database.
        1
    } else {
        connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
        options.max_connections
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;

    migrate(&pool).await?;

    Ok(pool)
}

/// Applies embedded migrations from `migrations/`.
pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");
    Ok(())
}
