//! Database migration commands

use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use crate::config::Config;

/// Run all database migrations
#[tracing::instrument(skip(config))]
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    crate::db::migrate(&pool).await?;
    pool.close().await;

    Ok(())
}

/// Drop the database file if it exists and run migrations
#[tracing::instrument(skip(config))]
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    let options = SqliteConnectOptions::from_str(&config.database.url)?;
    let filename = options.get_filename();

    if filename.exists() {
        tokio::fs::remove_file(filename).await?;
        tracing::info!("Dropped database: {}", filename.display());
    }

    migrate(config).await
}
