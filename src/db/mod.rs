use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config::Config;

pub mod tickets;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Opens the SQLite database named by `DATABASE_URL`, creating the file if it does not
/// exist yet.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database_max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;

    tracing::info!(url = %config.database_url, "Successfully connected to database");
    Ok(pool)
}

/// Creates or upgrades the schema from the embedded `migrations/` directory.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Migrations run successfully");
    Ok(())
}

/// Connects and migrates in one step; the storage handle every handler shares.
pub async fn initialize(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let pool = connect(config).await?;
    migrate(&pool).await?;
    Ok(pool)
}
