//! SQLite loading functionality.
//!
//! This module opens the climate database read-only behind a connection pool,
//! checks that the tables carry the columns the typed records expect, and
//! summarizes the dataset for logging and the heartbeat endpoint.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, SurfsUpError};
use crate::logging::log_dataset_stats;
use crate::records::{MEASUREMENT_COLUMNS, STATION_COLUMNS};
use crate::state::{AppState, DatasetSummary};

/// Open the database described by `config` and build the application state.
///
/// Fails if the file is missing, cannot be opened, or lacks the expected schema.
pub async fn load_database(config: Config) -> Result<AppState> {
    let start_time = Instant::now();
    let path = config.data.database_path.clone();
    let window_start = config.data.window_start()?;

    let pool = open_pool(&path, config.data.max_connections).await?;
    validate_schema(&pool).await?;

    let dataset = summarize(&pool, &path).await?;
    log_dataset_stats(&dataset, start_time.elapsed());

    Ok(AppState::new(config, pool, window_start, dataset))
}

/// Open a read-only pool over an existing SQLite file
pub async fn open_pool(path: &Path, max_connections: u32) -> Result<SqlitePool> {
    // Never let SQLite create an empty file in place of a missing one
    if !path.exists() {
        return Err(SurfsUpError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!(
        path = %path.display(),
        max_connections = max_connections,
        "Opened SQLite database"
    );

    Ok(pool)
}

/// Check that `station` and `measurement` exist with the columns the records need
pub async fn validate_schema(pool: &SqlitePool) -> Result<()> {
    check_table(pool, "station", STATION_COLUMNS).await?;
    check_table(pool, "measurement", MEASUREMENT_COLUMNS).await?;
    Ok(())
}

async fn check_table(pool: &SqlitePool, table: &str, required: &[&str]) -> Result<()> {
    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
        .bind(table)
        .fetch_all(pool)
        .await?;

    if columns.is_empty() {
        return Err(SurfsUpError::Schema {
            message: format!("Table {} not found", table),
        });
    }

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !columns.iter().any(|c| c.eq_ignore_ascii_case(name)))
        .collect();

    if !missing.is_empty() {
        return Err(SurfsUpError::Schema {
            message: format!(
                "Table {} is missing columns: {}",
                table,
                missing.join(", ")
            ),
        });
    }

    debug!(table = table, columns = ?columns, "Table schema validated");
    Ok(())
}

/// Gather row counts and the measurement date range
pub async fn summarize(pool: &SqlitePool, path: &Path) -> Result<DatasetSummary> {
    let station_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
        .fetch_one(pool)
        .await?;

    let (measurement_count, first_date, last_date): (i64, Option<String>, Option<String>) =
        sqlx::query_as("SELECT COUNT(*), MIN(date), MAX(date) FROM measurement")
            .fetch_one(pool)
            .await?;

    Ok(DatasetSummary {
        file_path: path.display().to_string(),
        station_count,
        measurement_count,
        first_date,
        last_date,
    })
}
