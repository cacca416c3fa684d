//! Application state management for surfsup.
//!
//! This module defines the shared state that is passed to all handlers:
//! the connection pool, the resolved query window and a summary of the
//! dataset taken at startup.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::{Config, DATE_FORMAT};

/// Facts about the loaded SQLite file, gathered once at startup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Path of the database file
    pub file_path: String,
    /// Number of rows in `station`
    pub station_count: i64,
    /// Number of rows in `measurement`
    pub measurement_count: i64,
    /// Earliest measurement date, if any
    pub first_date: Option<String>,
    /// Latest measurement date, if any
    pub last_date: Option<String>,
}

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Read-only connection pool; each request checks out one connection
    pub pool: SqlitePool,
    /// First date of the prior-year window used by precipitation and tobs
    pub window_start: NaiveDate,
    /// Dataset facts
    pub dataset: DatasetSummary,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        config: Config,
        pool: SqlitePool,
        window_start: NaiveDate,
        dataset: DatasetSummary,
    ) -> Self {
        Self {
            config,
            pool,
            window_start,
            dataset,
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(
        config: Config,
        pool: SqlitePool,
        window_start: NaiveDate,
        dataset: DatasetSummary,
    ) -> Arc<Self> {
        Arc::new(Self::new(config, pool, window_start, dataset))
    }

    /// Window start in the text form stored in the `date` column
    pub fn window_start_param(&self) -> String {
        self.window_start.format(DATE_FORMAT).to_string()
    }

    /// Station reported by `/api/v1.0/tobs`
    pub fn tobs_station(&self) -> &str {
        &self.config.data.tobs_station
    }
}
