//! # surfsup
//!
//! A small, read-only HTTP API serving Hawaiian climate observations.
//!
//! The data lives in a SQLite file with two tables: `station` (code, name)
//! and `measurement` (station, date, precipitation, observed temperature).
//! Every endpoint runs one parameterized query and returns the reshaped rows
//! as JSON.
//!
//! ## Architecture
//!
//! - **Data Layer**: opens the file read-only behind a connection pool and
//!   validates its schema at startup
//! - **Query Layer**: maps each endpoint to a single query and response shape
//! - **API Layer**: axum handlers with structured request logging

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod queries;
pub mod records;
pub mod router;
pub mod state;

pub use config::Config;
pub use db::load_database;
pub use error::{Result, SurfsUpError};
pub use logging::{create_http_trace_layer, generate_request_id, init_tracing};
pub use records::{DailyTemperature, Measurement, Station, TemperatureSummary};
pub use router::create_router;
pub use state::{AppState, DatasetSummary};
