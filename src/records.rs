//! Typed rows of the `station` and `measurement` tables, and the aggregate
//! records computed from them.
//!
//! The column lists here are the schema this server expects; the loader
//! checks the database file against them before serving.

use serde::Serialize;
use sqlx::FromRow;

/// Columns the `station` table must provide
pub const STATION_COLUMNS: &[&str] = &["station", "name"];

/// Columns the `measurement` table must provide
pub const MEASUREMENT_COLUMNS: &[&str] = &["station", "date", "prcp", "tobs"];

/// A weather-observation site
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Station {
    /// Unique station code, e.g. `USC00519281`
    pub station: String,
    /// Human readable site name
    pub name: String,
}

/// One dated observation from a station
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Measurement {
    /// Code of the reporting station
    pub station: String,
    /// Observation date as stored, `YYYY-MM-DD`
    pub date: String,
    /// Precipitation, missing on some days
    pub prcp: Option<f64>,
    /// Observed temperature
    pub tobs: f64,
}

/// Min/avg/max temperature for a single date
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DailyTemperature {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Low Temp")]
    pub low_temp: Option<f64>,
    #[serde(rename = "Avg Temp")]
    pub avg_temp: Option<f64>,
    #[serde(rename = "High Temp")]
    pub high_temp: Option<f64>,
}

/// Min/avg/max temperature over a whole range; all `None` when the range is empty
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TemperatureSummary {
    #[serde(rename = "Low Temp")]
    pub low_temp: Option<f64>,
    #[serde(rename = "Avg Temp")]
    pub avg_temp: Option<f64>,
    #[serde(rename = "High Temp")]
    pub high_temp: Option<f64>,
}
