//! Query/response mapping for the climate endpoints.
//!
//! Every operation runs exactly one parameterized query against the pool and
//! reshapes the rows into the structure the endpoint serializes. Dates are
//! always bound in their canonical `YYYY-MM-DD` form, which sorts the same way
//! as the text stored in `measurement.date`.

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use sqlx::SqlitePool;

use crate::config::DATE_FORMAT;
use crate::error::{Result, SurfsUpError};
use crate::records::{DailyTemperature, Measurement, Station, TemperatureSummary};

const STATIONS_SQL: &str = "SELECT station, name FROM station";

const PRECIPITATION_SQL: &str = "SELECT station, date, prcp, tobs FROM measurement \
     WHERE date >= ? ORDER BY date, station";

const OBSERVATIONS_SQL: &str = "SELECT station, date, prcp, tobs FROM measurement \
     WHERE station = ? AND date >= ? ORDER BY date";

const DAILY_FROM_SQL: &str = "SELECT date, MIN(tobs) AS low_temp, AVG(tobs) AS avg_temp, \
     MAX(tobs) AS high_temp FROM measurement WHERE date >= ? GROUP BY date ORDER BY date";

const DAILY_RANGE_SQL: &str = "SELECT date, MIN(tobs) AS low_temp, AVG(tobs) AS avg_temp, \
     MAX(tobs) AS high_temp FROM measurement WHERE date >= ? AND date <= ? \
     GROUP BY date ORDER BY date";

const SUMMARY_FROM_SQL: &str = "SELECT MIN(tobs) AS low_temp, AVG(tobs) AS avg_temp, \
     MAX(tobs) AS high_temp FROM measurement WHERE date >= ?";

const SUMMARY_RANGE_SQL: &str = "SELECT MIN(tobs) AS low_temp, AVG(tobs) AS avg_temp, \
     MAX(tobs) AS high_temp FROM measurement WHERE date >= ? AND date <= ?";

/// Inclusive date filter for the statistics endpoint.
///
/// Without an end the range is open: every date on or after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Parse path parameters, rejecting malformed dates and reversed ranges
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self> {
        let start = parse_date("start", start)?;
        let end = end.map(|end| parse_date("end", end)).transpose()?;

        if let Some(end) = end {
            if end < start {
                return Err(SurfsUpError::invalid_parameter(
                    "end",
                    format!(
                        "End date {} is before start date {}",
                        end.format(DATE_FORMAT),
                        start.format(DATE_FORMAT)
                    ),
                ));
            }
        }

        Ok(Self { start, end })
    }

    fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    fn end_param(&self) -> Option<String> {
        self.end.map(|end| end.format(DATE_FORMAT).to_string())
    }
}

fn parse_date(param: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        SurfsUpError::invalid_parameter(
            param,
            format!("'{}' is not a valid date (expected YYYY-MM-DD): {}", value, e),
        )
    })
}

/// Whether temperature statistics are reported per date or once for the range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    #[default]
    Daily,
    Overall,
}

impl Grouping {
    /// Parse the `group` query parameter (`date` or `none`)
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim) {
            None | Some("") | Some("date") => Ok(Self::Daily),
            Some("none") => Ok(Self::Overall),
            Some(other) => Err(SurfsUpError::invalid_parameter(
                "group",
                format!("Unsupported grouping: {}. Must be one of: date, none", other),
            )),
        }
    }
}

/// Result of a statistics query; serializes as an array or a single object
#[derive(Debug, Clone, PartialEq)]
pub enum TemperatureStatistics {
    Daily(Vec<DailyTemperature>),
    Overall(TemperatureSummary),
}

impl TemperatureStatistics {
    /// Number of records the response carries
    pub fn len(&self) -> usize {
        match self {
            Self::Daily(days) => days.len(),
            Self::Overall(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for TemperatureStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Daily(days) => days.serialize(serializer),
            Self::Overall(summary) => summary.serialize(serializer),
        }
    }
}

/// One precipitation reading, serialized as `{"<date>": prcp, "Station": "<code>"}`
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationEntry {
    pub date: String,
    pub prcp: Option<f64>,
    pub station: String,
}

impl From<Measurement> for PrecipitationEntry {
    fn from(m: Measurement) -> Self {
        Self {
            date: m.date,
            prcp: m.prcp,
            station: m.station,
        }
    }
}

impl Serialize for PrecipitationEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(&self.date, &self.prcp)?;
        map.serialize_entry("Station", &self.station)?;
        map.end()
    }
}

/// All stations in store order
pub async fn list_stations(pool: &SqlitePool) -> Result<Vec<Station>> {
    let stations = sqlx::query_as::<_, Station>(STATIONS_SQL)
        .fetch_all(pool)
        .await?;
    Ok(stations)
}

/// Flatten stations into `[name, code, name, code, ...]`
pub fn flatten_stations(stations: Vec<Station>) -> Vec<String> {
    stations
        .into_iter()
        .flat_map(|s| [s.name, s.station])
        .collect()
}

/// Every measurement on or after `since`, one entry per row
pub async fn precipitation_since(
    pool: &SqlitePool,
    since: &str,
) -> Result<Vec<PrecipitationEntry>> {
    let rows = sqlx::query_as::<_, Measurement>(PRECIPITATION_SQL)
        .bind(since)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(PrecipitationEntry::from).collect())
}

/// Temperatures observed at one station on or after `since`, in date order
pub async fn station_temperatures(
    pool: &SqlitePool,
    station: &str,
    since: &str,
) -> Result<Vec<f64>> {
    let rows = sqlx::query_as::<_, Measurement>(OBSERVATIONS_SQL)
        .bind(station)
        .bind(since)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|m| m.tobs).collect())
}

/// Min/avg/max of `tobs` over `range`, per date or overall
pub async fn temperature_statistics(
    pool: &SqlitePool,
    range: &DateRange,
    grouping: Grouping,
) -> Result<TemperatureStatistics> {
    let start = range.start_param();
    let end = range.end_param();

    match grouping {
        Grouping::Daily => {
            let query = match &end {
                Some(end) => sqlx::query_as::<_, DailyTemperature>(DAILY_RANGE_SQL)
                    .bind(start)
                    .bind(end.clone()),
                None => sqlx::query_as::<_, DailyTemperature>(DAILY_FROM_SQL).bind(start),
            };
            Ok(TemperatureStatistics::Daily(query.fetch_all(pool).await?))
        }
        Grouping::Overall => {
            // An aggregate without GROUP BY always yields one row, NULLs when empty
            let query = match &end {
                Some(end) => sqlx::query_as::<_, TemperatureSummary>(SUMMARY_RANGE_SQL)
                    .bind(start)
                    .bind(end.clone()),
                None => sqlx::query_as::<_, TemperatureSummary>(SUMMARY_FROM_SQL).bind(start),
            };
            Ok(TemperatureStatistics::Overall(query.fetch_one(pool).await?))
        }
    }
}
