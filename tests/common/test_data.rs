//! Test data generation utilities.
//!
//! This module writes SQLite files with the same layout as the Hawaii
//! climate database and known observations for testing the surfsup server.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;

type Result<T> = std::result::Result<T, sqlx::Error>;

/// Station rows as (code, name)
pub const STATIONS: &[(&str, &str)] = &[
    ("USC00519397", "WAIKIKI 717.2, HI US"),
    ("USC00513117", "KANEOHE 838.1, HI US"),
    ("USC00519281", "WAIHEE 837.5, HI US"),
];

/// Measurement rows as (station, date, prcp, tobs)
pub const MEASUREMENTS: &[(&str, &str, Option<f64>, f64)] = &[
    // Before the prior-year window (2016-08-23 onwards)
    ("USC00519281", "2010-01-01", Some(0.15), 70.0),
    ("USC00519397", "2016-08-22", Some(0.40), 78.0),
    // Inside the window
    ("USC00519397", "2016-08-23", Some(0.00), 81.0),
    ("USC00513117", "2016-08-23", Some(0.15), 76.0),
    ("USC00519281", "2016-08-23", Some(1.79), 77.0),
    ("USC00519397", "2017-08-01", Some(0.00), 70.0),
    ("USC00519281", "2017-08-01", None, 74.0),
    ("USC00519281", "2017-08-02", Some(0.02), 78.0),
    ("USC00519281", "2017-08-20", Some(0.01), 80.0),
    ("USC00513117", "2017-08-20", None, 70.0),
    ("USC00519397", "2017-08-23", Some(0.00), 81.0),
];

/// Creates a climate database with [`STATIONS`] and [`MEASUREMENTS`].
pub async fn create_test_climate_db(path: &Path) -> Result<()> {
    create_climate_db(path, STATIONS, MEASUREMENTS).await
}

/// Creates a climate database with the given rows.
pub async fn create_climate_db(
    path: &Path,
    stations: &[(&str, &str)],
    measurements: &[(&str, &str, Option<f64>, f64)],
) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::query(
        "CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, \
         latitude FLOAT, longitude FLOAT, elevation FLOAT)",
    )
    .execute(&pool)
    .await?;
    sqlx::query(
        "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, \
         prcp FLOAT, tobs FLOAT)",
    )
    .execute(&pool)
    .await?;

    for (code, name) in stations {
        sqlx::query("INSERT INTO station (station, name) VALUES (?, ?)")
            .bind(*code)
            .bind(*name)
            .execute(&pool)
            .await?;
    }

    for (station, date, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(&pool)
            .await?;
    }

    pool.close().await;
    Ok(())
}

/// Creates a file whose `measurement` table lacks the `tobs` column.
pub async fn create_incomplete_db(path: &Path) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::query("CREATE TABLE station (station TEXT, name TEXT)")
        .execute(&pool)
        .await?;
    sqlx::query("CREATE TABLE measurement (station TEXT, date TEXT, prcp FLOAT)")
        .execute(&pool)
        .await?;

    pool.close().await;
    Ok(())
}
