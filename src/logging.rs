//! Logging utilities for the surfsup server.
//!
//! This module provides structured logging functionality to make logs more
//! searchable, analyzable, and useful for production deployments.

use std::time::{Duration, Instant};
use tracing::{error, info, warn, Level};

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use uuid::Uuid;

use crate::error::SurfsUpError;
use crate::state::DatasetSummary;

/// Creates the tracing layer for HTTP request/response logging
pub fn create_http_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    let response_formatter = DefaultOnResponse::new()
        .level(Level::DEBUG)
        .latency_unit(LatencyUnit::Micros);

    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(response_formatter)
}

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG`, when set, wins over the configured level.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log what was found in the database at startup
pub fn log_dataset_stats(dataset: &DatasetSummary, load_time: Duration) {
    info!(
        operation = "data_load",
        file_path = %dataset.file_path,
        station_count = dataset.station_count,
        measurement_count = dataset.measurement_count,
        first_date = dataset.first_date.as_deref().unwrap_or("none"),
        last_date = dataset.last_date.as_deref().unwrap_or("none"),
        duration_ms = load_time.as_secs_f64() * 1000.0,
        "Dataset loaded successfully"
    );

    if dataset.measurement_count == 0 {
        warn!(file_path = %dataset.file_path, "Measurement table is empty");
    }
}

/// Log the completion of a request together with how many rows it produced
pub fn log_request_success(endpoint: &str, request_id: &str, start_time: Instant, rows: usize) {
    info!(
        endpoint = endpoint,
        request_id = request_id,
        duration_us = start_time.elapsed().as_micros() as u64,
        rows = rows,
        "Request successful"
    );
}

/// Log an error that occurred during request processing
pub fn log_request_error(
    error: &SurfsUpError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) {
    if error.status_code().is_client_error() {
        warn!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            params = params.unwrap_or("none"),
            "Request rejected"
        );
    } else {
        error!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            params = params.unwrap_or("none"),
            error_type = ?error,
            "Request processing error"
        );
    }
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
