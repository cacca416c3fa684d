//! Station listing endpoint handler.
//!
//! Returns every station as alternating name/code entries in one flat array.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::handle_request_error;
use crate::logging::{generate_request_id, log_request_success};
use crate::queries::{flatten_stations, list_stations};
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/stations";

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(endpoint = ENDPOINT, request_id = %request_id, "Processing stations request");

    match list_stations(&state.pool).await {
        Ok(stations) => {
            log_request_success(ENDPOINT, &request_id, start_time, stations.len());
            Json(flatten_stations(stations)).into_response()
        }
        Err(error) => handle_request_error(error, ENDPOINT, &request_id, None),
    }
}
