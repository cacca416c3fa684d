//! Temperature observation endpoint handler.

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
use crate::queries::station_temperatures;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/tobs";

/// Handle GET /api/v1.0/tobs requests: prior-year temperatures of the configured station
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let since = state.window_start_param();
    let station = state.tobs_station();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        station = station,
        since = %since,
        "Processing temperature observation request"
    );

    match station_temperatures(&state.pool, station, &since).await {
        Ok(temps) => {
            log_request_success(ENDPOINT, &request_id, start_time, temps.len());
            Json(temps).into_response()
        }
        Err(error) => {
            let params = format!("station={}, since={}", station, since);
            handle_request_error(error, ENDPOINT, &request_id, Some(&params))
        }
    }
}
