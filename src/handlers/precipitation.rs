//! Precipitation endpoint handler.
//!
//! Returns one `{"<date>": prcp, "Station": code}` object per measurement in
//! the prior-year window, so readings from different stations on the same day
//! are all kept.

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
use crate::queries::precipitation_since;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/precipitation";

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let since = state.window_start_param();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        since = %since,
        "Processing precipitation request"
    );

    match precipitation_since(&state.pool, &since).await {
        Ok(entries) => {
            log_request_success(ENDPOINT, &request_id, start_time, entries.len());
            Json(entries).into_response()
        }
        Err(error) => {
            let params = format!("since={}", since);
            handle_request_error(error, ENDPOINT, &request_id, Some(&params))
        }
    }
}
