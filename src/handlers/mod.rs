//! HTTP request handlers for the surfsup API.
//!
//! This module contains all the endpoint handlers for the web server.

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::error::SurfsUpError;
use crate::logging::log_request_error;

pub mod heartbeat;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;
pub mod welcome;

pub use heartbeat::heartbeat_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use temperature::{temperature_from_handler, temperature_range_handler};
pub use tobs::tobs_handler;
pub use welcome::welcome_handler;

/// Log a failed request and turn it into a JSON error response
pub(crate) fn handle_request_error(
    error: SurfsUpError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);

    (
        error.status_code(),
        Json(serde_json::json!({
            "error": error.public_message(),
            "request_id": request_id
        })),
    )
        .into_response()
}
