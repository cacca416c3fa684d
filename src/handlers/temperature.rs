//! Temperature statistics endpoint handlers.
//!
//! `/api/v1.0/temp/<start>` covers every date on or after `start`;
//! `/api/v1.0/temp/<start>/<end>` covers `start..=end`. Statistics are per
//! date unless `?group=none` asks for a single summary of the whole range.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::handle_request_error;
use crate::error::{Result, SurfsUpError};
use crate::logging::{generate_request_id, log_request_success};
use crate::queries::{temperature_statistics, DateRange, Grouping, TemperatureStatistics};
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/temp";

/// Query parameters for the statistics endpoints
#[derive(Debug, Default, Deserialize)]
pub struct StatisticsQuery {
    /// `date` (default) for one record per date, `none` for a single summary
    pub group: Option<String>,
}

/// Raw parameters of one statistics request, before date validation
#[derive(Debug)]
struct StatisticsRequest {
    start: String,
    end: Option<String>,
    group: Option<String>,
}

type PathResult<T> = std::result::Result<Path<T>, PathRejection>;
type QueryResult = std::result::Result<Query<StatisticsQuery>, QueryRejection>;

/// Handle GET /api/v1.0/temp/{start} requests
pub async fn temperature_from_handler(
    State(state): State<Arc<AppState>>,
    path: PathResult<String>,
    query: QueryResult,
) -> Response {
    let request = path.map_err(path_error).and_then(|Path(start)| {
        Ok(StatisticsRequest {
            start,
            end: None,
            group: query.map_err(query_error)?.0.group,
        })
    });
    respond(&state, request).await
}

/// Handle GET /api/v1.0/temp/{start}/{end} requests
pub async fn temperature_range_handler(
    State(state): State<Arc<AppState>>,
    path: PathResult<(String, String)>,
    query: QueryResult,
) -> Response {
    let request = path.map_err(path_error).and_then(|Path((start, end))| {
        Ok(StatisticsRequest {
            start,
            end: Some(end),
            group: query.map_err(query_error)?.0.group,
        })
    });
    respond(&state, request).await
}

/// Path segments axum could not decode, e.g. invalid percent-encoded UTF-8
fn path_error(rejection: PathRejection) -> SurfsUpError {
    SurfsUpError::invalid_parameter("path", rejection.body_text())
}

/// Query strings axum could not deserialize, e.g. a repeated `group`
fn query_error(rejection: QueryRejection) -> SurfsUpError {
    SurfsUpError::invalid_parameter("query", rejection.body_text())
}

async fn respond(state: &AppState, request: Result<StatisticsRequest>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    let request = match request {
        Ok(request) => request,
        Err(error) => return handle_request_error(error, ENDPOINT, &request_id, None),
    };

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        start = %request.start,
        end = ?request.end,
        group = ?request.group,
        "Processing temperature statistics request"
    );

    let result = process_statistics_query(
        state,
        &request.start,
        request.end.as_deref(),
        request.group.as_deref(),
    )
    .await;

    match result {
        Ok(stats) => {
            log_request_success(ENDPOINT, &request_id, start_time, stats.len());
            Json(stats).into_response()
        }
        Err(error) => {
            let params = format!(
                "start={}, end={}, group={}",
                request.start,
                request.end.as_deref().unwrap_or("none"),
                request.group.as_deref().unwrap_or("date")
            );
            handle_request_error(error, ENDPOINT, &request_id, Some(&params))
        }
    }
}

/// Validate the parameters, then run the statistics query
async fn process_statistics_query(
    state: &AppState,
    start: &str,
    end: Option<&str>,
    group: Option<&str>,
) -> Result<TemperatureStatistics> {
    let range = DateRange::parse(start, end)?;
    let grouping = Grouping::parse(group)?;
    temperature_statistics(&state.pool, &range, grouping).await
}
