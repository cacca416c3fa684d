//! Heartbeat endpoint handler.
//!
//! Returns server status information: uptime, the dataset summary taken at
//! startup and whether the database still answers.

use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::warn;
use uuid::Uuid;

use crate::state::{AppState, DatasetSummary};

/// Server ID, unique per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: once_cell::sync::Lazy<SystemTime> = once_cell::sync::Lazy::new(SystemTime::now);

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Dataset information
    pub dataset: DatasetSummary,
    /// Open connections in the pool
    pub pool_size: u32,
    /// `healthy` when the database answers, `degraded` otherwise
    pub status: String,
}

/// Record the process start time. Called once at startup so uptime counts
/// from launch rather than from the first heartbeat.
pub fn mark_start() {
    once_cell::sync::Lazy::force(&START_TIME);
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    let status = if database_responds(&state.pool).await {
        "healthy"
    } else {
        "degraded"
    };

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        dataset: state.dataset.clone(),
        pool_size: state.pool.size(),
        status: status.to_string(),
    })
}

async fn database_responds(pool: &SqlitePool) -> bool {
    match sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(pool).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Heartbeat database check failed");
            false
        }
    }
}
