//! Route table for the surfsup API.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::handlers::{
    heartbeat_handler, precipitation_handler, stations_handler, temperature_from_handler,
    temperature_range_handler, tobs_handler, welcome_handler,
};
use crate::logging::create_http_trace_layer;
use crate::state::AppState;

/// Build the application router over shared state
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/temp/:start", get(temperature_from_handler))
        .route("/api/v1.0/temp/:start/:end", get(temperature_range_handler))
        .layer(
            ServiceBuilder::new()
                .layer(create_http_trace_layer())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::{measurement, seeded_state, station};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn test_router() -> (tempfile::TempDir, Router) {
        let (dir, state) = seeded_state(
            &[
                station("USC00519397", "WAIKIKI 717.2, HI US"),
                station("USC00519281", "WAIHEE 837.5, HI US"),
            ],
            &[
                measurement("USC00519281", "2016-08-22", Some(1.2), 75.0),
                measurement("USC00519281", "2017-08-20", Some(0.1), 80.0),
                measurement("USC00519397", "2017-08-20", None, 70.0),
                measurement("USC00519397", "2017-08-01", Some(0.0), 70.0),
                measurement("USC00519281", "2017-08-01", Some(0.3), 74.0),
                measurement("USC00519281", "2017-08-02", Some(0.0), 78.0),
            ],
        )
        .await;
        (dir, create_router(state))
    }

    #[tokio::test]
    async fn test_stations_route() {
        let (_dir, router) = test_router().await;
        let (status, json) = get_json(router, "/api/v1.0/stations").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!([
                "WAIKIKI 717.2, HI US",
                "USC00519397",
                "WAIHEE 837.5, HI US",
                "USC00519281"
            ])
        );
    }

    #[tokio::test]
    async fn test_tobs_route_only_reports_fixed_station() {
        let (_dir, router) = test_router().await;
        let (status, json) = get_json(router, "/api/v1.0/tobs").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!([74.0, 78.0, 80.0]));
    }

    #[tokio::test]
    async fn test_precipitation_route_excludes_older_rows() {
        let (_dir, router) = test_router().await;
        let (status, json) = get_json(router, "/api/v1.0/precipitation").await;

        assert_eq!(status, StatusCode::OK);
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert!(entries.iter().all(|e| e.get("2016-08-22").is_none()));
        assert_eq!(
            entries[0],
            serde_json::json!({"2017-08-01": 0.3, "Station": "USC00519281"})
        );
    }

    #[tokio::test]
    async fn test_temperature_range_route() {
        let (_dir, router) = test_router().await;
        let (status, json) = get_json(router, "/api/v1.0/temp/2017-08-01/2017-08-02").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!([
                {"Date": "2017-08-01", "Low Temp": 70.0, "Avg Temp": 72.0, "High Temp": 74.0},
                {"Date": "2017-08-02", "Low Temp": 78.0, "Avg Temp": 78.0, "High Temp": 78.0}
            ])
        );
    }

    #[tokio::test]
    async fn test_temperature_summary_route() {
        let (_dir, router) = test_router().await;
        let (status, json) = get_json(router, "/api/v1.0/temp/2017-08-20?group=none").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({"Low Temp": 70.0, "Avg Temp": 75.0, "High Temp": 80.0})
        );
    }

    #[tokio::test]
    async fn test_malformed_date_is_bad_request() {
        let (_dir, router) = test_router().await;
        let (status, json) = get_json(router, "/api/v1.0/temp/2017-02-30").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("start"));
        assert!(json["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_undecodable_parameters_get_json_errors() {
        for uri in [
            "/api/v1.0/temp/%FF",
            "/api/v1.0/temp/2017-08-01/%FF",
            "/api/v1.0/temp/2017-08-01?group=none&group=date",
        ] {
            let (_dir, router) = test_router().await;
            let (status, json) = get_json(router, uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(
                json["error"]
                    .as_str()
                    .unwrap()
                    .starts_with("Invalid parameter"),
                "{uri}: {json}"
            );
            assert!(json["request_id"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_welcome_route_is_text() {
        let (_dir, router) = test_router().await;
        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("Available Routes"));
    }
}
