//! HTTP client utilities for testing.
//!
//! Wraps reqwest with the conventions of the surfsup API: JSON bodies on
//! every API route, and `{"error", "request_id"}` bodies on failures.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

/// Default timeout for HTTP requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Make a GET request to the surfsup server.
///
/// `path` is sent as written, so percent-encoded segments reach the router
/// untouched.
pub async fn get(addr: &SocketAddr, path: &str) -> Result<Response, Box<dyn Error>> {
    let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
    Ok(client.get(format!("http://{}{}", addr, path)).send().await?)
}

/// Make a GET request and parse the JSON response, requiring 200 OK
pub async fn get_json<T: DeserializeOwned>(
    addr: &SocketAddr,
    path: &str,
) -> Result<T, Box<dyn Error>> {
    let (status, body) = get_status_and_json(addr, path).await?;

    if status != StatusCode::OK {
        return Err(format!("Unexpected status code: {}, body: {}", status, body).into());
    }

    Ok(serde_json::from_value(body)?)
}

/// Make a GET request and return the status with the parsed JSON body,
/// whatever the status is.
pub async fn get_status_and_json(
    addr: &SocketAddr,
    path: &str,
) -> Result<(StatusCode, Value), Box<dyn Error>> {
    let response = get(addr, path).await?;
    let status = response.status();
    let text = response.text().await?;
    let body = serde_json::from_str(&text)
        .map_err(|e| format!("{} returned non-JSON body ({}): {:?}", path, e, text))?;
    Ok((status, body))
}

/// Make a GET request that must be rejected as a bad request, returning the
/// error message.
///
/// # Panics
///
/// Panics unless the response is a 400 carrying a string `error` and a
/// string `request_id`.
pub async fn get_bad_request(addr: &SocketAddr, path: &str) -> String {
    let (status, body) = get_status_and_json(addr, path)
        .await
        .unwrap_or_else(|e| panic!("{}: {}", path, e));

    assert_eq!(status, StatusCode::BAD_REQUEST, "{} should be rejected", path);
    assert!(body["request_id"].is_string(), "{}: {}", path, body);
    body["error"]
        .as_str()
        .unwrap_or_else(|| panic!("{}: no error message in {}", path, body))
        .to_string()
}
