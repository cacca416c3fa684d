//! Error types for the surfsup application.
//!
//! One enum covers startup failures (missing file, bad schema, bad config)
//! and request failures (bad parameters, query errors).

use axum::http::StatusCode;
use thiserror::Error;

/// The main error type for surfsup operations.
#[derive(Error, Debug)]
pub enum SurfsUpError {
    /// SQLite / connection pool errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The database file does not have the expected tables or columns
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl SurfsUpError {
    /// Shorthand for a rejected request parameter.
    pub fn invalid_parameter(param: &str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }

    /// HTTP status a handler should answer with when this error reaches it.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to a client. Internal failures are not described.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidParameter { .. } => self.to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

/// Convenience type alias for Results with SurfsUpError
pub type Result<T> = std::result::Result<T, SurfsUpError>;
