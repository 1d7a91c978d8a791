//! API error types with HTTP response mapping.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cart::{CartError, QueueClosed};
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// The cart queue stopped running.
    Unavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unavailable(msg) => {
                tracing::error!(error = %msg, "cart unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<QueueClosed> for ApiError {
    fn from(err: QueueClosed) -> Self {
        ApiError::Unavailable(err.to_string())
    }
}

/// Errors that stop the host from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The catalog seed file could not be read.
    #[error("Cannot read catalog seed {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog seed file is not a json-server document.
    #[error("Invalid catalog seed {path}: {source}")]
    SeedFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The persisted cart could not be restored.
    #[error("Cannot open cart: {0}")]
    Cart(#[from] CartError),
}
