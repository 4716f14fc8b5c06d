//! API error types for the draftwise server.
//!
//! Maps core domain errors to HTTP status codes and JSON error responses:
//! request-shape problems are 400, knowledge-base problems are 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use draftwise_core::{AdvisorError, ConfigError};
use serde_json::json;

/// API error type for route handlers.
pub enum ApiError {
    /// Bad request payload or draft-state invariant violation.
    BadRequest(String),
    /// Knowledge-base loading or validation failure.
    Config(String),
    /// Any other unexpected failure.
    Internal(String),
}

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::Request(e) => Self::BadRequest(e.to_string()),
            AdvisorError::Config(e) => Self::Config(e.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Config(msg) => {
                tracing::error!("config error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            Self::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = axum::Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
