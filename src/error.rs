//! Error types for the search flow.
//!
//! One `thiserror` enum covers everything that can go wrong between
//! parsing a request and handing results to the template, and its
//! `IntoResponse` impl defines how each failure reaches the HTTP
//! caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Failures surfaced by the search flow.
#[derive(Debug, Error)]
pub enum NewsError {
    /// Network-level failure reaching the upstream API (connection
    /// refused, timeout, DNS).
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream returned a non-success status with a body that is not
    /// a recognizable error envelope.
    #[error("upstream returned {status} with an unreadable error body")]
    Protocol { status: StatusCode },

    /// Upstream rejected the request with a decoded error envelope.
    #[error("upstream rejected the request ({code}): {message}")]
    Rejection {
        status: StatusCode,
        code: String,
        message: String,
    },

    /// Upstream reported success but the body did not match the
    /// expected shape.
    #[error("failed to decode upstream response: {0}")]
    Decode(#[source] reqwest::Error),

    /// The `page` query parameter was not an integer.
    #[error("invalid page parameter {0:?}")]
    InvalidPage(String),
}

impl IntoResponse for NewsError {
    /// Every failure collapses to a 500 for the caller, with no status
    /// distinction between bad input and upstream trouble. A decoded
    /// upstream rejection forwards the upstream message verbatim;
    /// everything else gets generic text.
    fn into_response(self) -> Response {
        error!("search request failed: {self}");
        let body = match self {
            NewsError::Rejection { message, .. } => message,
            NewsError::InvalidPage(_) => "Unexpected server error".to_string(),
            _ => "Internal server error".to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
