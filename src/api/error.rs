//! Outbound call failures.
//!
//! On the wire every variant collapses to the same thing: `500` with the
//! error text as a plain-text body.

use std::time::Duration;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors from a single call to io-service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection refused, DNS failure, reset, protocol error.
    #[error("GET {url}: {message}")]
    Transport { url: String, message: String },

    /// No response head before the deadline.
    #[error("GET {url}: timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// The outbound request could not be built.
    #[error("GET {url}: invalid request: {message}")]
    Request { url: String, message: String },
}

impl UpstreamError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Transport { .. } => "transport",
            UpstreamError::Timeout { .. } => "timeout",
            UpstreamError::Request { .. } => "request",
        }
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Render an error with its whole `source()` chain, `outer: inner: ...`.
pub fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
