//! The slow backend.
//!
//! Every request on the configured path is held for a fixed delay and then
//! answered `200` with a constant payload. Method, headers and body are
//! ignored. The delay is an async sleep, so concurrent requests overlap.

pub mod handler;

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Bytes, routing::any, Router};

use crate::config::IoServiceConfig;

/// Service name used in logs and metric labels.
pub const SERVICE: &str = "io-service";

/// Shared, read-only handler state.
#[derive(Debug)]
pub struct IoState {
    pub path: String,
    pub delay: Duration,
    pub payload: Bytes,
}

/// Build the io-service router (without the shared middleware stack).
pub fn app(config: &IoServiceConfig) -> Router {
    let state = Arc::new(IoState {
        path: config.io.path.clone(),
        delay: Duration::from_millis(config.io.delay_ms),
        payload: Bytes::from(config.io.payload.clone()),
    });

    Router::new()
        .route(&config.io.path, any(handler::serve_io))
        .with_state(state)
}
