//! The relaying front service.
//!
//! # Data Flow
//! ```text
//! client ──▶ handler.rs ──▶ client.rs (GET upstream, fixed deadline)
//!                 │                │
//!                 │     Ok: body ──┘ ──▶ 200 + body (or {"result": body})
//!                 └──── Err ─────────▶ error.rs ──▶ 500 + error text
//! ```
//!
//! # Design Decisions
//! - No retries; one outbound call per inbound request
//! - The upstream client is built once and shared read-only

pub mod client;
pub mod error;
pub mod handler;

use std::sync::Arc;

use axum::{routing::any, Router};

use crate::config::{ApiConfig, ConfigError};
use self::client::UpstreamClient;

pub use self::error::UpstreamError;
pub use self::handler::CallResult;

/// Service name used in logs and metric labels.
pub const SERVICE: &str = "api";

/// Shared, read-only handler state.
pub struct ApiState {
    pub upstream: UpstreamClient,
    pub call_path: String,
    pub json_call_path: Option<String>,
}

/// Build the api router (without the shared middleware stack).
pub fn app(config: &ApiConfig) -> Result<Router, ConfigError> {
    let upstream = UpstreamClient::from_config(&config.upstream)?;
    let state = Arc::new(ApiState {
        upstream,
        call_path: config.routes.call_path.clone(),
        json_call_path: config.routes.json_call_path.clone(),
    });

    let mut router = Router::new().route(&config.routes.call_path, any(handler::call));
    if let Some(path) = &config.routes.json_call_path {
        router = router.route(path, any(handler::call_json));
    }
    Ok(router.with_state(state))
}
