//! Two small HTTP services and a load driver.
//!
//! - `io_service`: holds each request for a fixed delay, then answers `ok`
//! - `api`: relays each call to io-service with a fixed deadline
//! - `bench`: drives staged concurrent traffic at the api and reports latency

// Services
pub mod api;
pub mod io_service;

// Shared plumbing
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

// Tooling
pub mod bench;

pub use config::{ApiConfig, IoServiceConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
