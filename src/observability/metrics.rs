//! Metrics collection and exposition.
//!
//! # Metrics
//! - `io_relay_requests_total` (counter): requests by service, route, status
//! - `io_relay_request_duration_seconds` (histogram): latency distribution
//! - `io_relay_upstream_errors_total` (counter): failed outbound calls by kind

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one served request.
pub fn record_request(service: &'static str, route: &str, status: u16, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    metrics::counter!(
        "io_relay_requests_total",
        "service" => service,
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "io_relay_request_duration_seconds",
        "service" => service,
        "route" => route.to_string()
    )
    .record(elapsed);
}

/// Record a failed outbound call.
pub fn record_upstream_error(kind: &'static str) {
    metrics::counter!("io_relay_upstream_errors_total", "kind" => kind).increment(1);
}
