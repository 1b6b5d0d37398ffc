//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Metrics exporter starts before the listener binds
//! - Listeners start last (traffic only when ready)

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::{ListenerConfig, ObservabilityConfig};
use crate::observability::metrics;

/// Bind the service listener.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, std::io::Error> {
    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listener bound");
    Ok(listener)
}

/// Start the Prometheus exporter when enabled.
pub fn start_metrics(config: &ObservabilityConfig) -> Result<(), Box<dyn std::error::Error>> {
    if !config.metrics_enabled {
        return Ok(());
    }
    let addr: SocketAddr = config.metrics_address.parse()?;
    metrics::init_metrics(addr)?;
    Ok(())
}
