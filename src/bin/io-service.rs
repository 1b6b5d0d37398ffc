//! io-service: answers every request on `/io` with `ok` after one second.

use clap::Parser;

use io_relay::config::IoServiceArgs;
use io_relay::lifecycle::{signals, startup};
use io_relay::{io_service, observability, HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = IoServiceArgs::parse().into_config()?;
    observability::logging::init(&config.observability);

    tracing::info!("io-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        path = %config.io.path,
        delay_ms = config.io.delay_ms,
        "Configuration loaded"
    );

    startup::start_metrics(&config.observability)?;
    let listener = startup::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    HttpServer::new(io_service::SERVICE, io_service::app(&config))
        .run(listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
