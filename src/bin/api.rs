//! api: relays every request on `/call` to io-service.

use clap::Parser;

use io_relay::config::ApiArgs;
use io_relay::lifecycle::{signals, startup};
use io_relay::{api, observability, HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiArgs::parse().into_config()?;
    observability::logging::init(&config.observability);

    tracing::info!("api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        call_path = %config.routes.call_path,
        upstream = %config.upstream.url,
        timeout_ms = config.upstream.timeout_ms,
        "Configuration loaded"
    );

    startup::start_metrics(&config.observability)?;
    let router = api::app(&config)?;
    let listener = startup::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    HttpServer::new(api::SERVICE, router)
        .run(listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
