//! HTTP server setup.
//!
//! # Responsibilities
//! - Wire up middleware (tracing, request ID)
//! - Bind the router to a listener
//! - Drain in-flight requests on shutdown

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::http::request::with_request_layers;

/// A named axum server with graceful shutdown.
pub struct HttpServer {
    name: &'static str,
    router: Router,
}

impl HttpServer {
    /// Create a server for `router`, adding the shared middleware stack.
    pub fn new(name: &'static str, router: Router) -> Self {
        Self {
            name,
            router: with_request_layers(router),
        }
    }

    /// Run the server until `shutdown` fires (or its sender is dropped).
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let name = self.name;
        tracing::info!(service = name, address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!(service = name, "Shutdown signal received");
            })
            .await?;

        tracing::info!(service = name, "HTTP server stopped");
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
