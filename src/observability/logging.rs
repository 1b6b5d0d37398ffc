//! Structured logging.
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over the configured level
//! - JSON format for production, plain format for development

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, ObservabilityConfig};

/// Targets of the binaries; each bin is its own crate.
const BIN_TARGETS: [&str; 3] = ["api", "io_service", "loadgen"];

/// Filter used when `RUST_LOG` is unset.
pub fn default_directives(level: &str) -> String {
    let mut directives = vec![format!("io_relay={level}")];
    directives.extend(BIN_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.push(format!("tower_http={level}"));
    directives.join(",")
}

/// Install the global subscriber. Call once per process.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(&config.log_level).into());

    let fmt_layer = match config.log_format {
        LogFormat::Plain => tracing_subscriber::fmt::layer().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    use tracing::Level;

    #[test]
    fn directives_cover_crate_bins_and_http_layer() {
        assert_eq!(
            default_directives("debug"),
            "io_relay=debug,api=debug,io_service=debug,loadgen=debug,tower_http=debug"
        );
    }

    #[test]
    fn default_filter_enables_binary_targets() {
        let subscriber =
            tracing_subscriber::registry().with(EnvFilter::new(default_directives("info")));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "api", Level::INFO));
            assert!(tracing::enabled!(target: "io_service", Level::INFO));
            assert!(tracing::enabled!(target: "loadgen", Level::INFO));
            assert!(tracing::enabled!(target: "io_relay::http::server", Level::INFO));
            assert!(!tracing::enabled!(target: "api", Level::DEBUG));
        });
    }
}
