//! Command-line arguments for the two services.
//!
//! CLI arguments take precedence over config file values. Without a file
//! or flags the services run with the built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{load_config, validate, ConfigError};
use crate::config::schema::{ApiConfig, IoServiceConfig};

/// Command-line arguments for io-service.
#[derive(Parser, Debug, Default)]
#[command(name = "io-service")]
#[command(about = "Answers every request after a fixed delay", long_about = None)]
pub struct IoServiceArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind to (e.g., 0.0.0.0:8080)
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Delay before answering, in milliseconds
    #[arg(short = 'd', long)]
    pub delay_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl IoServiceArgs {
    /// Load the file (if any), apply overrides, validate.
    pub fn into_config(self) -> Result<IoServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => IoServiceConfig::default(),
        };

        if let Some(listen) = self.listen {
            config.listener.bind_address = listen;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.io.delay_ms = delay_ms;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate(&config)?;
        Ok(config)
    }
}

/// Command-line arguments for api.
#[derive(Parser, Debug, Default)]
#[command(name = "api")]
#[command(about = "Relays each call to io-service", long_about = None)]
pub struct ApiArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind to (e.g., 0.0.0.0:8081)
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// io-service URL (e.g., http://io-service:8080/io)
    #[arg(short = 'u', long)]
    pub upstream: Option<String>,

    /// Outbound call deadline, in milliseconds
    #[arg(short = 't', long)]
    pub timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl ApiArgs {
    /// Load the file (if any), apply overrides, validate.
    pub fn into_config(self) -> Result<ApiConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ApiConfig::default(),
        };

        if let Some(listen) = self.listen {
            config.listener.bind_address = listen;
        }
        if let Some(url) = self.upstream {
            config.upstream.url = url;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.upstream.timeout_ms = timeout_ms;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_defaults() {
        let config = IoServiceArgs::parse_from(["io-service"]).into_config().unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.io.delay_ms, 1000);
    }

    #[test]
    fn flags_override_defaults() {
        let config = ApiArgs::parse_from([
            "api",
            "--listen",
            "127.0.0.1:9001",
            "--upstream",
            "http://127.0.0.1:9000/io",
            "-t",
            "250",
        ])
        .into_config()
        .unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9001");
        assert_eq!(config.upstream.url, "http://127.0.0.1:9000/io");
        assert_eq!(config.upstream.timeout_ms, 250);
    }

    #[test]
    fn overrides_are_validated() {
        let result = ApiArgs::parse_from(["api", "--timeout-ms", "0"]).into_config();
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let result = IoServiceArgs::parse_from(["io-service", "-l", "nowhere"]).into_config();
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
