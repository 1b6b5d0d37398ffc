//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::validation::{Validate, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML document without validating it.
pub fn parse_config<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load a TOML file. Validation is left to the caller so CLI overrides can
/// be applied first.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Run semantic checks, collapsing the error list into a `ConfigError`.
pub fn validate<T: Validate>(config: &T) -> Result<(), ConfigError> {
    config.validate().map_err(ConfigError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ApiConfig, IoServiceConfig, LogFormat};

    #[test]
    fn empty_file_yields_defaults() {
        let config: ApiConfig = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");
        assert_eq!(config.routes.call_path, "/call");
        assert_eq!(config.upstream.url, "http://io-service:8080/io");
        assert_eq!(config.upstream.timeout_ms, 2000);

        let config: IoServiceConfig = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.io.delay_ms, 1000);
        assert_eq!(config.io.payload, "ok");
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config: ApiConfig = parse_config(
            r#"
            [upstream]
            timeout_ms = 500

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.upstream.timeout_ms, 500);
        assert_eq!(config.upstream.url, "http://io-service:8080/io");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn empty_api_tables_keep_api_defaults() {
        let config: ApiConfig = parse_config("[listener]\n[observability]\n").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");
        assert_eq!(config.observability.metrics_address, "0.0.0.0:9091");

        let config: ApiConfig = parse_config(
            r#"
            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.metrics_address, "0.0.0.0:9091");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");
    }

    #[test]
    fn services_default_to_distinct_ports() {
        let api: ApiConfig = parse_config("").unwrap();
        let io: IoServiceConfig = parse_config("[listener]\n[observability]\n").unwrap();
        assert_eq!(io.listener.bind_address, "0.0.0.0:8080");
        assert_ne!(api.listener.bind_address, io.listener.bind_address);
        assert_ne!(
            api.observability.metrics_address,
            io.observability.metrics_address
        );
    }

    #[test]
    fn shipped_files_match_defaults() {
        let api: ApiConfig = parse_config(include_str!("../../config/api.toml")).unwrap();
        validate(&api).unwrap();
        assert_eq!(api.upstream.url, ApiConfig::default().upstream.url);
        assert_eq!(
            api.observability.metrics_address,
            ApiConfig::default().observability.metrics_address
        );

        let io: IoServiceConfig =
            parse_config(include_str!("../../config/io-service.toml")).unwrap();
        validate(&io).unwrap();
        assert_eq!(io.io.delay_ms, IoServiceConfig::default().io.delay_ms);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result: Result<IoServiceConfig, _> = parse_config("[io\ndelay_ms = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result: Result<IoServiceConfig, _> =
            load_config(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn validation_errors_are_joined() {
        let mut config = IoServiceConfig::default();
        config.io.path = "io".into();
        config.listener.bind_address = "x".into();
        let message = validate(&config).unwrap_err().to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("io.path"));
        assert!(message.contains("listener.bind_address"));
    }
}
