//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the upstream URL is something the plain-HTTP client can reach
//! - Detect conflicting api paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function of the config
//! - Runs before anything binds

use std::net::SocketAddr;

use axum::http::Uri;
use thiserror::Error;

use crate::config::schema::{
    ApiConfig, IoServiceConfig, ListenerConfig, ObservabilityConfig, UpstreamConfig,
};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: `{value}` is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: `{value}` must start with '/'")]
    InvalidPath { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("upstream.url: `{value}` is not a valid URL ({reason})")]
    InvalidUrl { value: String, reason: String },

    #[error("upstream.url: scheme `{scheme}` is not supported, use http")]
    UnsupportedScheme { scheme: String },

    #[error("routes: `{path}` is used by more than one endpoint")]
    DuplicatePath { path: String },
}

/// Implemented by every root config.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}

impl Validate for IoServiceConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        check_listener(&self.listener, &mut errors);
        check_path("io.path", &self.io.path, &mut errors);
        check_observability(&self.observability, &mut errors);
        finish(errors)
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        check_listener(&self.listener, &mut errors);
        check_path("routes.call_path", &self.routes.call_path, &mut errors);
        if let Some(json_path) = &self.routes.json_call_path {
            check_path("routes.json_call_path", json_path, &mut errors);
            if *json_path == self.routes.call_path {
                errors.push(ValidationError::DuplicatePath {
                    path: json_path.clone(),
                });
            }
        }
        if let Err(e) = self.upstream.target_uri() {
            errors.push(e);
        }
        if self.upstream.timeout_ms == 0 {
            errors.push(ValidationError::Zero {
                field: "upstream.timeout_ms",
            });
        }
        if self.upstream.max_body_bytes == 0 {
            errors.push(ValidationError::Zero {
                field: "upstream.max_body_bytes",
            });
        }
        check_observability(&self.observability, &mut errors);
        finish(errors)
    }
}

impl UpstreamConfig {
    /// Parse the configured URL into the form the HTTP client consumes.
    pub fn target_uri(&self) -> Result<Uri, ValidationError> {
        let uri: Uri = self.url.parse().map_err(|e: axum::http::uri::InvalidUri| {
            ValidationError::InvalidUrl {
                value: self.url.clone(),
                reason: e.to_string(),
            }
        })?;

        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => {
                return Err(ValidationError::UnsupportedScheme {
                    scheme: other.to_string(),
                })
            }
            None => {
                return Err(ValidationError::InvalidUrl {
                    value: self.url.clone(),
                    reason: "missing scheme".to_string(),
                })
            }
        }
        if uri.authority().is_none() {
            return Err(ValidationError::InvalidUrl {
                value: self.url.clone(),
                reason: "missing host".to_string(),
            });
        }
        Ok(uri)
    }
}

fn check_listener(listener: &ListenerConfig, errors: &mut Vec<ValidationError>) {
    if listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: listener.bind_address.clone(),
        });
    }
}

fn check_path(field: &'static str, path: &str, errors: &mut Vec<ValidationError>) {
    if !path.starts_with('/') {
        errors.push(ValidationError::InvalidPath {
            field,
            value: path.to_string(),
        });
    }
}

fn check_observability(config: &ObservabilityConfig, errors: &mut Vec<ValidationError>) {
    if config.metrics_enabled && config.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.metrics_address.clone(),
        });
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(IoServiceConfig::default().validate().is_ok());
        assert!(ApiConfig::default().validate().is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = ApiConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.routes.call_path = "call".into();
        config.upstream.timeout_ms = 0;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::Zero {
            field: "upstream.timeout_ms"
        }));
    }

    #[test]
    fn rejects_https_upstream() {
        let upstream = UpstreamConfig {
            url: "https://io-service/io".into(),
            ..UpstreamConfig::default()
        };
        assert_eq!(
            upstream.target_uri().unwrap_err(),
            ValidationError::UnsupportedScheme {
                scheme: "https".into()
            }
        );
    }

    #[test]
    fn rejects_relative_upstream() {
        let upstream = UpstreamConfig {
            url: "/io".into(),
            ..UpstreamConfig::default()
        };
        assert!(matches!(
            upstream.target_uri(),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn rejects_colliding_paths() {
        let mut config = ApiConfig::default();
        config.routes.json_call_path = Some("/call".into());
        let errors = config.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicatePath {
                path: "/call".into()
            }]
        );
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = IoServiceConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(config.validate().is_ok());

        config.observability.metrics_enabled = true;
        assert!(config.validate().is_err());
    }
}
