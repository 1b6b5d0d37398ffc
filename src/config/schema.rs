//! Configuration schema definitions.
//!
//! This module defines the configuration structure for both services.
//! All types derive Serde traits for deserialization from config files,
//! and every field has a default so an empty file is a valid config.

use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration for the io-service binary.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct IoServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Simulated I/O settings.
    pub io: IoConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Root configuration for the api binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listener configuration (bind address).
    #[serde(deserialize_with = "api_listener")]
    pub listener: ListenerConfig,

    /// Paths the api answers on.
    pub routes: ApiRoutesConfig,

    /// The io-service endpoint every call is relayed to.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    #[serde(deserialize_with = "api_observability")]
    pub observability: ObservabilityConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::api(),
            routes: ApiRoutesConfig::default(),
            upstream: UpstreamConfig::default(),
            observability: ObservabilityConfig::api(),
        }
    }
}

// A table that is present but partial must fall back to api's own
// defaults, not to the io-service ones carried by `Default`.
fn api_listener<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ListenerConfig, D::Error> {
    let partial = PartialListener::deserialize(deserializer)?;
    Ok(partial.over(ListenerConfig::api()))
}

fn api_observability<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ObservabilityConfig, D::Error> {
    let partial = PartialObservability::deserialize(deserializer)?;
    Ok(partial.over(ObservabilityConfig::api()))
}

#[derive(Deserialize)]
struct PartialListener {
    bind_address: Option<String>,
}

impl PartialListener {
    fn over(self, base: ListenerConfig) -> ListenerConfig {
        ListenerConfig {
            bind_address: self.bind_address.unwrap_or(base.bind_address),
        }
    }
}

#[derive(Deserialize)]
struct PartialObservability {
    log_level: Option<String>,
    log_format: Option<LogFormat>,
    metrics_enabled: Option<bool>,
    metrics_address: Option<String>,
}

impl PartialObservability {
    fn over(self, base: ObservabilityConfig) -> ObservabilityConfig {
        ObservabilityConfig {
            log_level: self.log_level.unwrap_or(base.log_level),
            log_format: self.log_format.unwrap_or(base.log_format),
            metrics_enabled: self.metrics_enabled.unwrap_or(base.metrics_enabled),
            metrics_address: self.metrics_address.unwrap_or(base.metrics_address),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl ListenerConfig {
    /// api's listener default.
    pub fn api() -> Self {
        Self {
            bind_address: "0.0.0.0:8081".to_string(),
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Behavior of the simulated slow endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IoConfig {
    /// Path the endpoint is mounted on.
    pub path: String,

    /// How long every request is held before answering, in milliseconds.
    pub delay_ms: u64,

    /// Response body.
    pub payload: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            path: "/io".to_string(),
            delay_ms: 1000,
            payload: "ok".to_string(),
        }
    }
}

/// Paths served by the api.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiRoutesConfig {
    /// Relays the upstream body verbatim.
    pub call_path: String,

    /// Wraps the upstream body in `{"result": ...}`. `None` disables it.
    pub json_call_path: Option<String>,
}

impl Default for ApiRoutesConfig {
    fn default() -> Self {
        Self {
            call_path: "/call".to_string(),
            json_call_path: Some("/api/call".to_string()),
        }
    }
}

/// Outbound call settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Absolute `http://` URL of the io-service endpoint.
    pub url: String,

    /// Total deadline for one call (connect, head and body), in milliseconds.
    pub timeout_ms: u64,

    /// Upper bound on the buffered upstream body. Larger bodies are dropped.
    pub max_body_bytes: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://io-service:8080/io".to_string(),
            timeout_ms: 2000,
            max_body_bytes: 16 * 1024 * 1024, // 16MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, one line per event.
    #[default]
    Plain,
    /// One JSON object per event.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl ObservabilityConfig {
    /// api's defaults; the metrics port differs from io-service's.
    pub fn api() -> Self {
        Self {
            metrics_address: "0.0.0.0:9091".to_string(),
            ..Self::default()
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Plain,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
