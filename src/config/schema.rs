//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the notebook service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Logging settings.
    pub log: LogConfig,

    /// HTTP listener settings.
    pub http: HttpConfig,

    /// Metrics exporter settings.
    pub metrics: MetricsConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info",
    /// "notebook_service=debug").
    pub level: String,

    /// Human-readable output instead of JSON lines.
    pub pretty: bool,

    /// ANSI colors (pretty output only).
    pub color: bool,

    /// Log span close events with their timing.
    pub span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty: false,
            color: false,
            span_events: false,
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address (e.g., "0.0.0.0:9105").
    pub addr: String,

    /// Path prefix all routes are mounted under. Must start with '/'.
    pub root: String,

    /// Request timeout in seconds. Expired requests are cancelled.
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:9105".to_string(),
            root: "/".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable the Prometheus scrape endpoint.
    pub enabled: bool,

    /// Scrape endpoint bind address.
    pub addr: String,

    /// Prefix of every metric name.
    pub namespace: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            addr: "0.0.0.0:9109".to_string(),
            namespace: "notebook".to_string(),
        }
    }
}
