//! Configuration validation.
//!
//! Semantic checks only; serde handles syntax. All problems are reported,
//! not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ServiceConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("http.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("http.root must start with '/', got {0:?}")]
    InvalidRoot(String),

    #[error("metrics.namespace {0:?} is not a valid metric name prefix")]
    InvalidNamespace(String),

    #[error("log.level {0:?} is not a valid filter directive")]
    InvalidLogLevel(String),
}

/// Validate `config`, returning every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_addr("http.addr", &config.http.addr, &mut errors);
    if config.metrics.enabled {
        check_addr("metrics.addr", &config.metrics.addr, &mut errors);
    }

    if config.http.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if !config.http.root.starts_with('/') {
        errors.push(ValidationError::InvalidRoot(config.http.root.clone()));
    }

    if !is_metric_prefix(&config.metrics.namespace) {
        errors.push(ValidationError::InvalidNamespace(config.metrics.namespace.clone()));
    }

    if EnvFilter::try_new(&config.log.level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(config.log.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_addr(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

/// Prometheus names: `[a-zA-Z_:][a-zA-Z0-9_:]*`.
fn is_metric_prefix(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}
