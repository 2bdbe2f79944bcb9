//! Structured logging.
//!
//! # Design Decisions
//! - `tracing` events everywhere, rendered by `tracing-subscriber`
//! - JSON lines by default, pretty output for development
//! - `RUST_LOG` wins over the configured level when set

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LogConfig;

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber. Call once, at startup.
pub fn init_logging(config: &LogConfig) {
    let span_events = if config.span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = if config.pretty {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_ansi(config.color)
            .with_span_events(span_events)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_span_events(span_events)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(default_filter(config))
        .with(fmt_layer)
        .init();
}
