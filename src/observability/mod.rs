//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! middleware layers produce:
//!     → logging.rs (subscriber setup for structured log events)
//!     → metrics.rs (NotebookMetrics handles, Prometheus exporter)
//!     → tracing.rs (request spans)
//!
//! Consumers:
//!     → stdout (JSON or pretty)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
pub mod tracing;

pub use self::metrics::NotebookMetrics;
