//! Composition root for the notebook handler.
//!
//! Layer order, outermost first:
//!
//! ```text
//! Instrumented   metrics: timing includes logging + tracing overhead
//!   Logged       one log entry: duration includes tracing overhead
//!     Traced     one span around the base handler
//!       base
//! ```
//!
//! The order is part of the contract of this module; swapping layers changes
//! what each one measures.

use tower::ServiceBuilder;

use crate::middleware::{InstrumentLayer, Instrumented, Logged, LoggingLayer, Traced, TracingLayer};
use crate::observability::NotebookMetrics;
use crate::service::NotebookSupport;

/// The fully decorated handler.
pub type NotebookChain<S> = Instrumented<Logged<Traced<S>>>;

/// Decorate `base` with metrics, logging and tracing.
///
/// Built once at startup; the result is immutable and can be shared behind an
/// `Arc` by any number of concurrent callers.
pub fn build<S: NotebookSupport>(base: S, metrics: NotebookMetrics) -> NotebookChain<S> {
    ServiceBuilder::new()
        .layer(InstrumentLayer::new(metrics))
        .layer(LoggingLayer::new())
        .layer(TracingLayer::new())
        .service(base)
}
