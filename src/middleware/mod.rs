//! Observability decorators for `NotebookSupport` handlers.
//!
//! # Data Flow
//! ```text
//! generate_html(ctx, req)
//!     → instrument.rs (start timer)
//!         → logging.rs (start clock)
//!             → tracing.rs (open span, annotate, pass child ctx)
//!                 → base handler
//!             ← span closed
//!         ← one log entry (debug on Ok, warn on Err)
//!     ← histograms observed, success counter on Ok
//! ```
//!
//! # Design Decisions
//! - Each decorator is a `tower::Layer` producing a wrapper that implements
//!   `NotebookSupport` itself
//! - Finalisation lives in `Drop` guards, so dropped (cancelled) and
//!   panicking calls are still observed
//! - The result is never inspected beyond `is_ok()` and the error's text

pub mod instrument;
pub mod logging;
pub mod tracing;

pub use instrument::{InstrumentLayer, Instrumented};
pub use logging::{Logged, LoggingLayer};
pub use self::tracing::{Traced, TracingLayer};
