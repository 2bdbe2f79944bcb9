//! Notebook conversion service.
//!
//! # Data Flow
//! ```text
//! caller (HTTP handler, test, ...)
//!     → chain.rs (composed NotebookSupport, built once at startup)
//!         → middleware::instrument (latency/duration histograms, success counter)
//!         → middleware::logging (one log entry per call)
//!         → middleware::tracing (one span per call)
//!         → renderer.rs (base handler: notebook JSON → HTML)
//!     ← Result<NotebookResponse, ConvertError> returned unchanged
//! ```
//!
//! # Design Decisions
//! - One capability trait with one method; every decorator implements it too
//! - Per-call state lives in the call future; only metrics handles are shared
//! - Span context travels in `CallContext`, never through ambient state

pub mod chain;
pub mod context;
pub mod error;
pub mod renderer;

use std::future::Future;

use serde::{Deserialize, Serialize};

pub use chain::NotebookChain;
pub use context::CallContext;
pub use error::ConvertError;
pub use renderer::HtmlRenderer;

/// Fully qualified RPC method name used in logs and span names.
pub const GENERATE_HTML_METHOD: &str = "JupyterNotebookSupport.GenerateHTML";

/// Input of a conversion: the notebook document source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotebookRequest {
    pub source: String,
}

impl NotebookRequest {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }
}

/// Output of a conversion: the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotebookResponse {
    pub content: String,
}

impl NotebookResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }
}

/// The single-method handler capability.
///
/// Implemented by the base renderer and by every observability decorator, so
/// a decorated handler is indistinguishable from the bare one to its callers.
pub trait NotebookSupport: Send + Sync {
    /// Render the notebook in `req` to HTML.
    fn generate_html(
        &self,
        ctx: &CallContext,
        req: &NotebookRequest,
    ) -> impl Future<Output = Result<NotebookResponse, ConvertError>> + Send;
}

impl<T: NotebookSupport> NotebookSupport for std::sync::Arc<T> {
    fn generate_html(
        &self,
        ctx: &CallContext,
        req: &NotebookRequest,
    ) -> impl Future<Output = Result<NotebookResponse, ConvertError>> + Send {
        (**self).generate_html(ctx, req)
    }
}
