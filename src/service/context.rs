//! Per-call context threaded through the decorator chain.

use tracing::Span;
use uuid::Uuid;

/// Explicit call context.
///
/// Carries the request id and the span that inner layers should parent
/// their own spans to. Each call owns its context; decorators derive a new
/// one rather than mutating shared state.
#[derive(Debug, Clone)]
pub struct CallContext {
    request_id: Uuid,
    span: Span,
}

impl CallContext {
    /// A root context with a fresh request id and no parent span.
    pub fn new() -> Self {
        Self::with_request_id(Uuid::new_v4())
    }

    pub fn with_request_id(request_id: Uuid) -> Self {
        Self {
            request_id,
            span: Span::none(),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Span that the current layer runs under.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Derive a child context scoped to `span`.
    pub fn with_span(&self, span: Span) -> Self {
        Self {
            request_id: self.request_id,
            span,
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}
