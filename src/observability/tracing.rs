//! Distributed tracing support.
//!
//! Spans are plain `tracing` spans. Export is left to whatever subscriber
//! is installed; with `log.span_events` the fmt layer reports each span's
//! close and timing.
//!
//! # Design Decisions
//! - Span parents are passed in `CallContext`, not taken from the current span
//! - The HTTP request id is recorded on every handler span

use tracing::Span;
use uuid::Uuid;

/// Root span for one inbound request.
pub fn request_span(request_id: Uuid) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = tracing::field::Empty,
        path = tracing::field::Empty
    )
}
