//! Request id handling.
//!
//! `SetRequestIdLayer` stamps every request with a UUID `x-request-id`
//! unless the client sent one; the same id names the request span and the
//! handler's `CallContext`.

use axum::body::Body;
use axum::http::{HeaderMap, Request};
use tracing::Span;
use uuid::Uuid;

use crate::observability::tracing::request_span;
use crate::service::CallContext;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Request id from the headers. Non-UUID ids are replaced by a fresh one.
pub fn request_id(headers: &HeaderMap) -> Uuid {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap_or_else(Uuid::new_v4)
}

/// `MakeSpan` for the trace layer.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let span = request_span(request_id(request.headers()));
    span.record("method", tracing::field::display(request.method()));
    span.record("path", request.uri().path());
    span
}

/// Context for a handler call made while serving this request.
pub fn call_context(headers: &HeaderMap) -> CallContext {
    CallContext::with_request_id(request_id(headers)).with_span(Span::current())
}
