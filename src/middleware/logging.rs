//! Logging decorator.
//!
//! Exactly one event per call: `DEBUG` on success, `WARN` with the error on
//! failure, `WARN` with `error = "call cancelled"` when the call future is
//! dropped before it completes (`"call panicked"` when dropped by an unwind).

use std::time::Instant;

use tower::Layer;
use uuid::Uuid;

use crate::service::{
    CallContext, ConvertError, NotebookRequest, NotebookResponse, NotebookSupport,
    GENERATE_HTML_METHOD,
};

/// Wraps a handler in [`Logged`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer;

impl LoggingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logged<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logged::new(inner)
    }
}

pub struct Logged<S> {
    inner: S,
}

impl<S> Logged<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

/// Pending log entry for one call. Emits on `finish` or, failing that, on drop.
struct CallLog {
    request_id: Uuid,
    start: Instant,
    emitted: bool,
}

impl CallLog {
    fn start(request_id: Uuid) -> Self {
        Self {
            request_id,
            start: Instant::now(),
            emitted: false,
        }
    }

    fn finish(mut self, result: &Result<NotebookResponse, ConvertError>) {
        self.emitted = true;
        let duration = self.start.elapsed();

        match result {
            Ok(_) => tracing::debug!(
                method = GENERATE_HTML_METHOD,
                request_id = %self.request_id,
                duration = ?duration
            ),
            Err(err) => tracing::warn!(
                method = GENERATE_HTML_METHOD,
                request_id = %self.request_id,
                duration = ?duration,
                error = %err,
                "Failed to execute"
            ),
        }
    }
}

impl Drop for CallLog {
    fn drop(&mut self) {
        if self.emitted {
            return;
        }
        let error = if std::thread::panicking() {
            "call panicked"
        } else {
            "call cancelled"
        };
        tracing::warn!(
            method = GENERATE_HTML_METHOD,
            request_id = %self.request_id,
            duration = ?self.start.elapsed(),
            error,
            "Failed to execute"
        );
    }
}

impl<S: NotebookSupport> NotebookSupport for Logged<S> {
    async fn generate_html(
        &self,
        ctx: &CallContext,
        req: &NotebookRequest,
    ) -> Result<NotebookResponse, ConvertError> {
        let log = CallLog::start(ctx.request_id());

        let result = self.inner.generate_html(ctx, req).await;
        log.finish(&result);

        result
    }
}
