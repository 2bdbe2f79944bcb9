//! Metrics decorator.

use std::time::Instant;

use tower::Layer;

use crate::observability::NotebookMetrics;
use crate::service::{CallContext, ConvertError, NotebookRequest, NotebookResponse, NotebookSupport};

/// Wraps a handler in [`Instrumented`].
#[derive(Clone)]
pub struct InstrumentLayer {
    metrics: NotebookMetrics,
}

impl InstrumentLayer {
    pub fn new(metrics: NotebookMetrics) -> Self {
        Self { metrics }
    }
}

impl<S> Layer<S> for InstrumentLayer {
    type Service = Instrumented<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Instrumented::new(inner, self.metrics.clone())
    }
}

/// Records latency, duration and success count of every call.
pub struct Instrumented<S> {
    inner: S,
    metrics: NotebookMetrics,
}

impl<S> Instrumented<S> {
    pub fn new(inner: S, metrics: NotebookMetrics) -> Self {
        Self { inner, metrics }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

/// Observes elapsed time into both histograms when dropped.
struct CallTimer<'a> {
    metrics: &'a NotebookMetrics,
    start: Instant,
}

impl<'a> CallTimer<'a> {
    fn start(metrics: &'a NotebookMetrics) -> Self {
        Self {
            metrics,
            start: Instant::now(),
        }
    }
}

impl Drop for CallTimer<'_> {
    fn drop(&mut self) {
        self.metrics.observe(self.start.elapsed());
    }
}

impl<S: NotebookSupport> NotebookSupport for Instrumented<S> {
    async fn generate_html(
        &self,
        ctx: &CallContext,
        req: &NotebookRequest,
    ) -> Result<NotebookResponse, ConvertError> {
        let _timer = CallTimer::start(&self.metrics);

        let result = self.inner.generate_html(ctx, req).await;
        if result.is_ok() {
            self.metrics.record_success();
        }

        result
    }
}
