//! Tracing decorator.

use std::future::Future;

use tower::Layer;
use tracing::Instrument;

use crate::service::{
    CallContext, ConvertError, NotebookRequest, NotebookResponse, NotebookSupport,
    GENERATE_HTML_METHOD,
};

/// Wraps a handler in [`Traced`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLayer;

impl TracingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for TracingLayer {
    type Service = Traced<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Traced::new(inner)
    }
}

/// Opens one span per call, child of the span carried by the context.
pub struct Traced<S> {
    inner: S,
}

impl<S> Traced<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

impl<S: NotebookSupport> NotebookSupport for Traced<S> {
    fn generate_html(
        &self,
        ctx: &CallContext,
        req: &NotebookRequest,
    ) -> impl Future<Output = Result<NotebookResponse, ConvertError>> + Send {
        let span = tracing::info_span!(
            parent: ctx.span(),
            GENERATE_HTML_METHOD,
            request_id = %ctx.request_id()
        );
        tracing::info!(
            parent: &span,
            source = %req.source,
            "Execute JupyterNotebookSupport.GenerateHTML handler"
        );

        // The span ends once the instrumented future and `child` are dropped,
        // whichever way the call exits.
        let child = ctx.with_span(span.clone());
        async move { self.inner.generate_html(&child, req).await }.instrument(span)
    }
}
