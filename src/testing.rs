//! Test doubles: scripted handlers, a capturing subscriber and a private
//! metrics recorder.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::observability::metrics::{self, NotebookMetrics};
use crate::service::{CallContext, ConvertError, NotebookRequest, NotebookResponse, NotebookSupport};

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    /// Name of the span the event was recorded in, if any.
    pub span: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

#[derive(Debug, Clone)]
pub struct CapturedSpan {
    pub name: String,
    pub parent: Option<String>,
    pub fields: HashMap<String, String>,
    pub closed: bool,
}

impl CapturedSpan {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct State {
    events: Vec<CapturedEvent>,
    spans: Vec<CapturedSpan>,
    index: HashMap<u64, usize>,
}

/// Shared view on everything a `CaptureLayer` saw.
#[derive(Clone, Default)]
pub struct Capture {
    state: Arc<Mutex<State>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install as the thread-local default subscriber for the guard's lifetime.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(CaptureLayer {
            state: self.state.clone(),
        });
        tracing::subscriber::set_default(subscriber)
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.state.lock().unwrap().spans.clone()
    }

    /// Events carrying `method = <method>`.
    pub fn events_for_method(&self, method: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.field("method") == Some(method))
            .collect()
    }

    pub fn spans_named(&self, name: &str) -> Vec<CapturedSpan> {
        self.spans().into_iter().filter(|s| s.name == name).collect()
    }
}

struct CaptureLayer {
    state: Arc<Mutex<State>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);
        let parent = ctx
            .span(id)
            .and_then(|span| span.parent().map(|p| p.name().to_string()));

        let mut state = self.state.lock().unwrap();
        let slot = state.spans.len();
        state.spans.push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            parent,
            fields: visitor.fields,
            closed: false,
        });
        state.index.insert(id.into_u64(), slot);
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let span = ctx.event_span(event).map(|s| s.name().to_string());

        self.state.lock().unwrap().events.push(CapturedEvent {
            level: *event.metadata().level(),
            span,
            fields: visitor.fields,
        });
    }

    fn on_close(&self, id: Id, _ctx: Context<'_, S>) {
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.index.remove(&id.into_u64()) {
            state.spans[slot].closed = true;
        }
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.fields.insert(field.name().to_string(), format!("{value:?}"));
    }
}

/// Handler returning a fixed outcome, optionally after a delay.
pub struct Scripted {
    result: Result<NotebookResponse, ConvertError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl Scripted {
    pub fn ok(content: &str) -> Self {
        Self::returning(Ok(NotebookResponse::new(content)))
    }

    pub fn err(err: ConvertError) -> Self {
        Self::returning(Err(err))
    }

    pub fn returning(result: Result<NotebookResponse, ConvertError>) -> Self {
        Self {
            result,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NotebookSupport for Scripted {
    async fn generate_html(
        &self,
        _ctx: &CallContext,
        _req: &NotebookRequest,
    ) -> Result<NotebookResponse, ConvertError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}

/// Handler that succeeds with `req.source` after a per-request delay, or
/// fails when the source starts with `"fail"`.
pub struct Echo;

impl NotebookSupport for Echo {
    async fn generate_html(
        &self,
        _ctx: &CallContext,
        req: &NotebookRequest,
    ) -> Result<NotebookResponse, ConvertError> {
        let delay = req.source.len() as u64 % 7;
        tokio::time::sleep(Duration::from_millis(delay)).await;
        if req.source.starts_with("fail") {
            Err(ConvertError::InvalidInput(req.source.clone()))
        } else {
            Ok(NotebookResponse::new(req.source.clone()))
        }
    }
}

/// Handler that never completes.
pub struct Stalled;

impl NotebookSupport for Stalled {
    async fn generate_html(
        &self,
        _ctx: &CallContext,
        _req: &NotebookRequest,
    ) -> Result<NotebookResponse, ConvertError> {
        std::future::pending().await
    }
}

/// Handler that panics mid-call.
pub struct Panicking;

impl NotebookSupport for Panicking {
    async fn generate_html(
        &self,
        _ctx: &CallContext,
        _req: &NotebookRequest,
    ) -> Result<NotebookResponse, ConvertError> {
        panic!("handler blew up")
    }
}

/// Metrics handles bound to a private recorder, plus a way to read them back.
pub struct MetricsProbe {
    pub metrics: NotebookMetrics,
    snapshotter: Snapshotter,
    namespace: String,
}

/// What the recorder holds at one point in time.
///
/// Histogram samples are drained by each snapshot.
#[derive(Debug, Default)]
pub struct MetricsReading {
    pub successes: u64,
    pub latencies_us: Vec<f64>,
    pub durations_secs: Vec<f64>,
}

impl MetricsProbe {
    pub fn new(namespace: &str) -> Self {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let metrics = NotebookMetrics::register_with(&recorder, namespace);
        Self {
            metrics,
            snapshotter,
            namespace: namespace.to_string(),
        }
    }

    pub fn read(&self) -> MetricsReading {
        let total = metrics::total_metric(&self.namespace);
        let latency = metrics::latency_metric(&self.namespace);
        let duration = metrics::duration_metric(&self.namespace);

        let mut reading = MetricsReading::default();
        for (key, _, _, value) in self.snapshotter.snapshot().into_vec() {
            let name = key.key().name();
            match value {
                DebugValue::Counter(c) if name == total => reading.successes = c,
                DebugValue::Histogram(v) if name == latency => {
                    reading.latencies_us = v.into_iter().map(|f| f.into_inner()).collect();
                }
                DebugValue::Histogram(v) if name == duration => {
                    reading.durations_secs = v.into_iter().map(|f| f.into_inner()).collect();
                }
                _ => {}
            }
        }
        reading
    }
}
