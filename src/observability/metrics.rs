//! Metrics collection and exposition.
//!
//! # Metrics
//! - `{ns}_generate_html_latency_microseconds` (histogram): call latency in µs
//! - `{ns}_generate_html_duration_seconds` (histogram): call duration in s
//! - `{ns}_generate_html_total` (counter): successful calls
//!
//! # Design Decisions
//! - No labels: every call lands in the same series
//! - Handles are resolved once at startup, updates are atomic
//! - There is no failure counter; failures only show up in the histograms

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{Counter, Histogram, Recorder, Unit};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};

const LATENCY_SUFFIX: &str = "generate_html_latency_microseconds";
const DURATION_SUFFIX: &str = "generate_html_duration_seconds";
const TOTAL_SUFFIX: &str = "generate_html_total";

/// Latency buckets in microseconds (50µs .. 10s).
const LATENCY_BUCKETS_US: &[f64] = &[
    50.0, 100.0, 250.0, 500.0, 1_000.0, 2_500.0, 5_000.0, 10_000.0, 25_000.0, 50_000.0,
    100_000.0, 250_000.0, 500_000.0, 1_000_000.0, 2_500_000.0, 10_000_000.0,
];

/// Duration buckets in seconds, same boundaries as the latency buckets.
const DURATION_BUCKETS_SECS: &[f64] = &[
    0.00005, 0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5,
    1.0, 2.5, 10.0,
];

pub fn latency_metric(namespace: &str) -> String {
    format!("{namespace}_{LATENCY_SUFFIX}")
}

pub fn duration_metric(namespace: &str) -> String {
    format!("{namespace}_{DURATION_SUFFIX}")
}

pub fn total_metric(namespace: &str) -> String {
    format!("{namespace}_{TOTAL_SUFFIX}")
}

/// Process-wide aggregates for the notebook handler.
///
/// Cloning shares the underlying series.
#[derive(Clone)]
pub struct NotebookMetrics {
    latency: Histogram,
    duration: Histogram,
    counter: Counter,
}

impl NotebookMetrics {
    /// Register the series against the globally installed recorder.
    ///
    /// Without a recorder the handles are no-ops.
    pub fn register(namespace: &str) -> Self {
        let latency = latency_metric(namespace);
        let duration = duration_metric(namespace);
        let total = total_metric(namespace);

        metrics::describe_histogram!(latency.clone(), Unit::Microseconds, "GenerateHTML call latency");
        metrics::describe_histogram!(duration.clone(), Unit::Seconds, "GenerateHTML call duration");
        metrics::describe_counter!(total.clone(), Unit::Count, "Successful GenerateHTML calls");

        Self {
            latency: metrics::histogram!(latency),
            duration: metrics::histogram!(duration),
            counter: metrics::counter!(total),
        }
    }

    /// Register the series against a specific recorder.
    pub fn register_with(recorder: &dyn Recorder, namespace: &str) -> Self {
        metrics::with_local_recorder(recorder, || Self::register(namespace))
    }

    /// Record one call's elapsed time into both histograms.
    pub fn observe(&self, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        self.latency.record(secs * 1_000_000.0);
        self.duration.record(secs);
    }

    pub fn record_success(&self) {
        self.counter.increment(1);
    }
}

/// Install the Prometheus recorder and its scrape listener on `addr`.
///
/// Must be called before `NotebookMetrics::register` for the handles to
/// reach the exporter.
pub fn init_metrics(addr: SocketAddr, namespace: &str) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(Matcher::Full(latency_metric(namespace)), LATENCY_BUCKETS_US)?
        .set_buckets_for_metric(Matcher::Full(duration_metric(namespace)), DURATION_BUCKETS_SECS)?
        .install()?;

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}
