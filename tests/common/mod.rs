//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use notebook_service::config::HttpConfig;
use notebook_service::observability::metrics::{duration_metric, latency_metric, total_metric};
use notebook_service::observability::NotebookMetrics;
use notebook_service::{
    CallContext, ConvertError, HttpServer, NotebookRequest, NotebookResponse, NotebookSupport,
    Shutdown,
};
use tokio::net::TcpListener;

pub const NOTEBOOK: &str = r##"{
    "cells": [
        {"cell_type": "markdown", "source": ["# heading\n", "text"]},
        {"cell_type": "code", "source": "1 + 1", "outputs": [
            {"output_type": "execute_result", "data": {"text/plain": "2"}}
        ]}
    ],
    "metadata": {},
    "nbformat": 4,
    "nbformat_minor": 5
}"##;

/// Start an HTTP server for `handler` on an ephemeral port.
pub async fn start_server<H>(mut config: HttpConfig, handler: Arc<H>) -> (SocketAddr, Shutdown)
where
    H: NotebookSupport + 'static,
{
    config.addr = "127.0.0.1:0".to_string();
    let listener = TcpListener::bind(&config.addr).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, handler);
    let stop = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, stop).await;
    });

    (addr, shutdown)
}

/// Metrics bound to a private recorder.
pub struct Probe {
    pub metrics: NotebookMetrics,
    snapshotter: Snapshotter,
    namespace: &'static str,
}

#[derive(Debug, Default)]
pub struct Reading {
    pub successes: u64,
    pub latencies: usize,
    pub durations: usize,
}

impl Probe {
    pub fn new(namespace: &'static str) -> Self {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let metrics = NotebookMetrics::register_with(&recorder, namespace);
        Self {
            metrics,
            snapshotter,
            namespace,
        }
    }

    /// Histogram samples are drained by each read.
    pub fn read(&self) -> Reading {
        let mut reading = Reading::default();
        for (key, _, _, value) in self.snapshotter.snapshot().into_vec() {
            let name = key.key().name();
            match value {
                DebugValue::Counter(c) if name == total_metric(self.namespace) => {
                    reading.successes = c
                }
                DebugValue::Histogram(v) if name == latency_metric(self.namespace) => {
                    reading.latencies = v.len()
                }
                DebugValue::Histogram(v) if name == duration_metric(self.namespace) => {
                    reading.durations = v.len()
                }
                _ => {}
            }
        }
        reading
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
