//! Startup orchestration.
//!
//! Fail fast: any startup error is fatal and returned to `main`.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics::{init_metrics, NotebookMetrics};
use crate::service::{chain, HtmlRenderer};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid {field} address {value:?}")]
    Address { field: &'static str, value: String },

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the service until `shutdown` fires.
pub async fn serve(config: ServiceConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let stop = shutdown.subscribe();

    if config.metrics.enabled {
        let addr: SocketAddr = config.metrics.addr.parse().map_err(|_| StartupError::Address {
            field: "metrics",
            value: config.metrics.addr.clone(),
        })?;
        init_metrics(addr, &config.metrics.namespace)?;
    }

    let metrics = NotebookMetrics::register(&config.metrics.namespace);
    let handler = Arc::new(chain::build(HtmlRenderer::new(), metrics));

    let listener = TcpListener::bind(&config.http.addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.http.addr.clone(),
            source,
        })?;

    let server = HttpServer::new(config.http, handler);
    server
        .run(listener, stop)
        .await
        .map_err(StartupError::Serve)
}
