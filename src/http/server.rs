//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router for the convert and health endpoints
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::HttpConfig;
use crate::http::request::{call_context, make_request_span};
use crate::http::response::ApiError;
use crate::service::{NotebookRequest, NotebookResponse, NotebookSupport};

pub const CONVERT_PATH: &str = "/api/v0/convert";
pub const HEALTH_PATH: &str = "/healthz";

/// Application state injected into handlers.
pub struct AppState<H> {
    pub handler: Arc<H>,
}

impl<H> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
        }
    }
}

/// HTTP server exposing a `NotebookSupport` handler.
pub struct HttpServer {
    router: Router,
    config: HttpConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `handler`.
    pub fn new<H: NotebookSupport + 'static>(config: HttpConfig, handler: Arc<H>) -> Self {
        let router = Self::build_router(&config, AppState { handler });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router<H: NotebookSupport + 'static>(config: &HttpConfig, state: AppState<H>) -> Router {
        let routes = Router::new()
            .route(CONVERT_PATH, post(convert_handler::<H>))
            .route(HEALTH_PATH, get(health_handler))
            .with_state(state);

        let root = config.root.trim_end_matches('/');
        let routes = if root.is_empty() {
            routes
        } else {
            Router::new().nest(root, routes)
        };

        // Outermost first: ids are assigned before the request span is made.
        routes.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs))),
        )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            root = %self.config.root,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn convert_handler<H: NotebookSupport + 'static>(
    State(state): State<AppState<H>>,
    headers: HeaderMap,
    Json(request): Json<NotebookRequest>,
) -> Result<Json<NotebookResponse>, ApiError> {
    let ctx = call_context(&headers);
    let response = state.handler.generate_html(&ctx, &request).await?;
    Ok(Json(response))
}

async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
