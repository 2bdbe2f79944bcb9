//! Notebook conversion service with layered observability.
//!
//! A single-method handler (`NotebookSupport::generate_html`) wrapped by
//! metrics, logging and tracing decorators, served over HTTP.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod middleware;
pub mod observability;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use service::{
    CallContext, ConvertError, NotebookChain, NotebookRequest, NotebookResponse, NotebookSupport,
};
