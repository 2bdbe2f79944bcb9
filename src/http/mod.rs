//! HTTP binding for the notebook handler.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, tower-http layers)
//!     → request.rs (request id → request span, CallContext)
//!     → composed NotebookSupport chain
//!     → response.rs (ConvertError → status code + JSON body)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{call_context, X_REQUEST_ID};
pub use response::ApiError;
pub use server::HttpServer;
