//! Errors returned by notebook handlers.

use thiserror::Error;

/// Failure of a `generate_html` call.
///
/// Decorators never construct these; they only pass them through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The request carries no usable input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The source is not a readable notebook document.
    #[error("malformed notebook: {0}")]
    MalformedNotebook(String),

    #[error("internal error: {0}")]
    Internal(String),
}
