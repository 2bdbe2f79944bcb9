//! Error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::service::ConvertError;

/// `ConvertError` rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub ConvertError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ConvertError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ConvertError::MalformedNotebook(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ConvertError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ConvertError> for ApiError {
    fn from(err: ConvertError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.0.to_string() }));
        (self.status(), body).into_response()
    }
}
