//! Error-to-HTTP response conversion.
//!
//! Handlers return `Result<T, ApiError>`; every failure becomes the error
//! envelope `{"status": "error", "error": {"code", "message"}}` with the
//! status code derived from [`randomedia_core::Error::http_status`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct ApiError {
    inner: randomedia_core::Error,
}

impl ApiError {
    pub fn new(inner: randomedia_core::Error) -> Self {
        Self { inner }
    }
}

impl From<randomedia_core::Error> for ApiError {
    fn from(e: randomedia_core::Error) -> Self {
        Self::new(e)
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always `"error"`
    pub status: String,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable machine-readable tag, e.g. `discovery_exhausted`
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        }

        let body = ErrorEnvelope {
            status: "error".to_string(),
            error: ErrorDetail {
                code: self.inner.code(),
                message: self.inner.to_string(),
            },
        };

        (status, axum::Json(body)).into_response()
    }
}
