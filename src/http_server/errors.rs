//! # HTTP API Errors
//!
//! Every store failure becomes a 500 with a generic, route-specific message.
//! The underlying cause is logged and never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use super::response::ErrorResponse;
use crate::storage::StoreError;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Route handler error
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    #[source]
    source: StoreError,
}

impl ApiError {
    /// Wrap a store failure with the message the client will see
    pub fn store(message: impl Into<String>, source: StoreError) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(
            code = %self.source.code(),
            cause = %self.source,
            "{}",
            self.message
        );

        let status = self.status_code();
        (status, Json(ErrorResponse::new(self.message))).into_response()
    }
}
