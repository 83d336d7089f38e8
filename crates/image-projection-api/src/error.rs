//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use image_projection_core::PipelineError;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The blocking worker panicked or was cancelled.
    #[error("Processing worker failed: {0}")]
    Worker(String),
}

impl From<JoinError> for ApiError {
    fn from(e: JoinError) -> Self {
        ApiError::Worker(e.to_string())
    }
}

impl ApiError {
    /// 400 for bad input, 500 for failures on our side.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Pipeline(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(_) | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {message}");
        } else {
            warn!(status = status.as_u16(), "Rejected request: {message}");
        }
        err_json(status, &message).into_response()
    }
}

/// Standard error response.
pub fn err_json(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "status": "error", "error": message })))
}
