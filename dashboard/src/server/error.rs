//! HTTP error mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::domain::error::{InstallError, PortError};

/// Failure of a JSON API handler, rendered as `{ "error": message }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// 400 that also lists free ports near the requested one.
    #[error("Port {port} is already in use")]
    PortInUse { port: u16, alternatives: Vec<u16> },

    #[error("{0}")]
    Internal(String),
}

impl From<PortError> for ApiError {
    fn from(e: PortError) -> Self {
        match e {
            PortError::Invalid(_) => ApiError::BadRequest(e.to_string()),
            PortError::InUse { port, alternatives } => ApiError::PortInUse { port, alternatives },
        }
    }
}

impl From<InstallError> for ApiError {
    fn from(e: InstallError) -> Self {
        match e {
            InstallError::Port(port) => port.into(),
            InstallError::SaveFailed(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::PortInUse { alternatives, .. } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message, "alternatives": alternatives })),
            )
                .into_response(),
            ApiError::Internal(_) => {
                tracing::error!(error = %message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message })))
                    .into_response()
            }
        }
    }
}
