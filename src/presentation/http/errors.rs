//! HTTP error handling and response conversion.
//!
//! Domain failures are mapped to status codes and a `{ "error": message }`
//! body. Messages are short and user-safe so the console can show them as
//! transient notifications; the full error is logged.

use crate::domain::report::errors::ModerationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Errors returned from console handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404).
    NotFound(String),

    /// Request rejected by the backend or malformed (400).
    BadRequest(String),

    /// Request parameters failed validation (400).
    ValidationError(String),

    /// Backend answered with something unusable (502).
    BadGateway(String),

    /// Backend unreachable or timed out (503).
    ExternalService(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
            Self::ExternalService(msg) => write!(f, "External service error: {}", msg),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::ExternalService(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::ValidationError(msg)
            | Self::BadGateway(msg)
            | Self::ExternalService(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// === Domain Error Conversion ===

impl From<ModerationError> for AppError {
    fn from(err: ModerationError) -> Self {
        let message = err.user_message();
        match err {
            ModerationError::Api { status: 404, .. } => AppError::NotFound(message),
            ModerationError::Api { status, .. } if (400..500).contains(&status) => {
                AppError::BadRequest(message)
            }
            ModerationError::Api { status, .. } => {
                tracing::error!(upstream_status = status, "moderation backend failure");
                AppError::ExternalService(message)
            }
            ModerationError::Network(_) | ModerationError::Timeout => {
                AppError::ExternalService(message)
            }
            ModerationError::MalformedPayload(detail) => {
                tracing::error!(malformed_payload = %detail);
                AppError::BadGateway(message)
            }
            ModerationError::InvalidRequest(_) => AppError::ValidationError(message),
        }
    }
}

// === Validation Error Conversion ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
