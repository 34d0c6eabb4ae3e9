//! Application error types with HTTP status mapping.
//!
//! Every error is terminal for its request; nothing here is retried.
//! Response bodies carry a single `detail` field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::llm::LlmError;

/// Error response body shape shared by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Application error categories.
#[derive(Debug)]
pub enum AppError {
    // Validation errors (400)
    InvalidInput { field: String, reason: String },

    // Not found (404)
    SpecNotFound(String),

    // Generate pipeline failures (500)
    Configuration(String),
    Upstream(String),
    Parse(String),

    // Storage failures (500)
    Storage(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::SpecNotFound(_) => StatusCode::NOT_FOUND,
            Self::Configuration(_) | Self::Upstream(_) | Self::Parse(_) | Self::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the `detail` message surfaced to the client.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput { field, reason } => {
                format!("Invalid input for field '{field}': {reason}")
            }
            Self::SpecNotFound(_) => "Spec not found".to_string(),
            Self::Configuration(msg) => msg.clone(),
            Self::Upstream(msg) | Self::Parse(msg) => {
                format!("Failed to generate tasks: {msg}")
            }
            Self::Storage(msg) => format!("Storage error: {msg}"),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NotConfigured => Self::Configuration("GROQ_API_KEY not configured".into()),
            other => Self::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;
