//! Provider errors
//!
//! These never leave a tool handler as errors: they are rendered into an
//! error-flagged tool result.

use serde::Deserialize;

/// Failure of a single remote call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Provider answered with a structured error body
    #[error("{message} ({code}, HTTP {status})")]
    Api { status: u16, code: String, message: String },

    /// Provider answered with a non-success status and no usable error body
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Request could not be built from the given arguments
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build an error from a non-success response body
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => ApiError::Api {
                status,
                code: envelope.error.code,
                message: envelope.error.message,
            },
            Err(_) => ApiError::Status {
                status,
                body: if body.trim().is_empty() {
                    "empty response body".to_string()
                } else {
                    body.trim().to_string()
                },
            },
        }
    }

    /// HTTP status, when the provider answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } | ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Result of a remote call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}
