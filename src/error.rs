//! Error types for hcloud-mcp
//!
//! Centralized error handling using thiserror. Provider failures are not part
//! of this enum: they are reported in-band as error-flagged tool results (see
//! [`crate::hcloud::ApiError`]).

use thiserror::Error;

use crate::tools::ValidationErrors;

/// All error types that can surface outside a tool handler
#[derive(Debug, Error)]
pub enum McpError {
    /// Invocation named a tool that is not registered
    #[error("Tool {0} not found")]
    ToolNotFound(String),

    /// Arguments failed schema validation
    #[error("Invalid arguments for tool {tool}: {errors}")]
    InvalidArguments {
        tool: String,
        errors: ValidationErrors,
    },

    /// Missing or malformed startup configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport could not be established or broke down
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for hcloud-mcp operations
pub type Result<T> = std::result::Result<T, McpError>;
