//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

use crate::core::security::IdentifierError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool. Raised before any
    /// statement runs.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The datastore rejected or failed the statement.
    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// JSON-RPC error code for this failure.
    pub fn json_rpc_code(&self) -> i32 {
        match self {
            Self::NotFound(_) | Self::InvalidArguments(_) => -32602,
            Self::Storage(_) | Self::Internal(_) => -32603,
        }
    }

    /// Convert into the rmcp error returned over STDIO.
    pub fn to_mcp_error(&self) -> McpError {
        match self {
            Self::NotFound(_) | Self::InvalidArguments(_) => {
                McpError::invalid_params(self.to_string(), None)
            }
            Self::Storage(_) | Self::Internal(_) => McpError::internal_error(self.to_string(), None),
        }
    }
}

impl From<IdentifierError> for ToolError {
    fn from(e: IdentifierError) -> Self {
        Self::InvalidArguments(e.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
