//! Chat client error types.

use thiserror::Error;

/// Errors raised while talking to the model API or the tool server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required setting is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP request itself failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model API answered with a non-success status.
    #[error("Model API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The tool server answered with a JSON-RPC error.
    #[error("Tool server error {code}: {message}")]
    Rpc { code: i32, message: String },

    /// A response did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The model kept requesting tools past the configured limit.
    #[error("Model requested tools for more than {0} rounds")]
    ToolRoundsExceeded(usize),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
