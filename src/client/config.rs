//! Chat client configuration.

use std::fmt;
use std::time::Duration;

use tracing::warn;

use super::error::ClientError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000/mcp";
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Settings for the `incident-chat` binary.
#[derive(Clone)]
pub struct ChatConfig {
    /// Gemini API key, sent as `x-goog-api-key`.
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// JSON-RPC endpoint of the tool server.
    pub server_url: String,
    pub temperature: f32,
    /// Upper bound on model → tool → model round trips per user message.
    pub max_tool_rounds: usize,
    /// Per-request limit for both the model API and the tool server.
    pub request_timeout: Duration,
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("server_url", &self.server_url)
            .field("temperature", &self.temperature)
            .field("max_tool_rounds", &self.max_tool_rounds)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ChatConfig {
    /// Defaults with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            temperature: 0.0,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// HTTP client shared by the model and tool-server clients.
    pub fn http_client(&self) -> Result<reqwest::Client, ClientError> {
        Ok(reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?)
    }

    /// Load configuration from environment variables (and `.env`).
    ///
    /// `GEMINI_API_KEY` is required; `GOOGLE_API_KEY` is accepted as a
    /// fallback.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ClientError::config("GEMINI_API_KEY is not set"))?;

        let mut config = Self::new(api_key);

        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(server_url) = std::env::var("MCP_SERVER_URL") {
            config.server_url = server_url;
        }
        if let Ok(raw) = std::env::var("CHAT_MAX_TOOL_ROUNDS") {
            match raw.parse() {
                Ok(rounds) if rounds > 0 => config.max_tool_rounds = rounds,
                _ => warn!("Ignoring CHAT_MAX_TOOL_ROUNDS: cannot use '{}'", raw),
            }
        }
        if let Ok(raw) = std::env::var("CHAT_REQUEST_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => warn!("Ignoring CHAT_REQUEST_TIMEOUT_SECS: cannot use '{}'", raw),
            }
        }

        Ok(config)
    }
}
