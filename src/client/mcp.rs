//! JSON-RPC client for the tool server's HTTP transport.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use super::error::ClientError;
use super::gemini::FunctionDeclaration;
use super::schema::to_gemini_parameters;
use crate::core::transport::http::{DEFAULT_PROTOCOL_VERSION, JsonRpcRequest, JsonRpcResponse};

/// Where the chat session discovers and runs tools.
#[async_trait]
pub trait ToolBackend: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<FunctionDeclaration>, ClientError>;

    /// Run a tool; returns the payload handed back to the model.
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, ClientError>;
}

/// Client for `POST /mcp`.
pub struct McpClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl McpClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Perform the `initialize` handshake. Returns the server's `serverInfo`.
    pub async fn initialize(&self) -> Result<Value, ClientError> {
        let result = self
            .request(
                "initialize",
                Some(json!({
                    "protocolVersion": DEFAULT_PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": "incident-chat",
                        "version": env!("CARGO_PKG_VERSION")
                    }
                })),
            )
            .await?;
        self.notify("notifications/initialized").await?;

        let server_info = result.get("serverInfo").cloned().unwrap_or(Value::Null);
        info!("Connected to tool server: {}", server_info);
        Ok(server_info)
    }

    #[instrument(skip(self, params))]
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method, params);

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let response: JsonRpcResponse = response.json().await?;

        if let Some(error) = response.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| ClientError::invalid_response(format!("{} returned no result", method)))
    }

    async fn notify(&self, method: &str) -> Result<(), ClientError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: method.to_string(),
            params: None,
        };
        self.http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl ToolBackend for McpClient {
    async fn list_tools(&self) -> Result<Vec<FunctionDeclaration>, ClientError> {
        let result = self.request("tools/list", None).await?;
        let tools = result
            .get("tools")
            .and_then(Value::as_array)
            .ok_or_else(|| ClientError::invalid_response("tools/list without tools"))?;

        tools.iter().map(declaration_from_tool).collect()
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, ClientError> {
        let result = self
            .request(
                "tools/call",
                Some(json!({ "name": name, "arguments": arguments })),
            )
            .await?;
        debug!("Tool {} returned {}", name, result);
        Ok(tool_payload(&result))
    }
}

/// Turn one `tools/list` entry into a function declaration.
pub fn declaration_from_tool(tool: &Value) -> Result<FunctionDeclaration, ClientError> {
    let name = tool
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::invalid_response("tool without a name"))?;

    Ok(FunctionDeclaration {
        name: name.to_string(),
        description: tool
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        parameters: tool.get("inputSchema").and_then(to_gemini_parameters),
    })
}

/// Reduce a `CallToolResult` to what the model sees.
///
/// Structured content is preferred; otherwise the text parts are joined.
/// Results flagged `isError` are reported under `error`.
pub fn tool_payload(result: &Value) -> Value {
    let is_error = result
        .get("isError")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let text: String = result
        .get("content")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    if is_error {
        return json!({ "error": text });
    }

    match result.get("structuredContent") {
        Some(structured) if structured.is_object() => structured.clone(),
        _ => json!({ "result": text }),
    }
}
