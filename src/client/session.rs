//! A multi-turn chat with automatic function calling.

use tracing::{info, instrument, warn};

use super::error::ClientError;
use super::gemini::{ChatModel, Content, FunctionDeclaration, FunctionResponse};
use super::mcp::ToolBackend;

/// Conversation state plus the model and tool backend it drives.
///
/// Each `send_message` appends the user turn, then alternates between the
/// model and the tool backend until the model answers without function
/// calls. A failed turn leaves the history as it was before the turn.
pub struct ChatSession<M, B> {
    model: M,
    backend: B,
    functions: Vec<FunctionDeclaration>,
    history: Vec<Content>,
    max_tool_rounds: usize,
}

impl<M: ChatModel, B: ToolBackend> ChatSession<M, B> {
    /// Discover the backend's tools and start an empty conversation.
    pub async fn start(model: M, backend: B, max_tool_rounds: usize) -> Result<Self, ClientError> {
        let functions = backend.list_tools().await?;
        info!("Discovered {} tools", functions.len());

        Ok(Self {
            model,
            backend,
            functions,
            history: Vec::new(),
            max_tool_rounds,
        })
    }

    pub fn functions(&self) -> &[FunctionDeclaration] {
        &self.functions
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Send one user message and return the model's final text.
    pub async fn send_message(&mut self, text: &str) -> Result<String, ClientError> {
        let checkpoint = self.history.len();
        let result = self.run_turn(text).await;
        if result.is_err() {
            self.history.truncate(checkpoint);
        }
        result
    }

    #[instrument(skip_all)]
    async fn run_turn(&mut self, text: &str) -> Result<String, ClientError> {
        self.history.push(Content::user_text(text));

        for _ in 0..=self.max_tool_rounds {
            let reply = self.model.generate(&self.history, &self.functions).await?;
            let calls: Vec<_> = reply.function_calls().into_iter().cloned().collect();
            self.history.push(reply);

            if calls.is_empty() {
                return Ok(self.history.last().map(Content::text).unwrap_or_default());
            }

            let mut responses = Vec::with_capacity(calls.len());
            for call in calls {
                info!("Model called {}", call.name);
                let response = match self.backend.call_tool(&call.name, call.args).await {
                    Ok(payload) => payload,
                    // Tool failures go back to the model, not to the user.
                    Err(e) => {
                        warn!("Tool {} failed: {}", call.name, e);
                        serde_json::json!({ "error": e.to_string() })
                    }
                };
                responses.push(FunctionResponse {
                    name: call.name,
                    response,
                });
            }
            self.history.push(Content::function_responses(responses));
        }

        Err(ClientError::ToolRoundsExceeded(self.max_tool_rounds))
    }
}
