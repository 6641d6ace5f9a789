//! Interactive chat client.
//!
//! Connects a Gemini model to the tool server: the server's tools are
//! declared to the model, and every function call the model makes is run
//! through `tools/call` before the model answers.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mcp;
pub mod repl;
pub mod schema;
pub mod session;

pub use config::ChatConfig;
pub use error::ClientError;
pub use gemini::{ChatModel, GeminiClient};
pub use mcp::{McpClient, ToolBackend};
pub use session::ChatSession;
