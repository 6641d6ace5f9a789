//! Chat client entry point.
//!
//! Reads prompts from stdin, lets Gemini answer them with the tool server's
//! tools, and prints each reply.

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use incident_mcp_server::client::{ChatConfig, ChatSession, GeminiClient, McpClient, repl};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = ChatConfig::from_env()?;
    tracing::debug!("Chat configuration: {:?}", config);

    let http = config.http_client()?;
    let tools = McpClient::new(http.clone(), config.server_url.clone());
    tools
        .initialize()
        .await
        .with_context(|| format!("cannot reach tool server at {}", config.server_url))?;

    let model = GeminiClient::new(http, &config);
    let mut session = ChatSession::start(model, tools, config.max_tool_rounds).await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    repl::run(&mut session, stdin, &mut stdout).await?;

    Ok(())
}

/// Warnings only by default, on stderr, so logs stay out of the transcript.
fn init_logging() {
    let filter = EnvFilter::from_default_env().add_directive(Level::WARN.into());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
