//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP, selected with `MCP_TRANSPORT=stdio`.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult, shutdown_signal};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until the peer disconnects or a shutdown
    /// signal arrives.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        tokio::select! {
            result = service.waiting() => {
                result.map_err(|e| TransportError::ServiceError(e.to_string()))?;
            }
            _ = shutdown_signal() => {}
        }

        info!("STDIO transport finished");
        Ok(())
    }
}
