//! Incident MCP Server Library
//!
//! Exposes incident-management and knowledge-base tables in MySQL as Model
//! Context Protocol tools, plus a chat client that lets a Gemini model use
//! them.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the database pool, the MCP
//!   server handler and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the seven database tools
//! - **client**: the Gemini chat client (feature `http`)
//!
//! # Example
//!
//! ```rust,no_run
//! use incident_mcp_server::core::{Config, Database, McpServer, TransportService};
//! use incident_mcp_server::domains::tools::ToolContext;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let database = Database::connect(&config.database).await?;
//!     let context = ToolContext::new(database.clone(), &config.tables)?;
//!     let server = McpServer::new(config.clone(), context);
//!     TransportService::new(config.transport).run(server).await?;
//!     database.close().await;
//!     Ok(())
//! }
//! ```

#[cfg(feature = "http")]
pub mod client;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Database, Error, McpServer, Result};
