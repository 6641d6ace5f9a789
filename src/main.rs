//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, opens the database pool and
//! serves the tools over the configured transport. The pool is closed once
//! the transport stops.

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use incident_mcp_server::core::config::LoggingConfig;
use incident_mcp_server::core::{Config, Database, McpServer, TransportService};
use incident_mcp_server::domains::tools::ToolContext;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging first, so configuration warnings are visible
    init_logging(&LoggingConfig::from_env().level);

    let config = Config::from_env();

    info!("Starting {} v{}", config.server.name, config.server.version);

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let database = match Database::connect(&config.database).await {
        Ok(database) => database,
        Err(e) => {
            error!("Database initialization failed: {}", e);
            eprintln!("DB pool init failed: {}", e);
            std::process::exit(1);
        }
    };

    let context = ToolContext::new(database.clone(), &config.tables)?;
    let server = McpServer::new(config.clone(), context);

    info!("Server initialized");

    let transport = TransportService::new(config.transport.clone());
    let result = transport.run(server).await;

    info!("Server shutting down");
    database.close().await;

    result?;
    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so the STDIO transport keeps stdout for protocol
/// messages.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
