//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::security::{IdentifierError, TableRef};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Database connection configuration.
    pub database: DatabaseConfig,

    /// Locations of the incident and knowledge-base tables.
    pub tables: TablesConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL` (and `.env`) on its own.
    ///
    /// Lets the subscriber be installed before the rest of the configuration
    /// is loaded, so warnings raised while loading it are not lost.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        logging
    }
}

/// MySQL connection pool configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,

    /// Upper bound on pooled connections.
    pub max_connections: u32,

    /// How long a tool call waits for a free connection, in seconds.
    pub acquire_timeout_secs: u64,
}

/// Custom Debug implementation to redact the password from logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: "root".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 30,
        }
    }
}

/// Where the incident and knowledge-base rows live, as `schema.table`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesConfig {
    pub incidents: String,
    pub knowledge_base: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            incidents: "incident.incidents".to_string(),
            knowledge_base: "knowledge_base.kb".to_string(),
        }
    }
}

impl TablesConfig {
    pub fn incidents_table(&self) -> Result<TableRef, IdentifierError> {
        TableRef::parse(&self.incidents)
    }

    pub fn knowledge_base_table(&self) -> Result<TableRef, IdentifierError> {
        TableRef::parse(&self.knowledge_base)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "db_tools".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            database: DatabaseConfig::default(),
            tables: TablesConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_DB_HOST`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        config.transport = TransportConfig::from_env();

        if let Ok(host) = std::env::var("MCP_DB_HOST") {
            config.database.host = host;
        }
        if let Some(port) = parse_env("MCP_DB_PORT") {
            config.database.port = port;
        }
        if let Ok(user) = std::env::var("MCP_DB_USER") {
            config.database.user = user;
        }
        if let Ok(password) = std::env::var("MCP_DB_PASSWORD") {
            config.database.password = password;
            info!("Database password loaded from environment");
        } else {
            warn!("MCP_DB_PASSWORD not set - using the default development password");
        }
        if let Some(max) = parse_env("MCP_DB_MAX_CONNECTIONS") {
            config.database.max_connections = max;
        }
        if let Some(secs) = parse_env("MCP_DB_ACQUIRE_TIMEOUT_SECS") {
            config.database.acquire_timeout_secs = secs;
        }

        if let Ok(table) = std::env::var("MCP_INCIDENT_TABLE") {
            config.tables.incidents = table;
        }
        if let Ok(table) = std::env::var("MCP_KB_TABLE") {
            config.tables.knowledge_base = table;
        }

        config
    }

    /// Check the parts of the configuration that end up inside SQL text.
    pub fn validate(&self) -> Result<(), IdentifierError> {
        self.tables.incidents_table()?;
        self.tables.knowledge_base_table()?;
        Ok(())
    }
}

/// Read and parse an environment variable, warning when it is malformed.
fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: cannot parse '{}'", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_database_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_DB_HOST", "db.internal");
            std::env::set_var("MCP_DB_PORT", "3307");
            std::env::set_var("MCP_DB_MAX_CONNECTIONS", "not-a-number");
        }
        let config = Config::from_env();
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 3307);
        assert_eq!(config.database.max_connections, 10);
        unsafe {
            std::env::remove_var("MCP_DB_HOST");
            std::env::remove_var("MCP_DB_PORT");
            std::env::remove_var("MCP_DB_MAX_CONNECTIONS");
        }
    }

    #[test]
    fn test_logging_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
        }
        assert_eq!(LoggingConfig::from_env().level, "debug");
        assert_eq!(Config::from_env().logging.level, "debug");
        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
        }
        assert_eq!(LoggingConfig::from_env().level, "info");
    }

    #[test]
    fn test_defaults_match_fixed_target() {
        let config = Config::default();
        assert_eq!(config.server.name, "db_tools");
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.user, "root");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let db = DatabaseConfig {
            password: "super_secret_pw".to_string(),
            ..Default::default()
        };
        let debug_str = format!("{:?}", db);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_pw"));
    }

    #[test]
    fn test_invalid_table_location_fails_validation() {
        let mut config = Config::default();
        config.tables.incidents = "incident.incidents; DROP".to_string();
        assert!(config.validate().is_err());
    }
}
