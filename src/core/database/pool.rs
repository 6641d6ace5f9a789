//! Connection pool lifecycle.

use sqlx::MySql;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use tracing::{info, instrument};

use crate::core::config::DatabaseConfig;

/// Errors raised while creating or using the pool itself.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The pool could not open its first connection.
    #[error("Failed to connect to MySQL at {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: sqlx::Error,
    },
}

/// Owned handle to the MySQL connection pool.
///
/// Created once in `main`, cloned into every tool route. Clones share the
/// same underlying pool. Statements run with MySQL's default auto-commit, so
/// every statement commits on its own.
#[derive(Debug, Clone)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Build the pool and open one connection to prove the target is reachable.
    #[instrument(skip_all, fields(host = %config.host, port = config.port))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = pool_options(config)
            .connect_with(connect_options(config))
            .await
            .map_err(|source| DatabaseError::Connect {
                address: format!("{}:{}", config.host, config.port),
                source,
            })?;

        info!(
            "Database pool initialized (max {} connections)",
            config.max_connections
        );
        Ok(Self { pool })
    }

    /// Build the pool without opening any connection.
    ///
    /// The first `acquire` connects. Useful when the caller must not touch
    /// the server up front.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = pool_options(config).connect_lazy_with(connect_options(config));
        Self { pool }
    }

    /// Check out one connection. It returns to the pool when dropped.
    pub async fn acquire(&self) -> Result<PoolConnection<MySql>, sqlx::Error> {
        self.pool.acquire().await
    }

    /// Round-trip a trivial statement.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to come back.
    pub async fn close(&self) {
        info!("Closing database pool...");
        self.pool.close().await;
        info!("Database pool closed.");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
}

fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
}
