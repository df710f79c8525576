//! Database module for handling connection configuration and pooling
//!
//! This module provides connection pooling, configuration, and health checks.
//! Connections go through the sqlx `Any` driver so the same queries run
//! against PostgreSQL in production and SQLite for local runs and tests.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::{
    Any, AnyPool,
    any::{AnyPoolOptions, install_default_drivers},
};
use std::{env, time::Duration};
use tracing::{error, info};

/// Storage engine behind a database URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    /// Detect the backend from the scheme of a database URL
    pub fn from_url(url: &str) -> DatabaseResult<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Backend::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else {
            Err(DatabaseError::Configuration(format!(
                "Unsupported database URL scheme: {}",
                url.split(':').next().unwrap_or_default()
            )))
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections in the pool
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub connection_timeout: u64,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: PostgreSQL or SQLite connection URL
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum number of connections (default: 10)
    /// - `DATABASE_MIN_CONNECTIONS`: Minimum number of connections (default: 1)
    /// - `DATABASE_CONNECTION_TIMEOUT`: Acquire timeout in seconds (default: 30)
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url = env::var("DATABASE_URL").map_err(|_| {
            DatabaseError::Configuration("DATABASE_URL environment variable not set".to_string())
        })?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let min_connections = env::var("DATABASE_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        let connection_timeout = env::var("DATABASE_CONNECTION_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            max_connections,
            min_connections,
            connection_timeout,
        })
    }

    /// Configuration for a private in-memory SQLite database
    ///
    /// The pool holds exactly one connection that is never recycled, since
    /// every new SQLite memory connection opens an empty database.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connection_timeout: 30,
        }
    }

    /// Storage engine selected by `database_url`
    pub fn backend(&self) -> DatabaseResult<Backend> {
        Backend::from_url(&self.database_url)
    }
}

/// Initialize a connection pool
///
/// # Arguments
/// * `config` - Database configuration
///
/// # Returns
/// * `DatabaseResult<AnyPool>` - Connection pool or error
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<AnyPool> {
    let backend = config.backend()?;
    install_default_drivers();

    info!("Initializing {:?} connection pool", backend);

    let mut options = AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout));

    if backend == Backend::Sqlite {
        options = options.idle_timeout(None).max_lifetime(None);
    }

    let pool = options
        .connect(&config.database_url)
        .await
        .map_err(DatabaseError::Connection)?;

    info!("Database connection pool initialized successfully");
    Ok(pool)
}

/// Check database connectivity
///
/// # Arguments
/// * `executor` - Pool or session connection to run `SELECT 1` on
///
/// # Returns
/// * `DatabaseResult<bool>` - True if the database is reachable, false otherwise
pub async fn health_check<'e, E>(executor: E) -> DatabaseResult<bool>
where
    E: sqlx::Executor<'e, Database = Any>,
{
    match sqlx::query("SELECT 1").execute(executor).await {
        Ok(_) => Ok(true),
        Err(e) => {
            error!("Database health check failed: {}", e);
            Ok(false)
        }
    }
}
