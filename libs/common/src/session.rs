//! Per-request database sessions
//!
//! A [`SessionProvider`] owns the lazily constructed [`SessionFactory`] and
//! hands out one [`Session`] per unit of work. A session is a pooled
//! connection: dropping it returns the connection to the pool, so release
//! happens on every exit path.

use std::sync::Arc;

use sqlx::{
    Any, AnyConnection, AnyPool, Connection, Transaction,
    pool::PoolConnection,
};
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::{
    database::{self, Backend, DatabaseConfig},
    error::{DatabaseError, DatabaseResult},
};

/// Produces sessions from a connection pool
#[derive(Debug, Clone)]
pub struct SessionFactory {
    pool: AnyPool,
    backend: Backend,
}

impl SessionFactory {
    /// Build the factory and open its connection pool
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let backend = config.backend()?;
        let pool = database::init_pool(config).await?;
        Ok(Self { pool, backend })
    }

    /// Open a new session
    pub async fn session(&self) -> DatabaseResult<Session> {
        if self.pool.is_closed() {
            return Err(DatabaseError::FactoryClosed);
        }

        let conn = self.pool.acquire().await.map_err(|e| match e {
            sqlx::Error::PoolClosed => DatabaseError::FactoryClosed,
            e => DatabaseError::Connection(e),
        })?;

        debug!("Session opened");
        Ok(Session { conn })
    }

    /// Storage engine the pool is connected to
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Underlying pool, for health checks
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Whether the pool has been closed by shutdown
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Close the pool, waiting for checked-out sessions to be released.
    /// Returns whether this call performed the close.
    async fn close(&self) -> bool {
        if self.pool.is_closed() {
            return false;
        }
        self.pool.close().await;
        true
    }
}

/// One unit of work against the database
///
/// Exclusively owned by the request that opened it.
#[derive(Debug)]
pub struct Session {
    conn: PoolConnection<Any>,
}

impl Session {
    /// Connection for statements that run outside an explicit transaction
    pub fn connection(&mut self) -> &mut AnyConnection {
        &mut *self.conn
    }

    /// Begin a transaction on this session
    ///
    /// The transaction rolls back when dropped without `commit`, so an
    /// error propagated with `?` never leaves it half applied.
    pub async fn begin(&mut self) -> DatabaseResult<Transaction<'_, Any>> {
        Connection::begin(&mut *self.conn)
            .await
            .map_err(DatabaseError::Query)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("Session released");
    }
}

/// Hands out sessions from a factory built on first use
///
/// Cloning is cheap; clones share the same factory.
#[derive(Debug, Clone)]
pub struct SessionProvider {
    config: DatabaseConfig,
    factory: Arc<OnceCell<SessionFactory>>,
}

impl SessionProvider {
    /// Create a provider; no connection is opened until the first request
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            factory: Arc::new(OnceCell::new()),
        }
    }

    /// Get the session factory, constructing it on first call
    ///
    /// Concurrent first calls construct a single factory. A failed
    /// construction is logged and returned; the next call tries again.
    pub async fn factory(&self) -> DatabaseResult<&SessionFactory> {
        self.factory
            .get_or_try_init(|| async {
                match SessionFactory::connect(&self.config).await {
                    Ok(factory) => {
                        info!("Session factory created ({:?})", factory.backend());
                        Ok(factory)
                    }
                    Err(e) => {
                        error!("Failed to create session factory: {}", e);
                        Err(e)
                    }
                }
            })
            .await
    }

    /// Open a new session from the factory
    pub async fn session(&self) -> DatabaseResult<Session> {
        self.factory().await?.session().await
    }

    /// Whether the factory has been constructed
    pub fn is_initialized(&self) -> bool {
        self.factory.initialized()
    }

    /// Close the factory if it is open
    ///
    /// Safe to call repeatedly, and a no-op when no factory was ever built.
    pub async fn shutdown(&self) {
        if let Some(factory) = self.factory.get() {
            if factory.close().await {
                info!("Session factory closed");
            }
        }
    }
}
