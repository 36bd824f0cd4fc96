//! Connection pools backing the two store strategies
//!
//! The Diesel strategy runs on `diesel-async` over a `bb8` pool; the raw
//! strategy runs on a `sqlx` pool. Both are built lazily: no connection is
//! opened until the first query, so a process can start while the database
//! is still coming up.

use std::time::Duration;

use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Errors that can occur during pool operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Sizing and timeouts shared by both pools
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_connections: u32,
    min_connections: u32,
    connect_timeout: Duration,
    idle_timeout: Duration,
}

impl PoolConfig {
    /// Defaults: 10 connections max, none kept idle, 30s checkout timeout,
    /// 10 minute idle timeout
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            min_connections: 0,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    fn min_idle(&self) -> Option<u32> {
        (self.min_connections > 0).then_some(self.min_connections.min(self.max_connections))
    }
}

/// Async Diesel connection pool
#[derive(Clone)]
pub struct DieselPool {
    inner: Pool<AsyncPgConnection>,
}

impl DieselPool {
    /// Build the pool without opening any connection
    pub fn new_lazy(config: &PoolConfig) -> Self {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());

        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(config.min_idle())
            .connection_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .build_unchecked(manager);

        Self { inner: pool }
    }

    /// Check out a connection, waiting at most the configured timeout
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

impl std::fmt::Debug for DieselPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state();
        f.debug_struct("DieselPool")
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

/// Build the sqlx pool used by the raw SQL strategy without connecting
pub fn raw_pool_lazy(config: &PoolConfig) -> Result<PgPool, PoolError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .connect_lazy(config.database_url())
        .map_err(|err| PoolError::build(err.to_string()))
}
