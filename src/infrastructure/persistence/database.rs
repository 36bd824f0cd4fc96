//! Shared database handle

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

use super::error_mapping::map_sqlx_error;
use super::pool::{raw_pool_lazy, DieselPool, PoolConfig, PoolError};

/// DDL for the `users` table, applied by [`Database::ensure_schema`]
pub const USERS_TABLE_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        name VARCHAR(100) NOT NULL,
        age INTEGER,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Connection resources for both store strategies
///
/// Created once at startup and handed to the stores by cloning the pools.
/// [`Database::close`] consumes the handle, so teardown happens at most once.
#[derive(Debug)]
pub struct Database {
    raw: PgPool,
    diesel: DieselPool,
}

impl Database {
    /// Build both pools without opening a connection
    pub fn connect_lazy(config: &PoolConfig) -> Result<Self, PoolError> {
        let raw = raw_pool_lazy(config)?;
        let diesel = DieselPool::new_lazy(config);

        Ok(Self { raw, diesel })
    }

    /// Pool used by the raw SQL strategy
    pub fn raw_pool(&self) -> PgPool {
        self.raw.clone()
    }

    /// Pool used by the Diesel strategy
    pub fn diesel_pool(&self) -> DieselPool {
        self.diesel.clone()
    }

    /// Create the `users` table when it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(USERS_TABLE_DDL)
            .execute(&self.raw)
            .await
            .map_err(|e| map_sqlx_error(e, "ensure users table"))?;

        info!("users table is present");
        Ok(())
    }

    /// Close every pooled connection
    ///
    /// Waits for checked-out sqlx connections to be returned; the Diesel pool
    /// releases its connections once the last clone is dropped.
    pub async fn close(self) {
        self.raw.close().await;
        drop(self.diesel);
        info!("database connections closed");
    }
}
