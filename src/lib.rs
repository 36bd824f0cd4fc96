//! User Store API
//!
//! A REST backend for a single `User` entity, served through two
//! interchangeable persistence strategies:
//! - a mapped store built on Diesel
//! - a raw store issuing hand-written, parameterized SQL through sqlx

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::StorageBackend;
use infrastructure::persistence::Database;
use infrastructure::user::{DieselUserStore, InMemoryUserStore, RawUserStore};
use tracing::{info, warn};

/// Application state plus the database handle backing it, if any
///
/// The handle is kept apart from the state so the caller can close it once
/// the server has drained.
pub struct AppContext {
    pub state: AppState,
    pub database: Option<Database>,
}

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppContext> {
    let diagnostics = config.diagnostics();

    let Some(database_url) = config.storage.postgres_url() else {
        if config.storage.backend == StorageBackend::Postgres {
            warn!("no database URL configured, falling back to in-memory storage");
        }
        info!("Storage backend: in-memory");

        let store = Arc::new(InMemoryUserStore::new());
        return Ok(AppContext {
            state: AppState::new(store.clone(), store, diagnostics),
            database: None,
        });
    };

    info!("Storage backend: PostgreSQL");
    let database = Database::connect_lazy(&config.storage.pool_config(database_url))
        .map_err(|e| anyhow::anyhow!("Failed to configure PostgreSQL pools: {}", e))?;

    if config.storage.ensure_schema {
        if let Err(e) = database.ensure_schema().await {
            warn!(error = %e, "could not ensure the users table exists");
        }
    }

    let state = AppState::new(
        Arc::new(DieselUserStore::new(database.diesel_pool())),
        Arc::new(RawUserStore::new(database.raw_pool())),
        diagnostics,
    );

    Ok(AppContext {
        state,
        database: Some(database),
    })
}
