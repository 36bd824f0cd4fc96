//! PostgreSQL persistence plumbing shared by the store strategies

mod database;
mod error_mapping;
mod models;
mod pool;
pub(crate) mod schema;

pub use database::{Database, USERS_TABLE_DDL};
pub use error_mapping::{map_diesel_error, map_pool_error, map_sqlx_error, StorageFailure};
pub use models::UserRow;
pub(crate) use models::{NewUserRow, UserChangeset};
pub use pool::{DieselPool, PoolConfig, PoolError};
