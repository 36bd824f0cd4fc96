//! User store strategies
//!
//! `DieselUserStore` maps rows through Diesel, `RawUserStore` issues
//! hand-written SQL through sqlx and `InMemoryUserStore` keeps everything in
//! process. `UserService` puts the input pipeline in front of any of them.

mod in_memory;
mod mapped_store;
mod query_builder;
mod raw_store;
mod service;
#[cfg(test)]
mod store_contract;

pub use in_memory::InMemoryUserStore;
pub use mapped_store::DieselUserStore;
pub use query_builder::{build_search_query, BindValue, SearchQuery, USER_COLUMNS};
pub use raw_store::RawUserStore;
pub use service::UserService;
