//! API layer - HTTP endpoints

pub mod health;
pub mod raw_users;
pub mod router;
pub mod state;
pub mod types;
pub mod users;
pub mod welcome;

pub use router::create_router;
pub use state::AppState;
