//! Domain layer - the user entity, its validation rules and the store contract

pub mod error;
pub mod user;

pub use error::DomainError;
