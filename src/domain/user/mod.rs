//! User domain
//!
//! Entity, boundary input, sanitation/validation and the store contract
//! implemented by every persistence strategy.

mod entity;
mod filter;
mod input;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId, UserStats};
pub use filter::{SearchFilter, SearchParams, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use input::{AgeInput, AgeValue, NormalizedInput, UserInput};
pub use repository::{UserSearchStore, UserStore};
pub use validation::{sanitize, validate, validate_and_sanitize, UserValidationError};

#[cfg(test)]
pub use repository::MockUserStore;
