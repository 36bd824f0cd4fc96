//! User store traits

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{NewUser, User, UserId, UserStats};
use super::filter::SearchFilter;
use crate::domain::DomainError;

/// Persistence contract shared by every user store strategy
///
/// Uniqueness of emails and existence of rows are decided by the store
/// itself, so implementations must rely on atomic checks rather than on a
/// read-then-write sequence.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, newest first
    async fn get_all(&self) -> Result<Vec<User>, DomainError>;

    /// A user by ID, `None` when no row matches
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Persist a new user; fails with `Duplicate` if the email is taken
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Replace email, name and age of an existing user
    ///
    /// Fails with `NotFound` for an unknown ID and `Duplicate` when the email
    /// belongs to another user.
    async fn update(&self, id: UserId, user: &NewUser) -> Result<User, DomainError>;

    /// Hard delete; fails with `NotFound` for an unknown ID
    async fn delete(&self, id: UserId) -> Result<(), DomainError>;

    /// Cheap connectivity check, `false` on any failure
    async fn check_connection(&self) -> bool;
}

/// Richer read queries offered by the raw SQL strategy
#[async_trait]
pub trait UserSearchStore: UserStore {
    /// Every user with its post count aggregate, newest first
    async fn get_users_with_stats(&self) -> Result<Vec<UserStats>, DomainError>;

    /// Filtered, paginated listing, newest first
    async fn search_users(&self, filter: &SearchFilter) -> Result<Vec<User>, DomainError>;
}
