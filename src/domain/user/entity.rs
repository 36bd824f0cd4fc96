//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// User identifier - a positive integer assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Create a new UserId, rejecting zero and negative values
    pub fn new(id: i64) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::invalid_id(
                "Invalid ID format. ID must be a positive number",
            ));
        }
        Ok(Self(id))
    }

    /// Parse an identifier received as a path or query string
    ///
    /// The whole (trimmed) string must be a positive decimal integer.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| DomainError::invalid_id("Invalid ID format. ID must be a positive number"))
            .and_then(Self::new)
    }

    /// Wrap an ID read back from a store, which only ever assigns positive values
    pub(crate) fn from_storage(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User entity
///
/// Serializes to the public record shape
/// `{id, email, name, age, createdAt, updatedAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: String,
    name: String,
    age: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Rebuild a user from persisted state
    pub fn from_parts(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        age: Option<i32>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            age,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the mutable fields with a validated record and refresh `updated_at`
    pub fn apply(&mut self, changes: &NewUser) {
        self.email = changes.email().to_string();
        self.name = changes.name().to_string();
        self.age = changes.age();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

/// A sanitized record that has passed validation
///
/// The only constructor lives in the validation module, so holding a
/// `NewUser` means the data satisfies every field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    email: String,
    name: String,
    age: Option<i32>,
}

impl NewUser {
    pub(super) fn new(email: String, name: String, age: Option<i32>) -> Self {
        Self { email, name, age }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }
}

/// User with its aggregate post count, as returned by the stats query
///
/// No posts entity exists, so `post_count` is always zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub post_count: i64,
}

impl From<&User> for UserStats {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at(),
            post_count: 0,
        }
    }
}
