//! Row structs and the mapping between storage rows and the domain `User`
//!
//! These types never leave the persistence layer except as the raw-row
//! representation served by the raw SQL endpoints.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

use crate::domain::user::{NewUser, User, UserId};

use super::schema::users;

/// A full row of the `users` table
///
/// Serializes with the storage column names (`created_at`, `updated_at`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::from_parts(
            UserId::from_storage(row.id),
            row.email,
            row.name,
            row.age,
            row.created_at,
            row.updated_at,
        )
    }
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            age: user.age(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Insertable values for a new user; timestamps come from column defaults
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub age: Option<i32>,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            email: user.email(),
            name: user.name(),
            age: user.age(),
        }
    }
}

/// Full-replace changeset; a missing age clears the column
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserChangeset<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub age: Option<i32>,
}

impl<'a> From<&'a NewUser> for UserChangeset<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            email: user.email(),
            name: user.name(),
            age: user.age(),
        }
    }
}
