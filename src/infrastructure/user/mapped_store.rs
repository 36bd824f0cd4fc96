//! Diesel-backed user store
//!
//! Field mapping is delegated to Diesel's derived `Queryable`, `Insertable`
//! and `AsChangeset` implementations; no SQL text is written here.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::user::{NewUser, User, UserId, UserStore};
use crate::domain::DomainError;
use crate::infrastructure::persistence::schema::users;
use crate::infrastructure::persistence::{
    map_diesel_error, map_pool_error, DieselPool, NewUserRow, UserChangeset, UserRow,
};

/// Object-relational implementation of `UserStore`
#[derive(Debug, Clone)]
pub struct DieselUserStore {
    pool: DieselPool,
}

impl DieselUserStore {
    pub fn new(pool: DieselPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order((users::created_at.desc(), users::id.desc()))
            .load(&mut conn)
            .await
            .map_err(|e| map_diesel_error(e, "list users"))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.value())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| map_diesel_error(e, "get user"))?;

        Ok(row.map(User::from))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| map_diesel_error(e, "create user"))?;

        debug!(id = row.id, "user created");
        Ok(User::from(row))
    }

    async fn update(&self, id: UserId, user: &NewUser) -> Result<User, DomainError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::update(users::table.find(id.value()))
            .set((UserChangeset::from(user), users::updated_at.eq(now)))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| map_diesel_error(e, "update user"))?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        debug!(id = row.id, "user updated");
        Ok(User::from(row))
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.find(id.value()))
            .execute(&mut conn)
            .await
            .map_err(|e| map_diesel_error(e, "delete user"))?;

        if deleted == 0 {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        debug!(%id, "user deleted");
        Ok(())
    }

    async fn check_connection(&self) -> bool {
        let Ok(mut conn) = self.pool.get().await else {
            return false;
        };

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .is_ok()
    }
}
