//! Hand-written SQL user store

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{PgPool, Postgres, Row};
use tracing::debug;

use crate::domain::user::{
    NewUser, SearchFilter, User, UserId, UserSearchStore, UserStats, UserStore,
};
use crate::domain::DomainError;
use crate::infrastructure::persistence::{map_sqlx_error, UserRow};

use super::query_builder::{build_search_query, BindValue};

/// Raw SQL implementation of `UserStore` and `UserSearchStore`
///
/// Every statement uses numbered placeholders; values are always bound.
#[derive(Debug, Clone)]
pub struct RawUserStore {
    pool: PgPool,
}

impl RawUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for RawUserStore {
    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, name, age, created_at, updated_at
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "list users"))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, age, created_at, updated_at
            FROM users
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "get user"))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, name, age, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, email, name, age, created_at, updated_at
            "#,
        )
        .bind(user.email())
        .bind(user.name())
        .bind(user.age())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "create user"))?;

        let created = row_to_user(&row)?;
        debug!(id = %created.id(), "user created");
        Ok(created)
    }

    async fn update(&self, id: UserId, user: &NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET email = $1, name = $2, age = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, email, name, age, created_at, updated_at
            "#,
        )
        .bind(user.email())
        .bind(user.name())
        .bind(user.age())
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "update user"))?
        .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        debug!(%id, "user updated");
        row_to_user(&row)
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "delete user"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        debug!(%id, "user deleted");
        Ok(())
    }

    async fn check_connection(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}

#[async_trait]
impl UserSearchStore for RawUserStore {
    async fn get_users_with_stats(&self) -> Result<Vec<UserStats>, DomainError> {
        // There is no posts table; the aggregate is a constant zero
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, created_at, 0::BIGINT AS post_count
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "list users with stats"))?;

        rows.iter().map(row_to_stats).collect()
    }

    async fn search_users(&self, filter: &SearchFilter) -> Result<Vec<User>, DomainError> {
        let search = build_search_query(filter);
        debug!(sql = %search.sql, params = search.params.len(), "searching users");

        let query = search
            .params
            .into_iter()
            .fold(sqlx::query(&search.sql), bind_value);

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "search users"))?;

        rows.iter().map(row_to_user).collect()
    }
}

fn bind_value(
    query: sqlx::query::Query<'_, Postgres, PgArguments>,
    value: BindValue,
) -> sqlx::query::Query<'_, Postgres, PgArguments> {
    match value {
        BindValue::Text(text) => query.bind(text),
        BindValue::Int(int) => query.bind(int),
        BindValue::BigInt(int) => query.bind(int),
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let row = UserRow {
        id: row.try_get("id").map_err(|e| map_sqlx_error(e, "decode id"))?,
        email: row.try_get("email").map_err(|e| map_sqlx_error(e, "decode email"))?,
        name: row.try_get("name").map_err(|e| map_sqlx_error(e, "decode name"))?,
        age: row.try_get("age").map_err(|e| map_sqlx_error(e, "decode age"))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| map_sqlx_error(e, "decode created_at"))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| map_sqlx_error(e, "decode updated_at"))?,
    };

    Ok(User::from(row))
}

fn row_to_stats(row: &PgRow) -> Result<UserStats, DomainError> {
    let id: i64 = row.try_get("id").map_err(|e| map_sqlx_error(e, "decode id"))?;

    Ok(UserStats {
        id: UserId::from_storage(id),
        name: row.try_get("name").map_err(|e| map_sqlx_error(e, "decode name"))?,
        email: row.try_get("email").map_err(|e| map_sqlx_error(e, "decode email"))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| map_sqlx_error(e, "decode created_at"))?,
        post_count: row
            .try_get("post_count")
            .map_err(|e| map_sqlx_error(e, "decode post_count"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::user::store_contract as contract;

    async fn store() -> RawUserStore {
        RawUserStore::new(contract::connect().await.raw_pool())
    }

    #[tokio::test]
    async fn test_check_connection_fails_without_server() {
        let store = RawUserStore::new(contract::unreachable().raw_pool());
        assert!(!store.check_connection().await);
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_check_connection() {
        assert!(store().await.check_connection().await);
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_create_get_and_list_newest_first() {
        contract::create_get_and_list_newest_first(&store().await).await;
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_duplicate_email_ignores_case() {
        contract::duplicate_email_ignores_case(&store().await).await;
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_concurrent_duplicates_yield_one_row() {
        contract::concurrent_duplicates_yield_one_row(&store().await).await;
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_long_email_is_stored() {
        contract::long_email_is_stored(&store().await).await;
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_update_replaces_fields_and_bumps_timestamp() {
        contract::update_replaces_fields_and_bumps_timestamp(&store().await).await;
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_missing_rows_are_not_found() {
        contract::missing_rows_are_not_found(&store().await).await;
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_delete_removes_row() {
        contract::delete_removes_row(&store().await).await;
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_search_pages_newest_first() {
        contract::search_pages_newest_first(&store().await).await;
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_search_age_bounds_are_inclusive() {
        contract::search_age_bounds_are_inclusive(&store().await).await;
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_search_term_matches_literally() {
        contract::search_term_matches_literally(&store().await).await;
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_stats_carry_zero_post_count() {
        contract::stats_carry_zero_post_count(&store().await).await;
    }
}
