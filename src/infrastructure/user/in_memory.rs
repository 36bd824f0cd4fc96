//! In-memory user store

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::{
    NewUser, SearchFilter, User, UserId, UserSearchStore, UserStats, UserStore,
};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, User>,
    /// Normalized email -> owning user
    email_index: HashMap<String, UserId>,
    /// Last assigned ID; never decremented, so IDs are not reused
    last_id: i64,
}

/// In-memory implementation of `UserStore` and `UserSearchStore`
///
/// Every mutation runs inside a single write section, which gives the same
/// atomic uniqueness guarantee a database unique constraint does.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(users: &mut [User]) {
    users.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}

fn matches_filter(user: &User, filter: &SearchFilter) -> bool {
    let matches_term = filter.search_term().is_none_or(|term| {
        let term = term.to_lowercase();
        user.name().to_lowercase().contains(&term) || user.email().to_lowercase().contains(&term)
    });
    // A missing age never satisfies a bound, as with SQL NULL comparisons
    let above_min = filter
        .min_age
        .is_none_or(|min| user.age().is_some_and(|age| age >= min));
    let below_max = filter
        .max_age
        .is_none_or(|max| user.age().is_some_and(|age| age <= max));

    matches_term && above_min && below_max
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        newest_first(&mut users);
        Ok(users)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut inner = self.inner.write().await;

        if inner.email_index.contains_key(user.email()) {
            return Err(DomainError::duplicate("Email already exists"));
        }

        inner.last_id += 1;
        let id = UserId::from_storage(inner.last_id);
        let now = Utc::now();
        let created = User::from_parts(id, user.email(), user.name(), user.age(), now, now);

        inner.email_index.insert(user.email().to_string(), id);
        inner.users.insert(id, created.clone());

        Ok(created)
    }

    async fn update(&self, id: UserId, user: &NewUser) -> Result<User, DomainError> {
        let mut inner = self.inner.write().await;

        let previous_email = match inner.users.get(&id) {
            Some(existing) => existing.email().to_string(),
            None => return Err(DomainError::not_found(format!("User '{}' not found", id))),
        };

        if inner
            .email_index
            .get(user.email())
            .is_some_and(|owner| *owner != id)
        {
            return Err(DomainError::duplicate("Email already exists"));
        }

        let Inner {
            users, email_index, ..
        } = &mut *inner;

        let Some(existing) = users.get_mut(&id) else {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        };
        existing.apply(user);

        email_index.remove(&previous_email);
        email_index.insert(user.email().to_string(), id);

        Ok(existing.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;

        let removed = inner
            .users
            .remove(&id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;
        inner.email_index.remove(removed.email());

        Ok(())
    }

    async fn check_connection(&self) -> bool {
        true
    }
}

#[async_trait]
impl UserSearchStore for InMemoryUserStore {
    async fn get_users_with_stats(&self) -> Result<Vec<UserStats>, DomainError> {
        let users = self.get_all().await?;
        Ok(users.iter().map(UserStats::from).collect())
    }

    async fn search_users(&self, filter: &SearchFilter) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = {
            let inner = self.inner.read().await;
            inner
                .users
                .values()
                .filter(|user| matches_filter(user, filter))
                .cloned()
                .collect()
        };
        newest_first(&mut users);

        let offset = usize::try_from(filter.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.limit).unwrap_or(usize::MAX);

        Ok(users.into_iter().skip(offset).take(limit).collect())
    }
}
