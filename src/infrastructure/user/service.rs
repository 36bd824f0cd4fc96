//! User service: input pipeline in front of a store strategy

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{
    validate_and_sanitize, SearchFilter, User, UserId, UserInput, UserSearchStore, UserStats,
    UserStore,
};
use crate::domain::DomainError;

/// Runs boundary input through sanitation and validation, then delegates to
/// the wrapped store
///
/// `S` is usually a trait object, `dyn UserStore` for the mapped routes and
/// `dyn UserSearchStore` for the raw routes.
#[derive(Debug)]
pub struct UserService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: UserStore + ?Sized> UserService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.store.get_all().await
    }

    /// Get a user, treating an absent row as `NotFound`
    pub async fn get(&self, id: UserId) -> Result<User, DomainError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    pub async fn create(&self, input: &UserInput) -> Result<User, DomainError> {
        let user = validate_and_sanitize(input)?;
        let created = self.store.create(&user).await?;

        info!(id = %created.id(), "user created");
        Ok(created)
    }

    pub async fn update(&self, id: UserId, input: &UserInput) -> Result<User, DomainError> {
        let user = validate_and_sanitize(input)?;
        let updated = self.store.update(id, &user).await?;

        info!(%id, "user updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        self.store.delete(id).await?;

        info!(%id, "user deleted");
        Ok(())
    }

    pub async fn check_connection(&self) -> bool {
        self.store.check_connection().await
    }
}

impl<S: UserSearchStore + ?Sized> UserService<S> {
    pub async fn stats(&self) -> Result<Vec<UserStats>, DomainError> {
        self.store.get_users_with_stats().await
    }

    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<User>, DomainError> {
        debug!(?filter, "searching users");
        self.store.search_users(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{AgeInput, MockUserStore};
    use crate::infrastructure::user::InMemoryUserStore;
    use chrono::Utc;

    fn create_service() -> UserService<InMemoryUserStore> {
        UserService::new(Arc::new(InMemoryUserStore::new()))
    }

    fn input(email: &str, name: &str, age: Option<AgeInput>) -> UserInput {
        UserInput::new(email, name, age)
    }

    #[tokio::test]
    async fn test_create_sanitizes_before_storing() {
        let service = create_service();

        let user = service
            .create(&input("  Ada@Example.COM ", "  Ada  ", Some(AgeInput::from("36"))))
            .await
            .unwrap();

        assert_eq!(user.email(), "ada@example.com");
        assert_eq!(user.name(), "Ada");
        assert_eq!(user.age(), Some(36));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_store() {
        let mut store = MockUserStore::new();
        store.expect_create().never();
        store.expect_update().never();
        let service = UserService::new(Arc::new(store));

        let err = service.create(&UserInput::default()).await.unwrap_err();
        match err {
            DomainError::Validation { violations } => {
                assert!(violations.contains(&"Email is required".to_string()));
                assert!(violations.contains(&"Name is required".to_string()));
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let err = service
            .update(UserId::new(1).unwrap(), &input("a@b.co", "A", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_store_errors_pass_through() {
        let mut store = MockUserStore::new();
        store
            .expect_create()
            .times(1)
            .returning(|_| Err(DomainError::duplicate("Email already exists")));
        let service = UserService::new(Arc::new(store));

        let err = service
            .create(&input("a@b.co", "Al", None))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::duplicate("Email already exists"));
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let mut store = MockUserStore::new();
        store.expect_get_by_id().returning(|_| Ok(None));
        let service = UserService::new(Arc::new(store));

        let err = service.get(UserId::new(7).unwrap()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_returns_stored_user() {
        let now = Utc::now();
        let stored = User::from_parts(UserId::new(3).unwrap(), "a@b.co", "Al", None, now, now);
        let expected = stored.clone();

        let mut store = MockUserStore::new();
        store
            .expect_get_by_id()
            .withf(|id| id.value() == 3)
            .returning(move |_| Ok(Some(stored.clone())));
        let service = UserService::new(Arc::new(store));

        assert_eq!(service.get(UserId::new(3).unwrap()).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_creates() {
        let service = create_service();
        let first = input("same@example.com", "First", None);
        let second = input("SAME@example.com", "Second", None);

        let (a, b) = tokio::join!(service.create(&first), service.create(&second));

        let outcomes = [a, b];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(DomainError::Duplicate { .. }))));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_and_stats_on_search_store() {
        let store: Arc<dyn UserSearchStore> = Arc::new(InMemoryUserStore::new());
        let service = UserService::new(store);

        let ada = input("ada@example.com", "Ada", Some(AgeInput::Integer(36)));
        let bob = input("bob@example.com", "Bob", Some(AgeInput::Integer(70)));
        service.create(&ada).await.unwrap();
        service.create(&bob).await.unwrap();

        let found = service
            .search(&SearchFilter::default().with_age_range(None, Some(40)))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Ada");

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_user() {
        let service = create_service();
        let err = service
            .delete(UserId::new(99_999_999).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
