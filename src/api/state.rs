//! Application state shared by the handlers

use std::sync::Arc;

use crate::api::types::ApiError;
use crate::domain::user::{UserSearchStore, UserStore};
use crate::domain::DomainError;
use crate::infrastructure::user::UserService;

/// Services behind the two route trees
///
/// `users` serves `/users` through the mapped strategy, `raw_users` serves
/// `/raw/users` through a strategy that also supports search and stats.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService<dyn UserStore>,
    pub raw_users: UserService<dyn UserSearchStore>,
    /// Expose internal failure messages in error bodies
    pub diagnostics: bool,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        raw_users: Arc<dyn UserSearchStore>,
        diagnostics: bool,
    ) -> Self {
        Self {
            users: UserService::new(users),
            raw_users: UserService::new(raw_users),
            diagnostics,
        }
    }

    /// Translate a domain error with this deployment's diagnostics setting
    pub fn api_error(&self, err: DomainError) -> ApiError {
        ApiError::from_domain(err, self.diagnostics)
    }
}
