//! `/users` endpoints, served by the mapped strategy

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{User, UserId, UserInput};

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list().await.map_err(|e| state.api_error(e))?;
    Ok(Json(users))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = UserId::parse(&id).map_err(|e| state.api_error(e))?;
    debug!(%id, "getting user");

    let user = state.users.get(id).await.map_err(|e| state.api_error(e))?;
    Ok(Json(user))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .users
        .create(&input)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UserInput>,
) -> Result<Json<User>, ApiError> {
    let id = UserId::parse(&id).map_err(|e| state.api_error(e))?;

    let user = state
        .users
        .update(id, &input)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = UserId::parse(&id).map_err(|e| state.api_error(e))?;

    state.users.delete(id).await.map_err(|e| state.api_error(e))?;

    Ok(StatusCode::NO_CONTENT)
}
