//! `/raw/users` endpoints, served by the hand-written SQL strategy
//!
//! Rows are returned with their storage column names, wrapped in an envelope
//! that names the kind of query that produced them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{SearchFilter, SearchParams, User, UserId, UserInput, UserStats};
use crate::domain::DomainError;
use crate::infrastructure::persistence::UserRow;

/// Tag carried by every raw response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Stats,
    Search,
}

impl QueryType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Select => "Raw SQL",
            Self::Insert => "Raw SQL INSERT",
            Self::Update => "Raw SQL UPDATE",
            Self::Stats => "Complex JOIN Query",
            Self::Search => "Dynamic SQL with filters",
        }
    }
}

impl Serialize for QueryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Serialize)]
pub struct RawResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub query_type: QueryType,
}

impl<T> RawResponse<T> {
    fn new(data: T, query_type: QueryType) -> Self {
        Self {
            data,
            count: None,
            message: None,
            query_type,
        }
    }

    fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub data: Vec<UserRow>,
    pub pagination: Pagination,
    pub filters: SearchFilter,
    pub query_type: QueryType,
}

pub fn create_raw_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/stats", get(users_with_stats))
        .route("/search", get(search_users))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

fn rows(users: &[User]) -> Vec<UserRow> {
    users.iter().map(UserRow::from).collect()
}

/// GET /raw/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<RawResponse<Vec<UserRow>>>, ApiError> {
    let users = state.raw_users.list().await.map_err(|e| state.api_error(e))?;

    let mut response = RawResponse::new(rows(&users), QueryType::Select);
    response.count = Some(users.len());
    Ok(Json(response))
}

/// GET /raw/users/{id}
///
/// A missing row answers 404 with the query type alongside the error.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RawResponse<UserRow>>, ApiError> {
    let id = UserId::parse(&id).map_err(|e| state.api_error(e))?;

    let user = state.raw_users.get(id).await.map_err(|e| match e {
        DomainError::NotFound { .. } => state
            .api_error(e)
            .with_query_type(QueryType::Select.label()),
        other => state.api_error(other),
    })?;
    Ok(Json(RawResponse::new(UserRow::from(&user), QueryType::Select)))
}

/// POST /raw/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<(StatusCode, Json<RawResponse<UserRow>>), ApiError> {
    let user = state
        .raw_users
        .create(&input)
        .await
        .map_err(|e| state.api_error(e))?;

    let response = RawResponse::new(UserRow::from(&user), QueryType::Insert)
        .with_message("User created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /raw/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UserInput>,
) -> Result<Json<RawResponse<UserRow>>, ApiError> {
    let id = UserId::parse(&id).map_err(|e| state.api_error(e))?;

    let user = state
        .raw_users
        .update(id, &input)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(
        RawResponse::new(UserRow::from(&user), QueryType::Update)
            .with_message("User updated successfully"),
    ))
}

/// DELETE /raw/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = UserId::parse(&id).map_err(|e| state.api_error(e))?;

    state
        .raw_users
        .delete(id)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /raw/users/stats
pub async fn users_with_stats(
    State(state): State<AppState>,
) -> Result<Json<RawResponse<Vec<UserStats>>>, ApiError> {
    let stats = state.raw_users.stats().await.map_err(|e| state.api_error(e))?;

    Ok(Json(
        RawResponse::new(stats, QueryType::Stats).with_message("Users with statistics retrieved"),
    ))
}

/// GET /raw/users/search?search=&page=&limit=&minAge=&maxAge=
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let filter = SearchFilter::from(params);
    debug!(?filter, "raw search");

    let users = state
        .raw_users
        .search(&filter)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(SearchResponse {
        data: rows(&users),
        pagination: Pagination {
            page: filter.page,
            limit: filter.limit,
        },
        filters: filter,
        query_type: QueryType::Search,
    }))
}
