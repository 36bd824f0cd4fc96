use axum::http::{header, HeaderValue, Method, Uri};
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::health;
use super::raw_users;
use super::state::AppState;
use super::types::{ApiError, ErrorCode};
use super::users;
use super::welcome;

/// Create the full router with application state
pub fn create_router(state: AppState, frontend_url: &str) -> Router {
    Router::new()
        .route("/", get(welcome::welcome))
        .route("/health", get(health::health_check))
        .nest("/users", users::create_users_router())
        .nest("/raw/users", raw_users::create_raw_users_router())
        .fallback(route_not_found)
        .with_state(state)
        .layer(cors_layer(frontend_url))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the single configured frontend origin
fn cors_layer(frontend_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(frontend_url.trim_end_matches('/')) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            warn!(frontend_url, "invalid frontend URL, cross-origin requests are disabled");
            layer
        }
    }
}

async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(
        ErrorCode::RouteNotFound,
        format!("Route {} {} not found", method, uri.path()),
    )
}
