//! Root endpoint listing the API surface

use serde::Serialize;

use crate::api::types::Json;

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub users: &'static str,
    pub raw_users: &'static str,
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

/// GET /
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the User Store API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            health: "/health",
            users: "/users",
            raw_users: "/raw/users",
        },
    })
}
