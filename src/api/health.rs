//! Health check endpoint

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

/// Connectivity of a store strategy
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

impl From<bool> for DatabaseStatus {
    fn from(connected: bool) -> Self {
        if connected {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Mapped strategy
    pub database: DatabaseStatus,
    /// Raw SQL strategy
    pub raw_database: DatabaseStatus,
    pub timestamp: DateTime<Utc>,
}

/// Always answers 200; store connectivity is reported in the body
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (mapped, raw) = tokio::join!(
        state.users.check_connection(),
        state.raw_users.check_connection()
    );

    Json(HealthResponse {
        status: "OK",
        database: mapped.into(),
        raw_database: raw.into(),
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "OK",
            database: DatabaseStatus::Connected,
            raw_database: DatabaseStatus::Disconnected,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "OK");
        assert_eq!(json["database"], "Connected");
        assert_eq!(json["raw_database"], "Disconnected");
        assert!(json["timestamp"].is_string());
    }
}
