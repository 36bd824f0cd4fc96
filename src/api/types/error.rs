//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Machine-readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidId,
    DuplicateEmail,
    UserNotFound,
    ConstraintError,
    InvalidBody,
    RouteNotFound,
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ConstraintError => "CONSTRAINT_ERROR",
            Self::InvalidBody => "INVALID_BODY",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
        };
        f.write_str(code)
    }
}

/// Error body: `{error, code, details?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Set by the raw SQL endpoints on a missing row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: message.into(),
                code,
                details: None,
                query_type: None,
            },
        }
    }

    pub fn with_details(mut self, details: impl Into<serde_json::Value>) -> Self {
        self.response.details = Some(details.into());
        self
    }

    pub fn with_query_type(mut self, query_type: impl Into<String>) -> Self {
        self.response.query_type = Some(query_type.into());
        self
    }

    pub fn bad_request(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalError,
            "Internal server error",
        )
    }

    /// Translate a domain error
    ///
    /// With `diagnostics` off, the message of an internal failure is withheld.
    pub fn from_domain(err: DomainError, diagnostics: bool) -> Self {
        if err.is_client_error() {
            tracing::debug!(error = %err, "request rejected");
        } else {
            tracing::error!(error = %err, "request failed");
        }

        match err {
            DomainError::Validation { violations } => {
                Self::bad_request(ErrorCode::ValidationError, "Validation failed")
                    .with_details(violations)
            }
            DomainError::InvalidId { message } => Self::bad_request(ErrorCode::InvalidId, message),
            DomainError::Duplicate { message } => {
                Self::bad_request(ErrorCode::DuplicateEmail, message)
            }
            DomainError::NotFound { message } => Self::not_found(ErrorCode::UserNotFound, message),
            DomainError::Constraint { message } => {
                Self::bad_request(ErrorCode::ConstraintError, message)
            }
            DomainError::Internal { message } => {
                if diagnostics {
                    Self::internal().with_details(message)
                } else {
                    Self::internal()
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.response.code, self.response.error)
    }
}

impl std::error::Error for ApiError {}
