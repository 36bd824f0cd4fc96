use thiserror::Error;

/// Core domain errors
///
/// This is the closed taxonomy every store strategy translates its failures
/// into before they reach a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Validation failed: {}", violations.join(", "))]
    Validation { violations: Vec<String> },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Duplicate: {message}")]
    Duplicate { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Constraint violation: {message}")]
    Constraint { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(violations: Vec<String>) -> Self {
        Self::Validation { violations }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error is one of the expected, client-caused kinds
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }
}
