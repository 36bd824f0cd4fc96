//! Translation of storage failures into the domain error taxonomy
//!
//! Both store strategies funnel their driver errors through
//! [`StorageFailure`], so a unique violation reported by Diesel and one
//! reported by sqlx end up as the same `DomainError::Duplicate`.

use tracing::{debug, warn};

use crate::domain::DomainError;

use super::pool::PoolError;

/// Storage-level failure signal, independent of the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageFailure {
    UniqueViolation,
    ForeignKeyViolation,
    RowNotFound,
    Other(String),
}

impl StorageFailure {
    /// Translate into the domain taxonomy
    ///
    /// `Other` becomes `Internal` and keeps the driver message so diagnostic
    /// mode can surface it.
    pub fn into_domain(self) -> DomainError {
        match self {
            Self::UniqueViolation => DomainError::duplicate("Email already exists"),
            Self::ForeignKeyViolation => DomainError::constraint("Foreign key constraint failed"),
            Self::RowNotFound => DomainError::not_found("User not found"),
            Self::Other(message) => {
                warn!(%message, "unclassified storage failure");
                DomainError::internal(message)
            }
        }
    }
}

impl From<&diesel::result::Error> for StorageFailure {
    fn from(error: &diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match error {
            DieselError::NotFound => Self::RowNotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Self::UniqueViolation
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                Self::ForeignKeyViolation
            }
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<&sqlx::Error> for StorageFailure {
    fn from(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::RowNotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::UniqueViolation,
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                Self::ForeignKeyViolation
            }
            other => Self::Other(other.to_string()),
        }
    }
}

/// Map a Diesel error raised while running `operation`
pub fn map_diesel_error(error: diesel::result::Error, operation: &str) -> DomainError {
    debug!(%error, %operation, "diesel operation failed");
    StorageFailure::from(&error).into_domain()
}

/// Map a sqlx error raised while running `operation`
pub fn map_sqlx_error(error: sqlx::Error, operation: &str) -> DomainError {
    debug!(%error, %operation, "sqlx operation failed");
    StorageFailure::from(&error).into_domain()
}

/// Pool failures are never client-caused
pub fn map_pool_error(error: PoolError) -> DomainError {
    debug!(%error, "connection pool failure");
    StorageFailure::Other(error.to_string()).into_domain()
}
