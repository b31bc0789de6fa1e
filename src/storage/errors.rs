//! Counter store error types
//!
//! Error codes:
//! - COUNTER_STORE_DATABASE_ERROR: the backend rejected or failed a statement
//! - COUNTER_STORE_UNAVAILABLE: the backend is closed or unreachable

use std::fmt;

use thiserror::Error;

/// Store-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    Database,
    Unavailable,
}

impl StoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::Database => "COUNTER_STORE_DATABASE_ERROR",
            StoreErrorCode::Unavailable => "COUNTER_STORE_UNAVAILABLE",
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Counter store error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StoreError::Unavailable(reason.into())
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        match self {
            StoreError::Database(sqlx::Error::PoolClosed)
            | StoreError::Database(sqlx::Error::PoolTimedOut) => StoreErrorCode::Unavailable,
            StoreError::Database(_) => StoreErrorCode::Database,
            StoreError::Unavailable(_) => StoreErrorCode::Unavailable,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            StoreError::unavailable("closed").code().code(),
            "COUNTER_STORE_UNAVAILABLE"
        );
        assert_eq!(
            StoreError::from(sqlx::Error::RowNotFound).code(),
            StoreErrorCode::Database
        );
        assert_eq!(
            StoreError::from(sqlx::Error::PoolClosed).code(),
            StoreErrorCode::Unavailable
        );
    }

    #[test]
    fn test_display_includes_reason() {
        let err = StoreError::unavailable("store closed");
        assert_eq!(err.to_string(), "store unavailable: store closed");
    }
}
