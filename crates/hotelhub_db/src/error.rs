//! Error types for the database layer

use thiserror::Error;

/// Errors that can occur when working with the stores
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A row could not be mapped onto its model
    #[error("Database row error: {0}")]
    RowError(String),

    /// An insert collided with a uniqueness constraint
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// Other errors
    #[error("Other database error: {0}")]
    Other(String),
}

impl DbError {
    /// Map a failed write, keeping uniqueness violations distinguishable.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::UniqueViolation(db_err.message().to_string())
            }
            other => DbError::QueryError(other.to_string()),
        }
    }
}
