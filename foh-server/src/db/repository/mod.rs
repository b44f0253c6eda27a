//! Repository Module
//!
//! SQL access for the two entities. Repositories are plain async functions
//! over a pool reference; the seat/release pair in [`dining_table`] is the
//! only multi-statement unit and runs inside a single transaction.

pub mod dining_table;
pub mod reservation;

use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Business rule: {0}")]
    BusinessRule(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::BusinessRule(msg) => AppError::BusinessRule(msg),
            RepoError::Validation(msg) => AppError::Validation(vec![msg]),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
