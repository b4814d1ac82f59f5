//! Error types shared by the data-access crates
//!
//! Every query either succeeds, finds nothing, or fails. These outcomes are
//! kept apart so callers can tell a missing row from a broken database.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The query ran but returned no row where one was required
    #[error("Record not found")]
    NotFound,

    /// A unique constraint rejected the write
    #[error("Unique constraint violation: {0}")]
    Conflict(String),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Whether this error means "no such row" rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound)
    }
}

impl From<SqlxError> for DatabaseError {
    fn from(err: SqlxError) -> Self {
        match &err {
            SqlxError::RowNotFound => DatabaseError::NotFound,
            SqlxError::Database(db_err) if db_err.is_unique_violation() => {
                let detail = match db_err.constraint() {
                    Some(constraint) => format!("{} ({})", db_err.message(), constraint),
                    None => db_err.message().to_string(),
                };
                DatabaseError::Conflict(detail)
            }
            SqlxError::PoolTimedOut | SqlxError::PoolClosed => DatabaseError::Connection(err),
            _ => DatabaseError::Query(err),
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
