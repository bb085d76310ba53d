//! Error types for pgrecord

use thiserror::Error;
use tokio_postgres::error::SqlState;

/// Result type alias for pgrecord operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Error types for record persistence and query execution
#[derive(Debug, Error)]
pub enum RecordError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error, passed through from the driver untouched
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// A row was required but the result was empty
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// The table behind a record declares no primary key
    #[error("{0} has no primary key")]
    MissingPrimaryKey(String),

    /// Caller supplied an unusable argument
    #[error("{0}")]
    InvalidArgument(String),

    /// Statement failed validation before reaching the database
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl RecordError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// SQLSTATE reported by the server, if this is a database error.
    pub fn sql_state(&self) -> Option<&SqlState> {
        match self {
            Self::Query(err) => err.code(),
            _ => None,
        }
    }

    /// Check if the server rejected the statement with a unique violation (`23505`)
    pub fn is_unique_violation(&self) -> bool {
        self.sql_state() == Some(&SqlState::UNIQUE_VIOLATION)
    }

    /// Check if the server rejected the statement with a foreign key violation (`23503`)
    pub fn is_foreign_key_violation(&self) -> bool {
        self.sql_state() == Some(&SqlState::FOREIGN_KEY_VIOLATION)
    }

    /// Check if the server rejected the statement with a check violation (`23514`)
    pub fn is_check_violation(&self) -> bool {
        self.sql_state() == Some(&SqlState::CHECK_VIOLATION)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for RecordError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
