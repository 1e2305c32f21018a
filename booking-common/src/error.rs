//! Common error types for the booking service

use std::fmt;

use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Common result type for booking operations
pub type Result<T> = std::result::Result<T, Error>;

/// The three persisted entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Venue,
    Artist,
    Show,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Venue => "venue",
            EntityKind::Artist => "artist",
            EntityKind::Show => "show",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error taxonomy shared by the persistence, mutation and validation layers
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error other than a constraint violation
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored JSON column could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Submitted form values failed validation; nothing was written
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A referenced entity does not exist
    #[error("{entity} {id} not found")]
    MissingReference { entity: EntityKind, id: i64 },

    /// The store rejected a write (foreign key, NOT NULL, unique or check)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl Error {
    pub fn missing(entity: EntityKind, id: i64) -> Self {
        Error::MissingReference { entity, id }
    }

    /// True for errors that should surface as "not found"
    pub fn is_missing_reference(&self) -> bool {
        matches!(self, Error::MissingReference { .. })
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::CheckViolation => {
                    return Error::ConstraintViolation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        Error::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference_display() {
        let err = Error::missing(EntityKind::Venue, 42);
        assert_eq!(err.to_string(), "venue 42 not found");
        assert!(err.is_missing_reference());
    }

    #[test]
    fn test_row_not_found_is_plain_database_error() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::Database(_)));
        assert!(!err.is_missing_reference());
    }
}
