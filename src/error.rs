//! Error type for the relationship library.
//!
//! Failures coming out of SQLite (constraint violations, missing tables,
//! connection problems) are passed through untouched in [`Error::Sqlite`].
//! The remaining variants cover mapping a fetched row onto a typed record.

use thiserror::Error;

/// Main error type for database and mapping operations
#[derive(Error, Debug)]
pub enum Error {
    /// Anything reported by SQLite itself
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A record was asked for a column its row does not carry
    #[error("column '{column}' missing from {table} row")]
    MissingColumn { table: String, column: String },

    /// A column held a value of a different storage class
    #[error("column '{column}' expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A stored value could not be parsed into the requested type
    #[error("invalid value in column '{column}': {reason}")]
    InvalidValue { column: String, reason: String },

    /// Writing demo output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lookup that must produce a row produced none
    #[error("no {table} row matching {filter}")]
    NotFound { table: &'static str, filter: String },

    /// The operation needs a row that has not been inserted yet
    #[error("{table} record has no id; add it to a session first")]
    Transient { table: &'static str },
}

impl Error {
    /// True when SQLite rejected a write because of a NOT NULL, UNIQUE,
    /// FOREIGN KEY or CHECK constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
