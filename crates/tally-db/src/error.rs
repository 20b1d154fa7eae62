//! # Store Errors
//!
//! ```text
//! sqlx::Error ──From──► DbError ──From──► ApiError (tally-api)
//!                          │
//!                          ├── NotFound            update/delete matched no row → 404
//!                          ├── Rejected            totals out of range          → 400
//!                          ├── CheckViolation      schema constraint hit        → 500
//!                          └── everything else     store unavailable or broken  → 500
//! ```
//!
//! A lookup that finds nothing is not an error here: reads return
//! `DbResult<Option<T>>` and the caller decides what `None` means. That
//! keeps "no such invoice" and "could not ask" apart all the way up.

use tally_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// A targeted update or delete matched no row.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The invoice was refused before BEGIN, e.g. its totals overflow.
    /// Nothing was written.
    #[error("Invoice rejected: {0}")]
    Rejected(#[from] CoreError),

    /// A CHECK constraint rejected a row, e.g. a line with quantity 0 that
    /// bypassed validation. The enclosing transaction has rolled back.
    #[error("Constraint violation: {message}")]
    CheckViolation { message: String },

    /// The pool is closed or the database file cannot be reached.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// BEGIN or COMMIT itself failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// No connection became free within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Anything sqlx reports that fits none of the above (decode errors,
    /// protocol errors).
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Maps a failure from `begin()` or `commit()`.
    ///
    /// A closed or exhausted pool keeps its own variant so a dead store is
    /// reported the same way whether it failed on BEGIN or on a query.
    pub(crate) fn transaction(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => err.into(),
            other => DbError::TransactionFailed(other.to_string()),
        }
    }

    /// Classifies a SQLite error message. Only CHECK failures
    /// (`CHECK constraint failed: quantity > 0`) get their own variant;
    /// the schema has no other constraint a valid write can trip.
    fn from_sqlite_message(msg: &str) -> Self {
        if msg.contains("CHECK constraint failed") {
            DbError::CheckViolation {
                message: msg.to_string(),
            }
        } else {
            DbError::QueryFailed(msg.to_string())
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::from_sqlite_message(db_err.message()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),
            sqlx::Error::Io(io_err) => DbError::ConnectionFailed(io_err.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
