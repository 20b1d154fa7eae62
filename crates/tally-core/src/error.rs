//! # Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError ──► CoreError ──────┐                                  │
//! │  (one bad field)     (rule broken)   ├──► ApiError (tally-api)          │
//! │  DbError (tally-db) ─────────────────┘    code + message + status       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant here is a client mistake: the boundary answers them with
//! 400 and nothing has been written to the store yet.

use thiserror::Error;

/// A business rule rejected the request.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invoice cannot have more than {max} lines")]
    InvoiceTooLarge { max: usize },

    /// An amount on the invoice does not fit in an i64 count of cents.
    #[error("Invoice {amount} is too large")]
    AmountOverflow { amount: &'static str },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// A single field failed validation. `field` is the wire name, with an
/// index for line fields (`items[1].quantity`).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// e.g. a path id that is not an integer
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
