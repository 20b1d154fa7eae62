//! # Boundary Errors
//!
//! Every service function returns `ApiResult<T>`. Lower layers keep their
//! own error types; this module decides which status each one becomes.
//!
//! ## Mapping
//! ```text
//! service fn ── ApiResult<T>
//!     │
//!     ├── ValidationError / CoreError ─────────────► 400 VALIDATION_ERROR
//!     ├── Ok(None) from a read, DbError::NotFound ──► 404 NOT_FOUND
//!     ├── any other DbError ───────────────────────► 500 DATABASE_ERROR
//!     │       (detail logged, generic message returned)
//!     └── Ok(value) ───────────────────────────────► 200 / 201
//! ```
//!
//! ## Wire Shape
//! ```json
//! {
//!   "code": "NOT_FOUND",
//!   "message": "Invoice not found: 42"
//! }
//! ```

use serde::Serialize;
use std::fmt;
use tally_core::{CoreError, ValidationError};
use tally_db::DbError;

/// What a service call hands back on failure: a stable `code` for
/// programs and a `message` a person can read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

/// Failure category. Serialized as `VALIDATION_ERROR`, `NOT_FOUND`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    NotFound,
    /// The store failed; the request itself may have been fine.
    DatabaseError,
}

impl ErrorCode {
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::DatabaseError => 500,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// `"{resource} not found: {id}"`, answered with 404.
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Status a transport layer should answer with.
    pub fn status(&self) -> u16 {
        self.code.status()
    }

    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// A storage failure. The detail goes to the log, the client only
    /// sees `public`.
    fn storage(public: &'static str, detail: &dyn fmt::Display) -> Self {
        tracing::error!(error = %detail, "{public}");
        ApiError::new(ErrorCode::DatabaseError, public)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let public = match err {
            DbError::NotFound { entity, id } => return ApiError::not_found(&entity, id),
            DbError::Rejected(rule) => return rule.into(),
            DbError::ConnectionFailed(_) => "Database connection failed",
            DbError::MigrationFailed(_) => "Database migration failed",
            DbError::TransactionFailed(_) => "Database transaction failed",
            DbError::PoolExhausted => "Database pool exhausted",
            DbError::CheckViolation { .. } | DbError::QueryFailed(_) | DbError::Internal(_) => {
                "Database operation failed"
            }
        };
        ApiError::storage(public, &err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(field) => field.into(),
            rule => ApiError::validation(rule.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// A body that does not parse is the caller's fault, so 400.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::validation(format!("Invalid request body: {err}"))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status())
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::validation("bad").status(), 400);
        assert_eq!(ApiError::not_found("Invoice", 1).status(), 404);
        assert_eq!(ApiError::new(ErrorCode::DatabaseError, "x").status(), 500);
    }

    #[test]
    fn test_db_not_found_maps_to_404() {
        let err: ApiError = DbError::not_found("Item", 9).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Item not found: 9");
    }

    #[test]
    fn test_storage_failure_hides_details() {
        let err: ApiError = DbError::QueryFailed("no such table: secrets".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("secrets"));
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err: ApiError = CoreError::from(ValidationError::MustBePositive {
            field: "items[0].quantity".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "items[0].quantity must be positive");
    }

    #[test]
    fn test_rejected_invoice_maps_to_400() {
        let err: ApiError = DbError::from(CoreError::AmountOverflow { amount: "total" }).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Invoice total is too large");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("Invoice", 42)).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Invoice not found: 42");
    }
}
