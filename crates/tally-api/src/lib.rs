//! # tally-api: Request/Response Boundary
//!
//! The layer a transport (HTTP router, CLI, desktop shell) calls into.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        tally-api (THIS CRATE)                           │
//! │                                                                         │
//! │  raw input ──► dto ──► services ──► tally-db repositories               │
//! │  (JSON, ids,    │          │                                            │
//! │   ?page=)       │          ▼                                            │
//! │                 │     tally-core validation + calculator                │
//! │                 ▼                                                       │
//! │          ApiResult<Response DTO>  /  ApiError { code, message }         │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                                   status(): 400 / 404 / 500             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`dto`] - Request/response shapes
//! - [`services`] - Invoice and catalog operations
//! - [`error`] - ApiError and status mapping
//! - [`config`] - Environment configuration
//! - [`telemetry`] - Tracing subscriber setup

pub mod config;
pub mod dto;
pub mod error;
pub mod services;
pub mod telemetry;

pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use telemetry::init_tracing;

/// Parses a path-supplied id. Anything but a positive integer is a
/// validation error.
pub fn parse_id(raw: &str) -> ApiResult<i64> {
    Ok(tally_core::validation::parse_id(raw)?)
}

/// Parses a `?page=` value for a listing with the given page size.
/// Missing, unparsable or non-positive values mean page 1.
pub fn parse_page(raw: Option<&str>, size: i64) -> tally_core::Page {
    tally_core::Page::parse(raw, size)
}
