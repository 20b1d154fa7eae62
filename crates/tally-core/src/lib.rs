//! # tally-core: Pure Business Logic for Tally
//!
//! This crate contains the catalog and invoice domain as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                tally-api (request/response boundary)            │   │
//! │  │    parse request ──► validate ──► store ──► serialize result    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐ │   │
//! │  │   │   types   │  │   money   │  │ calculator │  │ validation│ │   │
//! │  │   │   Item    │  │   Money   │  │  subtotal  │  │   rules   │ │   │
//! │  │   │  Invoice  │  │  TaxRate  │  │   total    │  │  checks   │ │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-db (Database Layer)                    │   │
//! │  │         SQLite queries, migrations, item/invoice stores         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Invoice, InvoiceLine)
//! - [`money`] - Money and TaxRate with integer arithmetic (no floating point!)
//! - [`calculator`] - Invoice subtotal/total computation
//! - [`pagination`] - 1-based page numbers and page sizes
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::calculator::compute_totals;
//! use tally_core::{InvoiceLine, TaxRate};
//!
//! let lines = vec![
//!     InvoiceLine::new(1, 2, 500), // 2 × 5.00
//!     InvoiceLine::new(2, 1, 300), // 1 × 3.00
//! ];
//!
//! let totals = compute_totals(&lines, TaxRate::from_bps(1000)).unwrap(); // 10%
//! assert_eq!(totals.subtotal.cents(), 1300);
//! assert_eq!(totals.total.cents(), 1430);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod money;
pub mod pagination;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{compute_totals, InvoiceTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, TaxRate};
pub use pagination::{Page, INVOICE_PAGE_SIZE, ITEM_PAGE_SIZE};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of lines allowed on a single invoice.
///
/// ## Business Reason
/// Keeps a single create transaction bounded.
pub const MAX_INVOICE_LINES: usize = 100;

/// Maximum quantity on a single invoice line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Highest accepted price, in cents (1,000,000,000.00).
///
/// With at most `MAX_INVOICE_LINES` lines of `MAX_LINE_QUANTITY` units and
/// a 100% tax rate, an invoice total stays below 2^55 cents.
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;
