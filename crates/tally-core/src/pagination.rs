//! # Pagination
//!
//! 1-based page numbers translated to LIMIT/OFFSET pairs.
//!
//! ```text
//! page size 3, 7 invoices
//! ┌─────────┬─────────┬─────────┐
//! │ page 1  │ page 2  │ page 3  │
//! │ 1  2  3 │ 4  5  6 │ 7       │
//! │ off 0   │ off 3   │ off 6   │
//! └─────────┴─────────┴─────────┘
//! page 0, -4 → page 1
//! ```

use serde::{Deserialize, Serialize};

/// Page size for paginated catalog item listings.
pub const ITEM_PAGE_SIZE: i64 = 10;

/// Page size for paginated invoice listings.
pub const INVOICE_PAGE_SIZE: i64 = 3;

/// A clamped, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    number: i64,
    size: i64,
}

impl Page {
    /// Creates a page. Numbers below 1 are treated as page 1 and sizes
    /// below 1 as size 1.
    pub fn new(number: i64, size: i64) -> Self {
        Page {
            number: number.max(1),
            size: size.max(1),
        }
    }

    /// First page with the given size.
    pub fn first(size: i64) -> Self {
        Page::new(1, size)
    }

    /// Builds a page from a raw query value (e.g. `?page=2`).
    ///
    /// Missing or unparsable values fall back to page 1 rather than failing.
    pub fn parse(raw: Option<&str>, size: i64) -> Self {
        let number = raw
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(1);
        Page::new(number, size)
    }

    #[inline]
    pub const fn number(&self) -> i64 {
        self.number
    }

    #[inline]
    pub const fn size(&self) -> i64 {
        self.size
    }

    #[inline]
    pub const fn limit(&self) -> i64 {
        self.size
    }

    /// Rows to skip: `(number - 1) × size`.
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.size)
    }
}
