//! # Validation Module
//!
//! Input validation for catalog items and invoices.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Boundary (tally-api)                                         │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Calculator (tally-core)                                      │
//! │  └── Pure arithmetic, accepts whatever it is given                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK constraints (quantity > 0, prices >= 0)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Negative Amounts
//! Negative quantities, unit prices, catalog prices and tax rates are all
//! rejected here. Discounts are not modelled as negative lines.
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{parse_id, validate_quantity};
//!
//! assert_eq!(parse_id("42").unwrap(), 42);
//! assert!(parse_id("abc").is_err());
//! assert!(validate_quantity("quantity", 0).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::TaxRate;
use crate::types::{NewInvoice, NewItem};
use crate::{MAX_INVOICE_LINES, MAX_LINE_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Highest accepted tax rate: 100%.
pub const MAX_TAX_RATE_BPS: i64 = 10_000;

const MAX_NAME_LEN: usize = 200;
const MAX_TYPE_LEN: usize = 50;
const MAX_DESCRIPTION_LEN: usize = 1000;

// =============================================================================
// Identifiers
// =============================================================================

/// Parses a path-supplied id.
///
/// ## Rules
/// - Must be a base-10 integer
/// - Must be positive (store ids start at 1)
pub fn parse_id(raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    let id = raw
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must be an integer".to_string(),
        })?;

    if id < 1 {
        return Err(ValidationError::MustBePositive {
            field: "id".to_string(),
        });
    }

    Ok(id)
}

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize, required: bool) -> ValidationResult<()> {
    let value = value.trim();

    if required && value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_text("customer_name", name, MAX_NAME_LEN, true)
}

pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LEN, true)
}

pub fn validate_item_type(item_type: &str) -> ValidationResult<()> {
    validate_text("type", item_type, MAX_TYPE_LEN, true)
}

/// Descriptions may be empty.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    validate_text("description", description, MAX_DESCRIPTION_LEN, false)
}

/// Normalizes an item category: trimmed and lower-cased, so "Pizza " and
/// "pizza" land in the same category.
pub fn normalize_item_type(item_type: &str) -> String {
    item_type.trim().to_lowercase()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Zero is allowed (free items)
/// - Must not exceed MAX_PRICE_CENTS, so no accepted invoice can overflow
///   its totals
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a wire-supplied tax rate and converts it to a [`TaxRate`].
///
/// ## Rules
/// - Must be between 0 and 10000 bps (0% to 100%)
pub fn validate_tax_rate_bps(bps: i64) -> ValidationResult<TaxRate> {
    if !(0..=MAX_TAX_RATE_BPS).contains(&bps) {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate_bps".to_string(),
            min: 0,
            max: MAX_TAX_RATE_BPS,
        });
    }

    Ok(TaxRate::from_bps(bps as u32))
}

/// Converts a decimal percentage (`8.5` for 8.5%) to a [`TaxRate`].
///
/// ## Rules
/// - Must be finite and between 0 and 100
/// - At most two decimal places, since a rate is held in whole basis
///   points (`8.125` is refused rather than rounded)
pub fn validate_tax_percent(percent: f64) -> ValidationResult<TaxRate> {
    const FIELD: &str = "tax";

    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: FIELD.to_string(),
            min: 0,
            max: 100,
        });
    }

    let scaled = percent * 100.0;
    let bps = scaled.round();
    if (scaled - bps).abs() > 1e-6 {
        return Err(ValidationError::InvalidFormat {
            field: FIELD.to_string(),
            reason: "at most two decimal places".to_string(),
        });
    }

    // 0.0 ..= 10_000.0 after the range check
    Ok(TaxRate::from_bps(bps as u32))
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates a complete invoice request.
///
/// Checks the customer name, the line count, and each line's quantity and
/// unit price. Line errors name the offending index, e.g. `items[1].quantity`.
/// Item references are not checked against the catalog.
pub fn validate_new_invoice(invoice: &NewInvoice) -> CoreResult<()> {
    validate_customer_name(&invoice.customer_name)?;
    validate_tax_rate_bps(invoice.tax_rate_bps as i64)?;

    if invoice.lines.len() > MAX_INVOICE_LINES {
        return Err(CoreError::InvoiceTooLarge {
            max: MAX_INVOICE_LINES,
        });
    }

    for (index, line) in invoice.lines.iter().enumerate() {
        if line.item_id < 1 {
            return Err(ValidationError::MustBePositive {
                field: format!("items[{}].item_id", index),
            }
            .into());
        }
        validate_quantity(&format!("items[{}].quantity", index), line.quantity)?;
        validate_price_cents(&format!("items[{}].price", index), line.unit_price_cents)?;
    }

    Ok(())
}

/// Validates a catalog item before create or update.
pub fn validate_new_item(item: &NewItem) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_item_type(&item.item_type)?;
    validate_price_cents("price", item.price_cents)?;
    validate_description(&item.description)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
