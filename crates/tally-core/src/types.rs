//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │      Item       │        │     Invoice     │                        │
//! │  │  ─────────────  │        │  ─────────────  │                        │
//! │  │  id (i64)       │◄─ ─ ─ ─│  id (i64)       │                        │
//! │  │  name           │ item_id│  customer_name  │                        │
//! │  │  item_type      │        │  tax_rate_bps   │                        │
//! │  │  price_cents    │        │  subtotal_cents │                        │
//! │  │  description    │        │  total_cents    │                        │
//! │  └─────────────────┘        │  created_at     │                        │
//! │                             │  lines ──────┐  │                        │
//! │                             └──────────────┼──┘                        │
//! │                                            ▼                            │
//! │                             ┌─────────────────┐                        │
//! │                             │   InvoiceLine   │                        │
//! │                             │  item_id        │                        │
//! │                             │  quantity       │                        │
//! │                             │  unit_price     │ (frozen at creation)   │
//! │                             └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Store-Assigned Fields
//! `id`, `subtotal_cents`, `total_cents` and `created_at` are never supplied
//! by a caller. The `New*` types carry only what a caller may provide.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, TaxRate};

// =============================================================================
// Catalog Item
// =============================================================================

/// A sellable product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Free-form category (e.g., "pizza", "drink").
    #[serde(rename = "type")]
    pub item_type: String,

    /// Current price in cents.
    pub price_cents: i64,

    pub description: String,
}

impl Item {
    /// Returns the current catalog price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Caller-supplied fields of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewItem {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub price_cents: i64,
    pub description: String,
}

impl NewItem {
    /// Attaches a store-assigned id.
    pub fn with_id(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            item_type: self.item_type,
            price_cents: self.price_cents,
            description: self.description,
        }
    }
}

// =============================================================================
// Invoice Line
// =============================================================================

/// One item/quantity/price triple on an invoice.
///
/// The unit price is a snapshot taken when the invoice is created. Later
/// catalog price changes do not touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceLine {
    /// Catalog item reference (not checked for existence).
    pub item_id: i64,
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
}

impl InvoiceLine {
    pub const fn new(item_id: i64, quantity: i64, unit_price_cents: i64) -> Self {
        InvoiceLine {
            item_id,
            quantity,
            unit_price_cents,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total before tax (unit_price × quantity).
    ///
    /// Lines read back from the store were totalled at creation, so this
    /// cannot overflow for them.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// `None` if unit_price × quantity does not fit in an i64.
    #[inline]
    pub fn checked_line_total(&self) -> Option<Money> {
        self.unit_price().checked_mul_quantity(self.quantity)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A request to create an invoice: everything the caller is allowed to supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewInvoice {
    pub customer_name: String,
    /// Lines in the order they must be reproduced on read.
    pub lines: Vec<InvoiceLine>,
    /// Tax percentage in basis points (850 = 8.5%).
    pub tax_rate_bps: u32,
}

impl NewInvoice {
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

/// A persisted invoice with its lines.
///
/// Create-once, read-many: no code path mutates an invoice after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    pub id: i64,
    pub customer_name: String,
    pub lines: Vec<InvoiceLine>,
    pub tax_rate_bps: u32,
    /// Σ quantity × unit price, stored at creation.
    pub subtotal_cents: i64,
    /// Subtotal plus tax, stored at creation and never recomputed.
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Tax amount implied by the stored subtotal and total.
    #[inline]
    pub fn tax(&self) -> Money {
        self.total() - self.subtotal()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = InvoiceLine::new(7, 3, 299);
        assert_eq!(line.line_total().cents(), 897);
    }

    #[test]
    fn test_item_serializes_type_field() {
        let item = NewItem {
            name: "Margherita".to_string(),
            item_type: "pizza".to_string(),
            price_cents: 1250,
            description: "Tomato, mozzarella, basil".to_string(),
        }
        .with_id(4);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "pizza");
        assert_eq!(json["id"], 4);
        assert!(json.get("item_type").is_none());
    }

    #[test]
    fn test_invoice_tax_is_total_minus_subtotal() {
        let invoice = Invoice {
            id: 1,
            customer_name: "Ada".to_string(),
            lines: vec![InvoiceLine::new(1, 2, 500), InvoiceLine::new(2, 1, 300)],
            tax_rate_bps: 1000,
            subtotal_cents: 1300,
            total_cents: 1430,
            created_at: Utc::now(),
        };

        assert_eq!(invoice.tax().cents(), 130);
        assert_eq!(invoice.tax_rate().bps(), 1000);
    }
}
