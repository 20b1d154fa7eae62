//! # Request and Response DTOs
//!
//! Wire shapes for the invoice and catalog operations.
//!
//! DTOs decouple the domain model from the API contract: requests carry
//! only what a client may supply (no ids, no totals, no timestamps) and
//! responses add derived fields such as per-line totals.
//!
//! ## Units
//! Amounts travel as integer cents (`unit_price_cents`, `price_cents`,
//! `total_cents`) so a client never round-trips a float through money.
//! The tax rate on a create request may be sent either as `tax`, a decimal
//! percentage with up to two decimals (`8.5`), or as `tax_rate_bps`
//! (`850`). Responses always carry `tax_rate_bps`.

use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use tally_core::validation::{normalize_item_type, validate_tax_percent, validate_tax_rate_bps};
use tally_core::{TaxRate, ValidationError};
use tally_core::{Invoice, InvoiceLine, Item, NewInvoice, NewItem};

// =============================================================================
// Parsing
// =============================================================================

/// Deserializes a JSON request body. Malformed input is a validation error.
pub fn from_json<'a, T: Deserialize<'a>>(body: &'a str) -> ApiResult<T> {
    Ok(serde_json::from_str(body)?)
}

// =============================================================================
// Invoice DTOs
// =============================================================================

/// Body of a create-invoice request.
///
/// ```json
/// {
///   "customer_name": "Ada",
///   "tax": 10,
///   "items": [{ "item_id": 1, "quantity": 2, "unit_price_cents": 500 }]
/// }
/// ```
///
/// Exactly one of `tax` and `tax_rate_bps` must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub customer_name: String,
    /// Tax as a decimal percentage: `8.5` is 8.5%.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    /// Tax in basis points. Signed so a negative value reaches validation
    /// instead of failing deserialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate_bps: Option<i64>,
    #[serde(default)]
    pub items: Vec<InvoiceLineRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineRequest {
    pub item_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl CreateInvoiceRequest {
    /// Converts the wire request into a domain request.
    ///
    /// Only the tax rate is checked here (it changes type on the way in).
    /// The rest is left to `validate_new_invoice`.
    pub fn into_new_invoice(self) -> ApiResult<NewInvoice> {
        let tax_rate = self.tax_rate()?;

        Ok(NewInvoice {
            customer_name: self.customer_name.trim().to_string(),
            lines: self
                .items
                .into_iter()
                .map(|l| InvoiceLine::new(l.item_id, l.quantity, l.unit_price_cents))
                .collect(),
            tax_rate_bps: tax_rate.bps(),
        })
    }

    fn tax_rate(&self) -> Result<TaxRate, ValidationError> {
        match (self.tax, self.tax_rate_bps) {
            (Some(percent), None) => validate_tax_percent(percent),
            (None, Some(bps)) => validate_tax_rate_bps(bps),
            (None, None) => Err(ValidationError::Required {
                field: "tax".to_string(),
            }),
            (Some(_), Some(_)) => Err(ValidationError::InvalidFormat {
                field: "tax".to_string(),
                reason: "send either tax or tax_rate_bps, not both".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineResponse {
    pub item_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl From<InvoiceLine> for InvoiceLineResponse {
    fn from(line: InvoiceLine) -> Self {
        InvoiceLineResponse {
            item_id: line.item_id,
            quantity: line.quantity,
            unit_price_cents: line.unit_price_cents,
            line_total_cents: line.line_total().cents(),
        }
    }
}

/// A stored invoice as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub id: i64,
    pub customer_name: String,
    pub items: Vec<InvoiceLineResponse>,
    pub tax_rate_bps: u32,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    /// RFC 3339 creation timestamp (UTC).
    pub created_at: String,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        let tax_cents = invoice.tax().cents();
        InvoiceResponse {
            id: invoice.id,
            customer_name: invoice.customer_name,
            items: invoice.lines.into_iter().map(InvoiceLineResponse::from).collect(),
            tax_rate_bps: invoice.tax_rate_bps,
            subtotal_cents: invoice.subtotal_cents,
            tax_cents,
            total_cents: invoice.total_cents,
            created_at: invoice.created_at.to_rfc3339(),
        }
    }
}

// =============================================================================
// Item DTOs
// =============================================================================

/// Body of a create or update item request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub price_cents: i64,
    #[serde(default)]
    pub description: String,
}

impl ItemRequest {
    /// Trims text fields and normalizes the category.
    pub fn into_new_item(self) -> NewItem {
        NewItem {
            name: self.name.trim().to_string(),
            item_type: normalize_item_type(&self.item_type),
            price_cents: self.price_cents,
            description: self.description.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub price_cents: i64,
    pub description: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        ItemResponse {
            id: item.id,
            name: item.name,
            item_type: item.item_type,
            price_cents: item.price_cents,
            description: item.description,
        }
    }
}

/// Acknowledgement for a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: i64,
    pub message: String,
}

impl DeletedResponse {
    pub fn item(id: i64) -> Self {
        DeletedResponse {
            id,
            message: "Item deleted".to_string(),
        }
    }
}
