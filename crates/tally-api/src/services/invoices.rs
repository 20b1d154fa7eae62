//! # Invoice Services
//!
//! Create, fetch and page through invoices.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CreateInvoiceRequest (JSON)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  into_new_invoice()     tax bps i64 → TaxRate (400 on bad value)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_new_invoice() customer, line count, qty, prices (400)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InvoiceRepository::create()   totals + one transaction (500 on fail)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InvoiceResponse (201)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use crate::dto::{CreateInvoiceRequest, InvoiceResponse};
use crate::error::{ApiError, ApiResult};
use tally_core::validation::{parse_id, validate_new_invoice};
use tally_core::{Page, INVOICE_PAGE_SIZE};
use tally_db::Database;

/// Validates and persists a new invoice.
///
/// Nothing touches the store until validation has passed. The returned
/// totals are the ones computed and stored at creation.
pub async fn create_invoice(db: &Database, request: CreateInvoiceRequest) -> ApiResult<InvoiceResponse> {
    let new_invoice = request.into_new_invoice()?;
    validate_new_invoice(&new_invoice)?;

    let invoice = db.invoices().create(&new_invoice).await?;

    info!(
        id = invoice.id,
        lines = invoice.lines.len(),
        total = invoice.total_cents,
        "create_invoice"
    );

    Ok(invoice.into())
}

/// Fetches a single invoice by a path-supplied id.
///
/// ## Errors
/// * `VALIDATION_ERROR` - id is not a positive integer
/// * `NOT_FOUND` - no invoice has this id
/// * `DATABASE_ERROR` - the store could not be read
pub async fn get_invoice(db: &Database, raw_id: &str) -> ApiResult<InvoiceResponse> {
    let id = parse_id(raw_id)?;
    debug!(id, "get_invoice");

    db.invoices()
        .get_by_id(id)
        .await?
        .map(InvoiceResponse::from)
        .ok_or_else(|| ApiError::not_found("Invoice", id))
}

/// Lists one page of invoices (`INVOICE_PAGE_SIZE` per page).
///
/// Missing, unparsable or non-positive page values mean page 1. A page past
/// the end is an empty list, not an error.
pub async fn list_invoices(db: &Database, raw_page: Option<&str>) -> ApiResult<Vec<InvoiceResponse>> {
    let page = Page::parse(raw_page, INVOICE_PAGE_SIZE);
    debug!(page = page.number(), "list_invoices");

    let invoices = db.invoices().list_page(page).await?;

    Ok(invoices.into_iter().map(InvoiceResponse::from).collect())
}
