//! # Invoice Repository
//!
//! Database operations for invoices and their lines.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     One Invoice, Two Tables                             │
//! │                                                                         │
//! │  invoices                      invoice_lines                           │
//! │  ┌────┬──────────┬───────┐     ┌────┬────────────┬──────────┬─────┐   │
//! │  │ id │ customer │ total │     │ id │ invoice_id │ position │ ... │   │
//! │  ├────┼──────────┼───────┤     ├────┼────────────┼──────────┼─────┤   │
//! │  │  7 │ Ada      │ 1430  │◄────│ 31 │     7      │    0     │     │   │
//! │  └────┴──────────┴───────┘  └──│ 32 │     7      │    1     │     │   │
//! │                                └────┴────────────┴──────────┴─────┘   │
//! │                                                                         │
//! │  create():    BEGIN → parent → lines → COMMIT (all or nothing)         │
//! │  list_page(): page of parents, then every line in the id range,       │
//! │               regrouped under their parent (two queries, not N+1)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are computed once at creation and stored on the parent row.
//! Reads return the stored values; they are never recomputed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use tally_core::{compute_totals, Invoice, InvoiceLine, NewInvoice, Page};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
struct InvoiceRow {
    id: i64,
    customer_name: String,
    tax_rate_bps: i64,
    subtotal_cents: i64,
    total_cents: i64,
    created_at: DateTime<Utc>,
}

impl InvoiceRow {
    fn into_invoice(self, lines: Vec<InvoiceLine>) -> DbResult<Invoice> {
        let tax_rate_bps = u32::try_from(self.tax_rate_bps).map_err(|_| {
            DbError::Internal(format!(
                "invoice {} has out-of-range tax rate {}",
                self.id, self.tax_rate_bps
            ))
        })?;

        Ok(Invoice {
            id: self.id,
            customer_name: self.customer_name,
            lines,
            tax_rate_bps,
            subtotal_cents: self.subtotal_cents,
            total_cents: self.total_cents,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct InvoiceLineRow {
    invoice_id: i64,
    item_id: i64,
    quantity: i64,
    unit_price_cents: i64,
}

impl From<InvoiceLineRow> for InvoiceLine {
    fn from(row: InvoiceLineRow) -> Self {
        InvoiceLine::new(row.item_id, row.quantity, row.unit_price_cents)
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for invoice database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.invoices();
///
/// let invoice = repo.create(&new_invoice).await?;
/// let loaded = repo.get_by_id(invoice.id).await?;
/// let page = repo.list_page(Page::new(1, INVOICE_PAGE_SIZE)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Creates an invoice and all of its lines atomically.
    ///
    /// ## Flow
    /// ```text
    /// compute_totals(lines, tax_rate)
    ///      │
    ///      ▼
    /// BEGIN
    ///      ├── INSERT invoices (totals, created_at) → id
    ///      ├── INSERT invoice_lines (position 0..n)
    ///      ▼
    /// COMMIT
    /// ```
    ///
    /// Any failure before COMMIT drops the transaction, which rolls back.
    /// No partial invoice is ever visible.
    ///
    /// ## Errors
    /// * `DbError::Rejected` - a total overflows; no transaction is opened
    pub async fn create(&self, invoice: &NewInvoice) -> DbResult<Invoice> {
        let totals = compute_totals(&invoice.lines, invoice.tax_rate())?;
        let created_at = Utc::now();

        debug!(
            customer = %invoice.customer_name,
            lines = invoice.lines.len(),
            subtotal = totals.subtotal.cents(),
            total = totals.total.cents(),
            "Creating invoice"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let result = sqlx::query(
            r#"
            INSERT INTO invoices (
                customer_name, tax_rate_bps, subtotal_cents, total_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&invoice.customer_name)
        .bind(i64::from(invoice.tax_rate_bps))
        .bind(totals.subtotal.cents())
        .bind(totals.total.cents())
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        insert_lines(&mut tx, id, &invoice.lines).await?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, total = totals.total.cents(), "Invoice created");

        Ok(Invoice {
            id,
            customer_name: invoice.customer_name.clone(),
            lines: invoice.lines.clone(),
            tax_rate_bps: invoice.tax_rate_bps,
            subtotal_cents: totals.subtotal.cents(),
            total_cents: totals.total.cents(),
            created_at,
        })
    }

    /// Gets an invoice by its ID, lines in insertion order.
    ///
    /// ## Returns
    /// * `Ok(Some(Invoice))` - Invoice found
    /// * `Ok(None)` - Invoice not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Invoice>> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, customer_name, tax_rate_bps, subtotal_cents, total_cents, created_at
            FROM invoices
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, InvoiceLineRow>(
            r#"
            SELECT invoice_id, item_id, quantity, unit_price_cents
            FROM invoice_lines
            WHERE invoice_id = ?1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        let lines = lines.into_iter().map(InvoiceLine::from).collect();
        row.into_invoice(lines).map(Some)
    }

    /// Lists one page of invoices with their lines, ordered by id.
    ///
    /// Both queries run in one read transaction so the parents and lines
    /// come from the same snapshot. A page past the end is empty.
    pub async fn list_page(&self, page: Page) -> DbResult<Vec<Invoice>> {
        debug!(page = page.number(), size = page.size(), "Listing invoice page");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, customer_name, tax_rate_bps, subtotal_cents, total_cents, created_at
            FROM invoices
            ORDER BY id
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await?;

        let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
            return Ok(Vec::new());
        };

        let line_rows = sqlx::query_as::<_, InvoiceLineRow>(
            r#"
            SELECT invoice_id, item_id, quantity, unit_price_cents
            FROM invoice_lines
            WHERE invoice_id BETWEEN ?1 AND ?2
            ORDER BY invoice_id, position
            "#,
        )
        .bind(first.id)
        .bind(last.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        let mut grouped: HashMap<i64, Vec<InvoiceLine>> = HashMap::with_capacity(rows.len());
        for line in line_rows {
            grouped
                .entry(line.invoice_id)
                .or_default()
                .push(InvoiceLine::from(line));
        }

        rows.into_iter()
            .map(|row| {
                let lines = grouped.remove(&row.id).unwrap_or_default();
                row.into_invoice(lines)
            })
            .collect()
    }

    /// Counts invoices.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn insert_lines(
    tx: &mut Transaction<'_, Sqlite>,
    invoice_id: i64,
    lines: &[InvoiceLine],
) -> DbResult<()> {
    for (position, line) in lines.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO invoice_lines (
                invoice_id, position, item_id, quantity, unit_price_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(invoice_id)
        .bind(position as i64)
        .bind(line.item_id)
        .bind(line.quantity)
        .bind(line.unit_price_cents)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
