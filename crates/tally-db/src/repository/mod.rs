//! # Repository Module
//!
//! Database repository implementations for Tally.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Service function                                                       │
//! │       │                                                                 │
//! │       │  db.invoices().get_by_id(7)                                    │
//! │       ▼                                                                 │
//! │  InvoiceRepository                                                     │
//! │  ├── create(&self, new_invoice)     one transaction, 1 + N inserts     │
//! │  ├── get_by_id(&self, id)           parent, then ordered lines         │
//! │  └── list_page(&self, page)         parents + lines, regrouped         │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Catalog item CRUD and pagination
//! - [`invoice::InvoiceRepository`] - Atomic invoice creation and reads

pub mod invoice;
pub mod item;
