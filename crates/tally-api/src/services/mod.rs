//! # Service Functions
//!
//! One async function per client operation. Each one parses its raw input,
//! validates it, calls a repository and maps the result to a response DTO.
//!
//! ```text
//! invoices::create_invoice   items::create_item
//! invoices::get_invoice      items::get_item
//! invoices::list_invoices    items::list_items
//!                            items::list_items_page
//!                            items::update_item
//!                            items::delete_item
//! ```

pub mod invoices;
pub mod items;
