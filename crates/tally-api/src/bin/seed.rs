//! # Seed Data Generator
//!
//! Populates the database with a sample catalog and invoices for development.
//!
//! ## Usage
//! ```bash
//! # Seed the database named by TALLY_DB_PATH (default ./data/tally.db)
//! cargo run -p tally-api --bin seed
//!
//! # Generate a custom number of invoices
//! cargo run -p tally-api --bin seed -- --invoices 25
//!
//! # Specify database path
//! cargo run -p tally-api --bin seed -- --db ./data/dev.db
//! ```
//!
//! Everything goes through the service layer, so seeded rows pass the same
//! validation as client input. A JSON summary is printed on completion.

use std::env;

use serde_json::json;
use tally_api::dto::{CreateInvoiceRequest, InvoiceLineRequest, ItemRequest};
use tally_api::services::{invoices, items};
use tally_api::{init_tracing, AppConfig};
use tally_db::{migrations, Database};
use tracing::{info, warn};

/// Sample catalog: (name, type, price in cents, description)
const CATALOG: &[(&str, &str, i64, &str)] = &[
    ("Margherita", "Pizza", 1200, "Tomato, mozzarella, basil"),
    ("Pepperoni", "Pizza", 1400, "Tomato, mozzarella, pepperoni"),
    ("Quattro Formaggi", "Pizza", 1550, "Four cheeses"),
    ("Garlic Bread", "Side", 450, ""),
    ("Caesar Salad", "Side", 800, "Romaine, parmesan, croutons"),
    ("Cola", "Drink", 250, "330ml can"),
    ("Sparkling Water", "Drink", 200, "500ml bottle"),
    ("Tiramisu", "Dessert", 650, ""),
];

const CUSTOMERS: &[&str] = &["Ada", "Grace", "Linus", "Margaret", "Ken", "Barbara"];

/// Tax rates in basis points
const TAX_RATES: &[i64] = &[0, 500, 825, 1000];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config = AppConfig::from_env()?;
    let mut invoice_count: usize = 7;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--invoices" | "-n" => {
                if let Some(value) = args.get(i + 1) {
                    invoice_count = value.parse().unwrap_or(invoice_count);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if let Some(value) = args.get(i + 1) {
                    config.db_path = value.into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tally Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --invoices <N>  Number of invoices to generate (default: 7)");
                println!("  -d, --db <PATH>     Database file path (default: $TALLY_DB_PATH)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::new(config.db_config()).await?;
    let (available, applied) = migrations::migration_status(db.pool()).await?;
    info!(path = %config.db_path.display(), applied, available, "Connected to database");

    let existing = db.items().count().await?;
    if existing > 0 {
        warn!(existing, "Database already has catalog items, skipping seed");
        db.close().await;
        return Ok(());
    }

    let mut item_ids = Vec::with_capacity(CATALOG.len());
    for (name, item_type, price_cents, description) in CATALOG {
        let item = items::create_item(
            &db,
            ItemRequest {
                name: name.to_string(),
                item_type: item_type.to_string(),
                price_cents: *price_cents,
                description: description.to_string(),
            },
        )
        .await?;
        item_ids.push((item.id, item.price_cents));
    }

    let mut revenue_cents = 0;
    for seed in 0..invoice_count {
        let line_count = 1 + seed % 3;
        let lines = (0..line_count)
            .map(|offset| {
                let (item_id, unit_price_cents) = item_ids[(seed * 3 + offset) % item_ids.len()];
                InvoiceLineRequest {
                    item_id,
                    quantity: 1 + ((seed + offset) % 4) as i64,
                    unit_price_cents,
                }
            })
            .collect();

        let invoice = invoices::create_invoice(
            &db,
            CreateInvoiceRequest {
                customer_name: CUSTOMERS[seed % CUSTOMERS.len()].to_string(),
                tax: None,
                tax_rate_bps: Some(TAX_RATES[seed % TAX_RATES.len()]),
                items: lines,
            },
        )
        .await?;
        revenue_cents += invoice.total_cents;
    }

    let summary = json!({
        "database": config.db_path.display().to_string(),
        "migration_status": { "applied": applied, "available": available },
        "items": db.items().count().await?,
        "invoices": db.invoices().count().await?,
        "revenue": config.format_currency(revenue_cents),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    db.close().await;
    Ok(())
}
