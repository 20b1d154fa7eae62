//! End-to-end boundary behaviour: raw input in, DTO or ApiError out.

use tally_api::dto::{from_json, CreateInvoiceRequest, ItemRequest};
use tally_api::services::{invoices, items};
use tally_api::{parse_id, parse_page, ErrorCode};
use tally_core::INVOICE_PAGE_SIZE;
use tally_db::{Database, DbConfig};

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

#[tokio::test]
async fn json_invoice_round_trip() {
    let db = test_db().await;

    let request: CreateInvoiceRequest = from_json(
        r#"{
            "customer_name": "Ada",
            "tax_rate_bps": 1000,
            "items": [
                { "item_id": 1, "quantity": 2, "unit_price_cents": 500 },
                { "item_id": 2, "quantity": 1, "unit_price_cents": 300 }
            ]
        }"#,
    )
    .unwrap();

    let created = invoices::create_invoice(&db, request).await.unwrap();
    assert_eq!(created.subtotal_cents, 1300);
    assert_eq!(created.tax_cents, 130);
    assert_eq!(created.total_cents, 1430);

    let fetched = invoices::get_invoice(&db, &created.id.to_string()).await.unwrap();
    assert_eq!(fetched, created);

    let json = serde_json::to_value(&fetched).unwrap();
    assert_eq!(json["items"][0]["item_id"], 1);
    assert_eq!(json["items"][1]["unit_price_cents"], 300);
    assert!(json["created_at"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn negative_inputs_are_rejected_before_storage() {
    let db = test_db().await;

    for body in [
        r#"{"customer_name":"Ada","tax_rate_bps":-5,"items":[]}"#,
        r#"{"customer_name":"Ada","tax_rate_bps":0,"items":[{"item_id":1,"quantity":-2,"unit_price_cents":500}]}"#,
        r#"{"customer_name":"Ada","tax_rate_bps":0,"items":[{"item_id":1,"quantity":2,"unit_price_cents":-500}]}"#,
        r#"{"customer_name":"","tax_rate_bps":0,"items":[]}"#,
    ] {
        let request: CreateInvoiceRequest = from_json(body).unwrap();
        let err = invoices::create_invoice(&db, request).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError, "body: {}", body);
        assert_eq!(err.status(), 400);
    }

    assert_eq!(db.invoices().count().await.unwrap(), 0);
}

#[tokio::test]
async fn prices_large_enough_to_overflow_totals_are_rejected() {
    let db = test_db().await;
    let huge = i64::MAX / 2 + 1;

    let single_line = format!(
        r#"{{"customer_name":"Ada","tax":0,
            "items":[{{"item_id":1,"quantity":2,"unit_price_cents":{huge}}}]}}"#
    );
    let two_lines = format!(
        r#"{{"customer_name":"Ada","tax":0,
            "items":[{{"item_id":1,"quantity":1,"unit_price_cents":{huge}}},
                     {{"item_id":2,"quantity":1,"unit_price_cents":{huge}}}]}}"#
    );

    for body in [single_line, two_lines] {
        let request: CreateInvoiceRequest = from_json(&body).unwrap();
        let err = invoices::create_invoice(&db, request).await.unwrap_err();
        assert_eq!(err.status(), 400, "body: {}", body);
        assert!(err.message.contains("items[0].price"), "{}", err.message);
    }

    assert_eq!(db.invoices().count().await.unwrap(), 0);
}

#[tokio::test]
async fn decimal_tax_percent_is_accepted() {
    let db = test_db().await;

    let request: CreateInvoiceRequest = from_json(
        r#"{"customer_name":"Ada","tax":8.5,
            "items":[{"item_id":1,"quantity":2,"unit_price_cents":500},
                     {"item_id":2,"quantity":1,"unit_price_cents":300}]}"#,
    )
    .unwrap();

    let created = invoices::create_invoice(&db, request).await.unwrap();
    assert_eq!(created.tax_rate_bps, 850);
    assert_eq!(created.total_cents, 1411);
}

#[tokio::test]
async fn unknown_item_references_are_accepted() {
    let db = test_db().await;

    let request: CreateInvoiceRequest = from_json(
        r#"{"customer_name":"Ada","tax_rate_bps":0,
            "items":[{"item_id":999,"quantity":1,"unit_price_cents":100}]}"#,
    )
    .unwrap();

    let created = invoices::create_invoice(&db, request).await.unwrap();
    assert_eq!(created.items[0].item_id, 999);
}

#[tokio::test]
async fn not_found_and_storage_failure_map_to_different_statuses() {
    let db = test_db().await;

    let err = invoices::get_invoice(&db, "77").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.status(), 404);

    db.close().await;

    let err = invoices::get_invoice(&db, "77").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::DatabaseError);
    assert_eq!(err.status(), 500);

    let err = invoices::list_invoices(&db, Some("1")).await.unwrap_err();
    assert_eq!(err.status(), 500);
}

#[tokio::test]
async fn catalog_crud_through_json() {
    let db = test_db().await;

    let request: ItemRequest = from_json(
        r#"{"name":"Pepperoni","type":"PIZZA","price_cents":1400,"description":"Spicy"}"#,
    )
    .unwrap();
    let item = items::create_item(&db, request).await.unwrap();
    assert_eq!(item.item_type, "pizza");

    let listed = items::list_items(&db).await.unwrap();
    assert_eq!(listed, vec![item.clone()]);

    let deleted = items::delete_item(&db, &item.id.to_string()).await.unwrap();
    assert_eq!(deleted.message, "Item deleted");
    assert!(items::list_items_page(&db, None).await.unwrap().is_empty());
}

#[test]
fn parsing_helpers() {
    assert_eq!(parse_id("5").unwrap(), 5);
    assert_eq!(parse_id("x").unwrap_err().status(), 400);
    assert_eq!(parse_id("-1").unwrap_err().status(), 400);

    assert_eq!(parse_page(Some("3"), INVOICE_PAGE_SIZE).offset(), 6);
    assert_eq!(parse_page(Some("0"), INVOICE_PAGE_SIZE).number(), 1);
    assert_eq!(parse_page(None, INVOICE_PAGE_SIZE).number(), 1);
}
