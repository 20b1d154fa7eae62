//! # Catalog Item Services
//!
//! CRUD over catalog items. Item types are normalized to lower case on the
//! way in so "Pizza" and "pizza" share a category.

use tracing::{debug, info};

use crate::dto::{DeletedResponse, ItemRequest, ItemResponse};
use crate::error::{ApiError, ApiResult};
use tally_core::validation::{parse_id, validate_new_item};
use tally_core::{Page, ITEM_PAGE_SIZE};
use tally_db::Database;

pub async fn create_item(db: &Database, request: ItemRequest) -> ApiResult<ItemResponse> {
    let new_item = request.into_new_item();
    validate_new_item(&new_item)?;

    let item = db.items().create(&new_item).await?;
    info!(id = item.id, name = %item.name, "create_item");

    Ok(item.into())
}

/// Lists the whole catalog, ordered by id.
pub async fn list_items(db: &Database) -> ApiResult<Vec<ItemResponse>> {
    let items = db.items().list().await?;
    debug!(count = items.len(), "list_items");

    Ok(items.into_iter().map(ItemResponse::from).collect())
}

/// Lists one page of the catalog (`ITEM_PAGE_SIZE` per page).
pub async fn list_items_page(db: &Database, raw_page: Option<&str>) -> ApiResult<Vec<ItemResponse>> {
    let page = Page::parse(raw_page, ITEM_PAGE_SIZE);
    debug!(page = page.number(), "list_items_page");

    let items = db.items().list_page(page).await?;

    Ok(items.into_iter().map(ItemResponse::from).collect())
}

pub async fn get_item(db: &Database, raw_id: &str) -> ApiResult<ItemResponse> {
    let id = parse_id(raw_id)?;

    db.items()
        .get_by_id(id)
        .await?
        .map(ItemResponse::from)
        .ok_or_else(|| ApiError::not_found("Item", id))
}

/// Replaces every field of an existing item.
///
/// Invoices that already reference the item keep their snapshot prices.
pub async fn update_item(db: &Database, raw_id: &str, request: ItemRequest) -> ApiResult<ItemResponse> {
    let id = parse_id(raw_id)?;
    let new_item = request.into_new_item();
    validate_new_item(&new_item)?;

    let item = new_item.with_id(id);
    db.items().update(&item).await?;
    info!(id, "update_item");

    Ok(item.into())
}

pub async fn delete_item(db: &Database, raw_id: &str) -> ApiResult<DeletedResponse> {
    let id = parse_id(raw_id)?;

    db.items().delete(id).await?;
    info!(id, "delete_item");

    Ok(DeletedResponse::item(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tally_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn request(name: &str, item_type: &str, price_cents: i64) -> ItemRequest {
        ItemRequest {
            name: name.to_string(),
            item_type: item_type.to_string(),
            price_cents,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_normalizes_type() {
        let db = test_db().await;

        let item = create_item(&db, request("Margherita", " Pizza", 1200)).await.unwrap();
        assert_eq!(item.item_type, "pizza");

        let fetched = get_item(&db, &item.id.to_string()).await.unwrap();
        assert_eq!(fetched, item);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_item() {
        let db = test_db().await;

        let err = create_item(&db, request("", "pizza", 1200)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = create_item(&db, request("Free?", "pizza", -1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(list_items(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = test_db().await;
        let item = create_item(&db, request("Cola", "drink", 250)).await.unwrap();
        let id = item.id.to_string();

        let updated = update_item(&db, &id, request("Cola Zero", "drink", 275)).await.unwrap();
        assert_eq!(updated.price_cents, 275);
        assert_eq!(get_item(&db, &id).await.unwrap(), updated);

        let deleted = delete_item(&db, &id).await.unwrap();
        assert_eq!(deleted.id, item.id);

        assert!(get_item(&db, &id).await.unwrap_err().is_not_found());
        assert!(delete_item(&db, &id).await.unwrap_err().is_not_found());
        assert!(update_item(&db, &id, request("x", "y", 1)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_items_page() {
        let db = test_db().await;
        for n in 0..11 {
            create_item(&db, request(&format!("item {}", n), "misc", 100)).await.unwrap();
        }

        assert_eq!(list_items(&db).await.unwrap().len(), 11);
        assert_eq!(list_items_page(&db, None).await.unwrap().len(), 10);
        assert_eq!(list_items_page(&db, Some("2")).await.unwrap().len(), 1);
        assert_eq!(list_items_page(&db, Some("0")).await.unwrap().len(), 10);
    }
}
