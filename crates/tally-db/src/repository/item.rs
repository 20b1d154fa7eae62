//! # Item Repository
//!
//! Database operations for catalog items.
//!
//! Every operation here is a single statement against the `items` table, so
//! there is no partial state to protect. Invoice lines copy the price they
//! need, which is why updating or deleting an item never touches invoices.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tally_core::{Item, NewItem, Page};

/// Row shape of the `items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    #[sqlx(rename = "type")]
    item_type: String,
    price_cents: i64,
    description: String,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            item_type: row.item_type,
            price_cents: row.price_cents,
            description: row.description,
        }
    }
}

/// Repository for catalog item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.items();
///
/// let item = repo.create(&new_item).await?;
/// let page = repo.list_page(Page::new(2, ITEM_PAGE_SIZE)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Inserts a new item.
    ///
    /// ## Returns
    /// The item with its store-assigned id.
    pub async fn create(&self, item: &NewItem) -> DbResult<Item> {
        debug!(name = %item.name, item_type = %item.item_type, "Inserting item");

        let result = sqlx::query(
            r#"
            INSERT INTO items (name, type, price_cents, description)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&item.name)
        .bind(&item.item_type)
        .bind(item.price_cents)
        .bind(&item.description)
        .execute(&self.pool)
        .await?;

        Ok(item.clone().with_id(result.last_insert_rowid()))
    }

    /// Lists every item, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, type, price_cents, description
            FROM items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Lists one page of items, ordered by id.
    pub async fn list_page(&self, page: Page) -> DbResult<Vec<Item>> {
        debug!(page = page.number(), size = page.size(), "Listing item page");

        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, type, price_cents, description
            FROM items
            ORDER BY id
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, type, price_cents, description
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    /// Updates an existing item.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn update(&self, item: &Item) -> DbResult<()> {
        debug!(id = item.id, "Updating item");

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                type = ?3,
                price_cents = ?4,
                description = ?5
            WHERE id = ?1
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.item_type)
        .bind(item.price_cents)
        .bind(&item.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", item.id));
        }

        Ok(())
    }

    /// Deletes an item.
    ///
    /// Existing invoice lines that reference the item keep their snapshot.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Counts items (for diagnostics and page counts).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use tally_core::ITEM_PAGE_SIZE;

    fn new_item(name: &str, price_cents: i64) -> NewItem {
        NewItem {
            name: name.to_string(),
            item_type: "pizza".to_string(),
            price_cents,
            description: format!("{} description", name),
        }
    }

    async fn test_repo() -> ItemRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().items()
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = test_repo().await;

        let first = repo.create(&new_item("Margherita", 1200)).await.unwrap();
        let second = repo.create(&new_item("Marinara", 1000)).await.unwrap();

        assert!(first.id >= 1);
        assert!(second.id > first.id);
        assert_eq!(repo.get_by_id(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_list_orders_by_id() {
        let repo = test_repo().await;
        for name in ["c", "a", "b"] {
            repo.create(&new_item(name, 100)).await.unwrap();
        }

        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_list_page() {
        let repo = test_repo().await;
        for n in 0..12 {
            repo.create(&new_item(&format!("item-{}", n), 100)).await.unwrap();
        }

        let first = repo.list_page(Page::new(1, ITEM_PAGE_SIZE)).await.unwrap();
        let second = repo.list_page(Page::new(2, ITEM_PAGE_SIZE)).await.unwrap();
        let clamped = repo.list_page(Page::new(0, ITEM_PAGE_SIZE)).await.unwrap();

        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].name, "item-10");
        assert_eq!(clamped, first);
        assert_eq!(repo.count().await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_update() {
        let repo = test_repo().await;
        let mut item = repo.create(&new_item("Calzone", 1500)).await.unwrap();

        item.price_cents = 1650;
        item.description = "Folded".to_string();
        repo.update(&item).await.unwrap();

        assert_eq!(repo.get_by_id(item.id).await.unwrap(), Some(item));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = test_repo().await;
        let ghost = new_item("Ghost", 100).with_id(999);

        assert!(matches!(
            repo.update(&ghost).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = test_repo().await;
        let item = repo.create(&new_item("Garlic bread", 500)).await.unwrap();

        repo.delete(item.id).await.unwrap();
        assert_eq!(repo.get_by_id(item.id).await.unwrap(), None);
        assert!(matches!(
            repo.delete(item.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_negative_price_violates_schema() {
        let repo = test_repo().await;
        let result = repo.create(&new_item("Broken", -1)).await;
        assert!(matches!(result, Err(DbError::CheckViolation { .. })));
    }
}
