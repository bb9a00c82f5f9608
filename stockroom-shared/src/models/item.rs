/// Inventory item model and owner-scoped database operations
///
/// This module provides the InventoryItem model and the CRUD operations the
/// inventory API is built on. Every operation except creation takes the
/// owner's id and filters on it in the WHERE clause; no query here can touch
/// another owner's rows, even with a guessed item id.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE inventory (
///     item_id     INTEGER PRIMARY KEY AUTOINCREMENT,
///     name        TEXT    NOT NULL,
///     image       BLOB,
///     description TEXT    NOT NULL DEFAULT '',
///     quantity    INTEGER NOT NULL,
///     price       REAL    NOT NULL,
///     owner_id    INTEGER NOT NULL REFERENCES users (user_id),
///     UNIQUE (owner_id, name)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::models::item::{InventoryItem, CreateItem};
/// use stockroom_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let item = InventoryItem::create(&pool, CreateItem {
///     owner_id: 1,
///     name: "Espresso beans".to_string(),
///     description: "1kg dark roast".to_string(),
///     quantity: 12,
///     price: 18.5,
///     image: None,
/// }).await?;
///
/// let items = InventoryItem::list_for_owner(&pool, 1).await?;
/// assert!(items.iter().any(|i| i.item_id == item.item_id));
/// # Ok(())
/// # }
/// ```
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::images;

/// An inventory row belonging to exactly one owner
///
/// The item fields follow one canonical order everywhere in this codebase:
/// `name, image, description, quantity, price`. The store, the display row,
/// and both exporters all use this order, so a field can never silently
/// swap position between layers.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryItem {
    /// Unique item ID, assigned by the database
    pub item_id: i64,

    /// Owning account; set at creation and never changed
    pub owner_id: i64,

    /// Item name, unique per owner
    pub name: String,

    /// Raw bytes of the uploaded image, if one was supplied
    ///
    /// `None` means "no image was uploaded", which is distinct from an
    /// empty byte payload.
    pub image: Option<Vec<u8>>,

    /// Free-text description, may be empty
    pub description: String,

    /// Units on hand, never negative
    pub quantity: i64,

    /// Unit price; rendered with exactly two decimals on export
    pub price: f64,
}

/// Input for creating a new inventory item
///
/// Numeric fields arrive here already parsed and range-checked; the API
/// layer rejects malformed or negative input before building this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    /// Owning account id
    pub owner_id: i64,

    /// Item name (must be unique for this owner)
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Initial quantity on hand
    pub quantity: i64,

    /// Unit price
    pub price: f64,

    /// Raw image bytes, if an image was uploaded
    pub image: Option<Vec<u8>>,
}

/// Display-ready row consumed by list views and the stock classifier
///
/// Carries the image as a self-contained data URI instead of raw bytes, so
/// it can be serialized straight into a JSON response. The id is included
/// so clients can address deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    /// Item id, for addressing deletes
    pub item_id: i64,

    /// Item name
    pub name: String,

    /// Base64 data URI of the stored image, or None when there is none
    pub image_uri: Option<String>,

    /// Free-text description
    pub description: String,

    /// Units on hand
    pub quantity: i64,

    /// Unit price
    pub price: f64,
}

impl From<&InventoryItem> for ItemView {
    fn from(item: &InventoryItem) -> Self {
        Self {
            item_id: item.item_id,
            name: item.name.clone(),
            image_uri: images::to_display_uri(item.image.as_deref()),
            description: item.description.clone(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

impl InventoryItem {
    /// Creates a new inventory item
    ///
    /// Duplicate names are rejected by the `UNIQUE (owner_id, name)`
    /// constraint in the same statement that would insert the row. Two
    /// concurrent creates of the same name therefore cannot race: the
    /// second insert fails with a unique-violation error and nothing is
    /// written.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - Item creation data, already validated
    ///
    /// # Returns
    ///
    /// The newly created item with its generated ID
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - This owner already has an item with this name (unique violation)
    /// - Database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use stockroom_shared::models::item::{InventoryItem, CreateItem};
    /// # use sqlx::SqlitePool;
    /// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
    /// let item = InventoryItem::create(&pool, CreateItem {
    ///     owner_id: 1,
    ///     name: "Pear".to_string(),
    ///     description: String::new(),
    ///     quantity: 40,
    ///     price: 0.8,
    ///     image: None,
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &SqlitePool, data: CreateItem) -> Result<Self, sqlx::Error> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory (owner_id, name, image, description, quantity, price)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING item_id, owner_id, name, image, description, quantity, price
            "#,
        )
        .bind(data.owner_id)
        .bind(data.name)
        .bind(data.image)
        .bind(data.description)
        .bind(data.quantity)
        .bind(data.price)
        .fetch_one(pool)
        .await?;

        Ok(item)
    }

    /// Lists all items belonging to one owner
    ///
    /// Rows are ordered by name for stable display; insertion order carries
    /// no meaning. Images come back as raw bytes, callers encode them per
    /// destination.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn list_for_owner(
        pool: &SqlitePool,
        owner_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT item_id, owner_id, name, image, description, quantity, price
            FROM inventory
            WHERE owner_id = ?
            ORDER BY name
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// Looks up the quantity of one item by name
    ///
    /// # Returns
    ///
    /// The quantity if this owner has an item with that name, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn quantity_by_name(
        pool: &SqlitePool,
        owner_id: i64,
        name: &str,
    ) -> Result<Option<i64>, sqlx::Error> {
        let quantity = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT quantity FROM inventory
            WHERE owner_id = ? AND name = ?
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(quantity)
    }

    /// Sets the quantity of one item, addressed by name
    ///
    /// Touches the quantity column only; no other field is ever updated in
    /// place.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `owner_id` - Owning account id
    /// * `name` - Item name within that owner's inventory
    /// * `quantity` - New quantity, already checked non-negative
    ///
    /// # Returns
    ///
    /// The updated item, or None if this owner has no item with that name
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use stockroom_shared::models::item::InventoryItem;
    /// # use sqlx::SqlitePool;
    /// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
    /// match InventoryItem::update_quantity(&pool, 1, "Pear", 4).await? {
    ///     Some(item) => println!("now {}", item.quantity),
    ///     None => println!("no such item"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_quantity(
        pool: &SqlitePool,
        owner_id: i64,
        name: &str,
        quantity: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory
            SET quantity = ?
            WHERE owner_id = ? AND name = ?
            RETURNING item_id, owner_id, name, image, description, quantity, price
            "#,
        )
        .bind(quantity)
        .bind(owner_id)
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// Deletes one item by id, scoped to its owner
    ///
    /// The owner filter sits in the WHERE clause itself, so a forged or
    /// foreign id deletes nothing and reports as not found.
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if the id does not exist or belongs
    /// to a different owner
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn delete(
        pool: &SqlitePool,
        owner_id: i64,
        item_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inventory WHERE item_id = ? AND owner_id = ?")
            .bind(item_id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts the items belonging to one owner
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn count_for_owner(pool: &SqlitePool, owner_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM inventory WHERE owner_id = ?")
                .bind(owner_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
