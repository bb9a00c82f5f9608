/// Integration tests for the store layer
///
/// Each test runs against its own in-memory SQLite database, so the suite
/// needs no external services and tests can run in parallel.
/// Run with: cargo test --test store_tests
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use stockroom_shared::db::migrations::MIGRATOR;
use stockroom_shared::models::item::{CreateItem, InventoryItem};
use stockroom_shared::models::owner::{CreateOwner, Owner};

/// Opens a fresh migrated in-memory database
///
/// The pool is capped at one connection; an in-memory database lives and
/// dies with its connection, so a second connection would see an empty
/// schema instead of the migrated one. Foreign keys are switched on to
/// match the production pool.
async fn setup_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Memory database URL should parse")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    MIGRATOR.run(&pool).await.expect("Migrations failed");

    pool
}

async fn setup_owner(pool: &SqlitePool, username: &str) -> Owner {
    Owner::create(
        pool,
        CreateOwner {
            username: username.to_string(),
            password_hash: "$argon2id$placeholder-hash".to_string(),
            store_name: format!("{username} general store"),
        },
    )
    .await
    .expect("Failed to create owner")
}

fn new_item(owner_id: i64, name: &str, quantity: i64) -> CreateItem {
    CreateItem {
        owner_id,
        name: name.to_string(),
        description: format!("{name} description"),
        quantity,
        price: 2.5,
        image: None,
    }
}

#[tokio::test]
async fn test_create_and_list_items() {
    let pool = setup_pool().await;
    let owner = setup_owner(&pool, "alice").await;

    let created = InventoryItem::create(&pool, new_item(owner.owner_id, "Pears", 40))
        .await
        .expect("Failed to create item");

    assert!(created.item_id > 0);
    assert_eq!(created.owner_id, owner.owner_id);
    assert_eq!(created.name, "Pears");
    assert_eq!(created.quantity, 40);

    InventoryItem::create(&pool, new_item(owner.owner_id, "Apples", 12))
        .await
        .expect("Failed to create second item");

    // Listing is ordered by name, not by insertion order
    let items = InventoryItem::list_for_owner(&pool, owner.owner_id)
        .await
        .expect("Failed to list items");

    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Apples", "Pears"]);
}

#[tokio::test]
async fn test_image_blob_roundtrip() {
    let pool = setup_pool().await;
    let owner = setup_owner(&pool, "alice").await;

    let blob = vec![0x89, 0x50, 0x4E, 0x47, 0x00, 0xFF];
    let mut data = new_item(owner.owner_id, "Mug", 3);
    data.image = Some(blob.clone());

    let created = InventoryItem::create(&pool, data)
        .await
        .expect("Failed to create item with image");
    assert_eq!(created.image.as_deref(), Some(blob.as_slice()));

    let items = InventoryItem::list_for_owner(&pool, owner.owner_id)
        .await
        .expect("Failed to list items");
    assert_eq!(items[0].image.as_deref(), Some(blob.as_slice()));
}

#[tokio::test]
async fn test_list_is_scoped_to_owner() {
    let pool = setup_pool().await;
    let alice = setup_owner(&pool, "alice").await;
    let bob = setup_owner(&pool, "bob").await;

    InventoryItem::create(&pool, new_item(alice.owner_id, "Apples", 10))
        .await
        .expect("Failed to create item");
    InventoryItem::create(&pool, new_item(alice.owner_id, "Pears", 5))
        .await
        .expect("Failed to create item");
    InventoryItem::create(&pool, new_item(bob.owner_id, "Hammers", 7))
        .await
        .expect("Failed to create item");

    let alice_items = InventoryItem::list_for_owner(&pool, alice.owner_id)
        .await
        .expect("Failed to list items");
    let bob_items = InventoryItem::list_for_owner(&pool, bob.owner_id)
        .await
        .expect("Failed to list items");

    assert_eq!(alice_items.len(), 2);
    assert_eq!(bob_items.len(), 1);
    assert!(alice_items.iter().all(|i| i.owner_id == alice.owner_id));
    assert_eq!(bob_items[0].name, "Hammers");
}

#[tokio::test]
async fn test_duplicate_name_rejected_for_same_owner() {
    let pool = setup_pool().await;
    let owner = setup_owner(&pool, "alice").await;

    InventoryItem::create(&pool, new_item(owner.owner_id, "Apples", 10))
        .await
        .expect("Failed to create item");

    let err = InventoryItem::create(&pool, new_item(owner.owner_id, "Apples", 99))
        .await
        .expect_err("Duplicate name should be rejected");

    match err {
        sqlx::Error::Database(db) => {
            assert!(matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation));
            // The API layer tells owner and item conflicts apart by the
            // constrained table named in the message.
            assert!(db.message().contains("inventory."), "message: {}", db.message());
        }
        other => panic!("Expected a database error, got: {other:?}"),
    }

    // The original row is untouched and no second row was written
    assert_eq!(
        InventoryItem::count_for_owner(&pool, owner.owner_id)
            .await
            .expect("Failed to count items"),
        1
    );
    assert_eq!(
        InventoryItem::quantity_by_name(&pool, owner.owner_id, "Apples")
            .await
            .expect("Failed to read quantity"),
        Some(10)
    );
}

#[tokio::test]
async fn test_same_name_allowed_across_owners() {
    let pool = setup_pool().await;
    let alice = setup_owner(&pool, "alice").await;
    let bob = setup_owner(&pool, "bob").await;

    InventoryItem::create(&pool, new_item(alice.owner_id, "Apples", 10))
        .await
        .expect("Failed to create item for first owner");
    InventoryItem::create(&pool, new_item(bob.owner_id, "Apples", 3))
        .await
        .expect("Same name under a different owner should be allowed");

    assert_eq!(
        InventoryItem::quantity_by_name(&pool, alice.owner_id, "Apples")
            .await
            .expect("Failed to read quantity"),
        Some(10)
    );
    assert_eq!(
        InventoryItem::quantity_by_name(&pool, bob.owner_id, "Apples")
            .await
            .expect("Failed to read quantity"),
        Some(3)
    );
}

#[tokio::test]
async fn test_quantity_by_name_misses() {
    let pool = setup_pool().await;
    let alice = setup_owner(&pool, "alice").await;
    let bob = setup_owner(&pool, "bob").await;

    InventoryItem::create(&pool, new_item(alice.owner_id, "Apples", 10))
        .await
        .expect("Failed to create item");

    let missing = InventoryItem::quantity_by_name(&pool, alice.owner_id, "Bananas")
        .await
        .expect("Lookup should not error");
    assert_eq!(missing, None);

    // Another owner's item name does not resolve
    let foreign = InventoryItem::quantity_by_name(&pool, bob.owner_id, "Apples")
        .await
        .expect("Lookup should not error");
    assert_eq!(foreign, None);
}

#[tokio::test]
async fn test_update_quantity() {
    let pool = setup_pool().await;
    let owner = setup_owner(&pool, "alice").await;

    InventoryItem::create(&pool, new_item(owner.owner_id, "Apples", 10))
        .await
        .expect("Failed to create item");

    let updated = InventoryItem::update_quantity(&pool, owner.owner_id, "Apples", 0)
        .await
        .expect("Update should not error")
        .expect("Item should exist");

    assert_eq!(updated.quantity, 0);
    assert_eq!(
        InventoryItem::quantity_by_name(&pool, owner.owner_id, "Apples")
            .await
            .expect("Failed to read quantity"),
        Some(0)
    );
}

#[tokio::test]
async fn test_update_quantity_missing_item_changes_nothing() {
    let pool = setup_pool().await;
    let owner = setup_owner(&pool, "alice").await;

    InventoryItem::create(&pool, new_item(owner.owner_id, "Apples", 10))
        .await
        .expect("Failed to create item");

    let before = InventoryItem::list_for_owner(&pool, owner.owner_id)
        .await
        .expect("Failed to list items");

    let result = InventoryItem::update_quantity(&pool, owner.owner_id, "Bananas", 50)
        .await
        .expect("Update should not error");
    assert!(result.is_none());

    let after = InventoryItem::list_for_owner(&pool, owner.owner_id)
        .await
        .expect("Failed to list items");

    let snapshot = |items: &[InventoryItem]| {
        items
            .iter()
            .map(|i| (i.name.clone(), i.quantity))
            .collect::<Vec<_>>()
    };
    assert_eq!(snapshot(&before), snapshot(&after));
}

#[tokio::test]
async fn test_update_quantity_is_scoped_to_owner() {
    let pool = setup_pool().await;
    let alice = setup_owner(&pool, "alice").await;
    let bob = setup_owner(&pool, "bob").await;

    InventoryItem::create(&pool, new_item(alice.owner_id, "Apples", 10))
        .await
        .expect("Failed to create item");

    // Bob addressing Alice's item name hits nothing
    let result = InventoryItem::update_quantity(&pool, bob.owner_id, "Apples", 0)
        .await
        .expect("Update should not error");
    assert!(result.is_none());

    assert_eq!(
        InventoryItem::quantity_by_name(&pool, alice.owner_id, "Apples")
            .await
            .expect("Failed to read quantity"),
        Some(10)
    );
}

#[tokio::test]
async fn test_delete_item() {
    let pool = setup_pool().await;
    let owner = setup_owner(&pool, "alice").await;

    let item = InventoryItem::create(&pool, new_item(owner.owner_id, "Apples", 10))
        .await
        .expect("Failed to create item");

    let deleted = InventoryItem::delete(&pool, owner.owner_id, item.item_id)
        .await
        .expect("Delete should not error");
    assert!(deleted);
    assert_eq!(
        InventoryItem::count_for_owner(&pool, owner.owner_id)
            .await
            .expect("Failed to count items"),
        0
    );

    // Deleting the same id again reports not found
    let deleted_again = InventoryItem::delete(&pool, owner.owner_id, item.item_id)
        .await
        .expect("Delete should not error");
    assert!(!deleted_again);
}

#[tokio::test]
async fn test_delete_is_scoped_to_owner() {
    let pool = setup_pool().await;
    let alice = setup_owner(&pool, "alice").await;
    let bob = setup_owner(&pool, "bob").await;

    let item = InventoryItem::create(&pool, new_item(alice.owner_id, "Apples", 10))
        .await
        .expect("Failed to create item");

    // Bob deleting by Alice's real item id affects nothing
    let deleted = InventoryItem::delete(&pool, bob.owner_id, item.item_id)
        .await
        .expect("Delete should not error");
    assert!(!deleted);

    assert_eq!(
        InventoryItem::count_for_owner(&pool, alice.owner_id)
            .await
            .expect("Failed to count items"),
        1
    );
}

#[tokio::test]
async fn test_owner_create_and_find() {
    let pool = setup_pool().await;

    let owner = setup_owner(&pool, "alice").await;
    assert!(owner.owner_id > 0);
    assert_eq!(owner.username, "alice");
    assert_eq!(owner.store_name, "alice general store");

    let by_name = Owner::find_by_username(&pool, "alice")
        .await
        .expect("Lookup should not error")
        .expect("Owner should exist");
    assert_eq!(by_name.owner_id, owner.owner_id);

    let by_id = Owner::find_by_id(&pool, owner.owner_id)
        .await
        .expect("Lookup should not error")
        .expect("Owner should exist");
    assert_eq!(by_id.username, "alice");

    let missing = Owner::find_by_username(&pool, "nobody")
        .await
        .expect("Lookup should not error");
    assert!(missing.is_none());

    assert_eq!(Owner::count(&pool).await.expect("Failed to count owners"), 1);
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let pool = setup_pool().await;
    setup_owner(&pool, "alice").await;

    let err = Owner::create(
        &pool,
        CreateOwner {
            username: "alice".to_string(),
            password_hash: "$argon2id$other-hash".to_string(),
            store_name: "Second store".to_string(),
        },
    )
    .await
    .expect_err("Duplicate username should be rejected");

    match err {
        sqlx::Error::Database(db) => {
            assert!(matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation));
            assert!(
                db.message().contains("users.username"),
                "message: {}",
                db.message()
            );
        }
        other => panic!("Expected a database error, got: {other:?}"),
    }

    assert_eq!(Owner::count(&pool).await.expect("Failed to count owners"), 1);
}

#[tokio::test]
async fn test_items_require_existing_owner() {
    let pool = setup_pool().await;

    // Foreign keys are enforced on this pool; no such owner id exists
    let result = InventoryItem::create(&pool, new_item(4242, "Apples", 1)).await;

    match result {
        Err(sqlx::Error::Database(db)) => {
            assert!(matches!(
                db.kind(),
                sqlx::error::ErrorKind::ForeignKeyViolation
            ));
        }
        other => panic!("Expected a foreign key violation, got: {other:?}"),
    }
}
