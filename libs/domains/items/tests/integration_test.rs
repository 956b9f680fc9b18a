//! Integration tests for the Items domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Database queries work correctly
//! - Search and range filters translate to the right SQL
//! - Ordering and pagination behave as expected
//! - Concurrent operations are handled properly

use domain_items::*;
use test_utils::{TestDatabase, TestDataBuilder, assertions::*};

fn item(name: &str, description: &str, price: f64, quantity: i32) -> CreateItem {
    CreateItem {
        name: name.to_string(),
        description: description.to_string(),
        price,
        quantity,
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_item() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = item(
        &builder.name("item", "main"),
        "Integration test item",
        9.99,
        5,
    );

    // Create item
    let created = repo.create(input.clone()).await.unwrap();

    assert!(created.id > 0, "store should assign a positive id");
    assert_eq!(created.name, input.name);
    assert_eq!(created.description, "Integration test item");
    assert_eq!(created.price, 9.99);
    assert_eq!(created.quantity, 5);

    // Retrieve item
    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "item should exist");

    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn test_get_missing_item_returns_none() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());

    let retrieved = repo.get_by_id(999).await.unwrap();
    assert!(retrieved.is_none(), "missing id should read back as None");
}

#[tokio::test]
async fn test_create_assigns_increasing_ids() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("increasing_ids");

    let first = repo
        .create(item(&builder.name("item", "first"), "first", 1.0, 1))
        .await
        .unwrap();
    let second = repo
        .create(item(&builder.name("item", "second"), "second", 2.0, 2))
        .await
        .unwrap();

    assert!(second.id > first.id, "ids should increase with insertion");
}

#[tokio::test]
async fn test_update_item_overwrites_all_fields() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update");

    let created = repo
        .create(item(
            &builder.name("item", "original"),
            "Original description",
            9.99,
            5,
        ))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            item(&builder.name("item", "updated"), "Updated description", 19.99, 3),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, builder.name("item", "updated"));
    assert_eq!(updated.description, "Updated description");
    assert_eq!(updated.price, 19.99);
    assert_eq!(updated.quantity, 3);

    // The overwrite must be persisted, not just echoed
    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "item should still exist");
    assert_eq!(retrieved, updated);
}

#[tokio::test]
async fn test_update_missing_item_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());

    let result = repo.update(999, item("ghost", "missing", 1.0, 1)).await;
    assert!(
        matches!(result, Err(ItemError::NotFound(999))),
        "Expected NotFound error, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_delete_item() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete");

    let created = repo
        .create(item(&builder.name("item", "to-delete"), "doomed", 1.0, 1))
        .await
        .unwrap();

    // Delete should succeed
    let deleted = repo.delete(created.id).await.unwrap();
    assert!(deleted, "delete should return true");

    // Item should no longer exist
    let retrieved = repo.get_by_id(created.id).await.unwrap();
    assert!(retrieved.is_none(), "item should be deleted");

    // Second delete should return false
    let deleted_again = repo.delete(created.id).await.unwrap();
    assert!(!deleted_again, "second delete should return false");
}

#[tokio::test]
async fn test_list_is_ordered_with_skip_and_limit() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_pagination");

    let mut created_ids = Vec::new();
    for i in 0..5 {
        let created = repo
            .create(item(
                &builder.name("item", &format!("bulk-{}", i)),
                "bulk",
                i as f64,
                i,
            ))
            .await
            .unwrap();
        created_ids.push(created.id);
    }

    // Full listing comes back in id order
    let all = repo
        .list(ItemFilter {
            skip: 0,
            limit: 100,
        })
        .await
        .unwrap();
    let listed_ids: Vec<i32> = all.iter().map(|i| i.id).collect();
    assert_eq!(listed_ids, created_ids);

    // Skip/limit slices that same ordering
    let page = repo.list(ItemFilter { skip: 1, limit: 2 }).await.unwrap();
    let page_ids: Vec<i32> = page.iter().map(|i| i.id).collect();
    assert_eq!(page_ids, created_ids[1..3].to_vec());
}

// ============================================================================
// Search Tests
// ============================================================================

#[tokio::test]
async fn test_search_numeric_query_matches_quantity() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());

    repo.create(item("5-port hub", "USB hub", 12.0, 3))
        .await
        .unwrap();
    repo.create(item("Cable", "HDMI", 7.0, 5)).await.unwrap();

    // "5" is an integer, so it searches quantity, not the names
    let found = repo.search("5").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Cable");
}

#[tokio::test]
async fn test_search_text_unions_name_and_description() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());

    let by_name = repo
        .create(item("widget deluxe", "top shelf", 30.0, 2))
        .await
        .unwrap();
    let by_description = repo
        .create(item("spanner", "fits any widget", 15.0, 9))
        .await
        .unwrap();
    let by_both = repo
        .create(item("widget mini", "tiny widget", 5.0, 40))
        .await
        .unwrap();
    repo.create(item("unrelated", "nothing here", 1.0, 0))
        .await
        .unwrap();

    let found = repo.search("widget").await.unwrap();
    let ids: Vec<i32> = found.iter().map(|i| i.id).collect();

    // Items matching both columns appear once, in id order
    assert_eq!(ids, vec![by_name.id, by_description.id, by_both.id]);
}

#[tokio::test]
async fn test_search_follows_store_collation() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());

    repo.create(item("Widget", "Cased name", 9.99, 1))
        .await
        .unwrap();

    // Postgres LIKE is case sensitive
    let found = repo.search("widget").await.unwrap();
    assert!(found.is_empty());

    let found = repo.search("Widget").await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_search_no_matches_is_empty() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());

    repo.create(item("Widget", "A standard widget", 9.99, 5))
        .await
        .unwrap();

    let found = repo.search("zzz").await.unwrap();
    assert!(found.is_empty());
}

// ============================================================================
// Price Range Tests
// ============================================================================

#[tokio::test]
async fn test_price_range_bounds_are_inclusive() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());

    repo.create(item("below", "just under", 9.99, 1))
        .await
        .unwrap();
    let low = repo
        .create(item("low", "at the floor", 10.0, 1))
        .await
        .unwrap();
    let mid = repo
        .create(item("mid", "inside", 15.5, 1))
        .await
        .unwrap();
    let high = repo
        .create(item("high", "at the ceiling", 20.0, 1))
        .await
        .unwrap();
    repo.create(item("above", "just over", 20.01, 1))
        .await
        .unwrap();

    let found = repo.filter_by_price_range(10, 20).await.unwrap();
    let ids: Vec<i32> = found.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![low.id, mid.id, high.id]);
}

#[tokio::test]
async fn test_price_range_with_no_matches_is_empty() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());

    repo.create(item("cheap", "pennies", 0.5, 1)).await.unwrap();

    let found = repo.filter_by_price_range(100, 200).await.unwrap();
    assert!(found.is_empty());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_maps_missing_rows_to_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let service = ItemService::new(repo);

    let result = service.get_item(999).await;
    assert!(matches!(result, Err(ItemError::NotFound(999))));

    let result = service.delete_item(999).await;
    assert!(matches!(result, Err(ItemError::NotFound(999))));
}

#[tokio::test]
async fn test_service_roundtrip() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let service = ItemService::new(repo);
    let builder = TestDataBuilder::from_test_name("service_roundtrip");

    let created = service
        .create_item(item(&builder.name("item", "roundtrip"), "via service", 3.5, 7))
        .await
        .unwrap();

    let fetched = service.get_item(created.id).await.unwrap();
    assert_eq!(fetched, created);

    service.delete_item(created.id).await.unwrap();
    let result = service.get_item(created.id).await;
    assert!(matches!(result, Err(ItemError::NotFound(_))));
}

// ============================================================================
// Concurrent Operations Tests
// ============================================================================

#[tokio::test]
async fn test_concurrent_creates() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("concurrent");

    // Spawn multiple concurrent create operations
    let mut handles = vec![];
    for i in 0..5 {
        let repo_clone = PgItemRepository::new(db.connection());
        let name = builder.name("item", &format!("concurrent-{}", i));

        let handle = tokio::spawn(async move {
            repo_clone
                .create(item(&name, "racing insert", i as f64, i))
                .await
        });

        handles.push(handle);
    }

    // Wait for all to complete
    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    // All should succeed with distinct ids
    assert_eq!(results.len(), 5);
    let mut ids: Vec<i32> = results
        .into_iter()
        .map(|r| r.expect("concurrent create should succeed").id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 5, "every insert should get its own id");

    // Verify all were created
    let repo = PgItemRepository::new(db.connection());
    let all = repo
        .list(ItemFilter {
            skip: 0,
            limit: 100,
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 5, "all items should be created");
}
