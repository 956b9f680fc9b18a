use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, ItemFilter};

/// Repository trait for Item persistence
///
/// This trait defines the data access interface for items.
/// Implementations can use different storage backends (Postgres, in-memory, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Create a new item and assign its id
    async fn create(&self, input: CreateItem) -> ItemResult<Item>;

    /// Get an item by ID
    async fn get_by_id(&self, id: i32) -> ItemResult<Option<Item>>;

    /// List items ordered by id, honouring skip/limit
    async fn list(&self, filter: ItemFilter) -> ItemResult<Vec<Item>>;

    /// Overwrite every field of an existing item
    async fn update(&self, id: i32, input: CreateItem) -> ItemResult<Item>;

    /// Delete an item by ID, returning whether a row was removed
    async fn delete(&self, id: i32) -> ItemResult<bool>;

    /// Search by quantity when the term is an integer, otherwise by
    /// name/description substring
    async fn search(&self, query: &str) -> ItemResult<Vec<Item>>;

    /// Items whose price falls inside the inclusive bounds
    async fn filter_by_price_range(&self, min: i64, max: i64) -> ItemResult<Vec<Item>>;
}

/// In-memory implementation backed by a HashMap, for tests and local
/// development without a database
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<i32, Item>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let item = Item {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
        };

        let mut items = self.items.write().await;
        items.insert(id, item.clone());
        Ok(item)
    }

    async fn get_by_id(&self, id: i32) -> ItemResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn list(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        let mut all: Vec<Item> = items.values().cloned().collect();
        all.sort_by_key(|item| item.id);

        Ok(all
            .into_iter()
            .skip(filter.skip as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn update(&self, id: i32, input: CreateItem) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).ok_or(ItemError::NotFound(id))?;

        item.name = input.name;
        item.description = input.description;
        item.price = input.price;
        item.quantity = input.quantity;
        Ok(item.clone())
    }

    async fn delete(&self, id: i32) -> ItemResult<bool> {
        let mut items = self.items.write().await;
        Ok(items.remove(&id).is_some())
    }

    async fn search(&self, query: &str) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;

        let mut matches: Vec<Item> = match query.parse::<i32>() {
            Ok(quantity) => items
                .values()
                .filter(|item| item.quantity == quantity)
                .cloned()
                .collect(),
            Err(_) => {
                let mut found: Vec<Item> = items
                    .values()
                    .filter(|item| item.name.contains(query))
                    .cloned()
                    .collect();
                let mut seen: HashSet<i32> = found.iter().map(|item| item.id).collect();

                for item in items.values().filter(|item| item.description.contains(query)) {
                    if seen.insert(item.id) {
                        found.push(item.clone());
                    }
                }
                found
            }
        };

        matches.sort_by_key(|item| item.id);
        Ok(matches)
    }

    async fn filter_by_price_range(&self, min: i64, max: i64) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;

        let mut matches: Vec<Item> = items
            .values()
            .filter(|item| item.price >= min as f64 && item.price <= max as f64)
            .cloned()
            .collect();

        matches.sort_by_key(|item| item.id);
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(price: f64, quantity: i32) -> CreateItem {
        CreateItem {
            name: "Widget".to_string(),
            description: "A standard widget".to_string(),
            price,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryItemRepository::new();

        let first = repo.create(widget(1.0, 1)).await.unwrap();
        let second = repo.create(widget(2.0, 2)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_get_by_id_returns_created_item() {
        let repo = InMemoryItemRepository::new();
        let created = repo.create(widget(9.99, 5)).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));

        let missing = repo.get_by_id(999).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_paginated() {
        let repo = InMemoryItemRepository::new();
        for i in 1..=5 {
            repo.create(widget(i as f64, i)).await.unwrap();
        }

        let page = repo
            .list(ItemFilter { skip: 1, limit: 2 })
            .await
            .unwrap();
        let ids: Vec<i32> = page.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_list_default_limit_caps_results() {
        let repo = InMemoryItemRepository::new();
        for i in 1..=15 {
            repo.create(widget(i as f64, i)).await.unwrap();
        }

        let page = repo.list(ItemFilter::default()).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].id, 1);
    }

    #[tokio::test]
    async fn test_update_overwrites_every_field() {
        let repo = InMemoryItemRepository::new();
        let created = repo.create(widget(9.99, 5)).await.unwrap();

        let updated = repo
            .update(
                created.id,
                CreateItem {
                    name: "Gadget".to_string(),
                    description: "Improved".to_string(),
                    price: 19.99,
                    quantity: 3,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Gadget");
        assert_eq!(updated.description, "Improved");
        assert_eq!(updated.price, 19.99);
        assert_eq!(updated.quantity, 3);
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let repo = InMemoryItemRepository::new();
        let result = repo.update(999, widget(1.0, 1)).await;
        assert!(matches!(result, Err(ItemError::NotFound(999))));
    }

    #[tokio::test]
    async fn test_delete_reports_removed_row() {
        let repo = InMemoryItemRepository::new();
        let created = repo.create(widget(1.0, 1)).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_search_numeric_matches_quantity_only() {
        let repo = InMemoryItemRepository::new();
        repo.create(CreateItem {
            name: "5-port hub".to_string(),
            description: "USB hub".to_string(),
            price: 12.0,
            quantity: 3,
        })
        .await
        .unwrap();
        repo.create(CreateItem {
            name: "Cable".to_string(),
            description: "HDMI".to_string(),
            price: 7.0,
            quantity: 5,
        })
        .await
        .unwrap();

        // "5" parses as an integer, so only quantity == 5 matches even
        // though a name contains the digit.
        let found = repo.search("5").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Cable");
    }

    #[tokio::test]
    async fn test_search_text_unions_name_and_description() {
        let repo = InMemoryItemRepository::new();
        let by_name = repo
            .create(CreateItem {
                name: "widget deluxe".to_string(),
                description: "top shelf".to_string(),
                price: 30.0,
                quantity: 2,
            })
            .await
            .unwrap();
        let by_description = repo
            .create(CreateItem {
                name: "spanner".to_string(),
                description: "fits any widget".to_string(),
                price: 15.0,
                quantity: 9,
            })
            .await
            .unwrap();
        let by_both = repo
            .create(CreateItem {
                name: "widget mini".to_string(),
                description: "tiny widget".to_string(),
                price: 5.0,
                quantity: 40,
            })
            .await
            .unwrap();
        repo.create(CreateItem {
            name: "unrelated".to_string(),
            description: "nothing here".to_string(),
            price: 1.0,
            quantity: 0,
        })
        .await
        .unwrap();

        let found = repo.search("widget").await.unwrap();
        let ids: Vec<i32> = found.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![by_name.id, by_description.id, by_both.id]);
    }

    #[tokio::test]
    async fn test_search_no_matches_is_empty() {
        let repo = InMemoryItemRepository::new();
        repo.create(widget(1.0, 1)).await.unwrap();

        let found = repo.search("zzz").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_price_range_bounds_are_inclusive() {
        let repo = InMemoryItemRepository::new();
        repo.create(widget(9.99, 1)).await.unwrap();
        let low = repo.create(widget(10.0, 1)).await.unwrap();
        let mid = repo.create(widget(15.5, 1)).await.unwrap();
        let high = repo.create(widget(20.0, 1)).await.unwrap();
        repo.create(widget(20.01, 1)).await.unwrap();

        let found = repo.filter_by_price_range(10, 20).await.unwrap();
        let ids: Vec<i32> = found.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![low.id, mid.id, high.id]);
    }
}
