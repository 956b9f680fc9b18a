use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Inventory item as served by the API and stored in the `items` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Identifier assigned by the store on insert
    #[schema(example = 1)]
    pub id: i32,
    /// Item name
    #[schema(example = "Widget")]
    pub name: String,
    /// Free-form description
    #[schema(example = "A standard widget")]
    pub description: String,
    /// Unit price
    #[schema(example = 9.99)]
    pub price: f64,
    /// Units on hand
    #[schema(example = 5)]
    pub quantity: i32,
}

/// Payload for creating an item. Updates take the same shape: every
/// field is written, there are no partial updates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = "A standard widget")]
    pub description: String,
    #[schema(example = 9.99)]
    pub price: f64,
    #[schema(example = 5)]
    pub quantity: i32,
}

/// Pagination parameters for listing items
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct ItemFilter {
    /// Rows to skip before the first returned item
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of items to return
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    10
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

/// Search term for the search endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// An integer matches on quantity, anything else on name or description
    pub query: String,
}

/// Inclusive price bounds for the filter endpoint
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PriceRange {
    /// Lower bound, inclusive
    pub min_range: i64,
    /// Upper bound, inclusive
    pub max_range: i64,
}

/// Body returned after a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    #[schema(example = "Item deleted successfully")]
    pub message: String,
}

impl DeleteConfirmation {
    pub fn item_deleted() -> Self {
        Self {
            message: "Item deleted successfully".to_string(),
        }
    }
}
