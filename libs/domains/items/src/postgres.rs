use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect,
};
use tracing::info;

use crate::entity;
use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, ItemFilter};
use crate::repository::ItemRepository;

/// Postgres-backed repository for items
pub struct PgItemRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let active_model: entity::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        info!(item_id = model.id, "Created item");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ItemResult<Option<Item>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .offset(filter.skip)
            .limit(filter.limit)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: CreateItem) -> ItemResult<Item> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        let mut active_model = model.into_active_model();
        active_model.name = Set(input.name);
        active_model.description = Set(input.description);
        active_model.price = Set(input.price);
        active_model.quantity = Set(input.quantity);

        let updated = self.base.update(active_model).await?;
        info!(item_id = id, "Updated item");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> ItemResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;
        if rows_affected > 0 {
            info!(item_id = id, "Deleted item");
        }
        Ok(rows_affected > 0)
    }

    async fn search(&self, query: &str) -> ItemResult<Vec<Item>> {
        // An integer term searches stock quantity, anything else does a
        // substring match over name and description.
        let condition = match query.parse::<i32>() {
            Ok(quantity) => Condition::all().add(entity::Column::Quantity.eq(quantity)),
            Err(_) => Condition::any()
                .add(entity::Column::Name.contains(query))
                .add(entity::Column::Description.contains(query)),
        };

        let models = entity::Entity::find()
            .filter(condition)
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn filter_by_price_range(&self, min: i64, max: i64) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Price.gte(min as f64))
            .filter(entity::Column::Price.lte(max as f64))
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
