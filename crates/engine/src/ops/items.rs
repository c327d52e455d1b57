use sea_orm::{ActiveValue, Condition, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Item, ItemPatch, NewItem, ResultEngine, items, patch, store};

use super::{
    Engine, ensure_non_negative_count, ensure_unit_cost, normalize_required_text, with_tx,
};

impl Engine {
    /// Items of a house, or of every house when `house_id` is `None`.
    pub async fn items(&self, house_id: Option<i32>) -> ResultEngine<Vec<Item>> {
        let mut query = items::Entity::find();
        if let Some(house_id) = house_id {
            query = query.filter(items::Column::HouseId.eq(house_id));
        }
        Ok(query
            .order_by_asc(items::Column::ItemId)
            .all(&self.database)
            .await?)
    }

    pub async fn item(&self, item_id: i32, house_id: i32) -> ResultEngine<Item> {
        self.require_item_in_house(&self.database, house_id, item_id)
            .await
    }

    pub async fn new_item(&self, cmd: NewItem) -> ResultEngine<Item> {
        let item_name = normalize_required_text(&cmd.item_name, "item_name")?;
        ensure_non_negative_count(cmd.count)?;
        ensure_unit_cost(cmd.cost_per_ct)?;

        self.require_house(&self.database, cmd.house_id).await?;
        let active = items::ActiveModel {
            item_name: ActiveValue::Set(item_name),
            count: ActiveValue::Set(cmd.count),
            cost_per_ct: ActiveValue::Set(cmd.cost_per_ct),
            house_id: ActiveValue::Set(cmd.house_id),
            ..Default::default()
        };
        Ok(active.insert(&self.database).await?)
    }

    pub async fn update_item(
        &self,
        item_id: i32,
        house_id: i32,
        patch: &ItemPatch,
    ) -> ResultEngine<Item> {
        if let Some(count) = patch.count {
            ensure_non_negative_count(count)?;
        }
        if let Some(cost) = patch.cost_per_ct {
            ensure_unit_cost(cost)?;
        }

        let statement = patch::update_statement(
            patch,
            Condition::all()
                .add(items::Column::ItemId.eq(item_id))
                .add(items::Column::HouseId.eq(house_id)),
        )?;
        let outcome = store::execute(
            &self.database,
            store::build(&self.database, &statement),
        )
        .await?;
        if outcome.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("Item".to_string()));
        }
        self.item(item_id, house_id).await
    }

    /// Add a signed `change` to the stock of an item.
    ///
    /// Fails with [`EngineError::NegativeCount`] when the result would be
    /// below zero, leaving the item untouched. Read and write happen in the
    /// same transaction.
    pub async fn adjust_item_count(
        &self,
        item_id: i32,
        house_id: i32,
        change: i64,
    ) -> ResultEngine<Item> {
        with_tx!(self, |db_tx| {
            let item = self
                .require_item_in_house(&db_tx, house_id, item_id)
                .await?;
            let new_count = item.count.checked_add(change).ok_or_else(|| {
                EngineError::InvalidField(format!("change {change} overflows the item count"))
            })?;
            ensure_non_negative_count(new_count)?;

            let active = items::ActiveModel {
                item_id: ActiveValue::Unchanged(item.item_id),
                count: ActiveValue::Set(new_count),
                ..Default::default()
            };
            Ok(active.update(&db_tx).await?)
        })
    }

    pub async fn delete_item(&self, item_id: i32, house_id: i32) -> ResultEngine<()> {
        let result = items::Entity::delete_many()
            .filter(items::Column::ItemId.eq(item_id))
            .filter(items::Column::HouseId.eq(house_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("Item".to_string()));
        }
        Ok(())
    }
}
