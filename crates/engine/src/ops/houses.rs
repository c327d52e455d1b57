use sea_orm::{ActiveValue, Condition, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, House, HousePatch, ResultEngine, houses, items, meal_attendees,
    meal_ingredients, meals, patch, people, purchase_lines, purchases, store,
};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Every house in the store.
    pub async fn houses(&self) -> ResultEngine<Vec<House>> {
        Ok(houses::Entity::find()
            .order_by_asc(houses::Column::Id)
            .all(&self.database)
            .await?)
    }

    pub async fn house(&self, house_id: i32) -> ResultEngine<House> {
        self.require_house(&self.database, house_id).await
    }

    pub async fn new_house(&self, name: &str) -> ResultEngine<House> {
        let name = normalize_required_text(name, "name")?;
        let active = houses::ActiveModel {
            name: ActiveValue::Set(name),
            ..Default::default()
        };
        Ok(active.insert(&self.database).await?)
    }

    pub async fn update_house(&self, house_id: i32, patch: &HousePatch) -> ResultEngine<House> {
        let statement = patch::update_statement(
            patch,
            Condition::all().add(houses::Column::Id.eq(house_id)),
        )?;
        let outcome = store::execute(
            &self.database,
            store::build(&self.database, &statement),
        )
        .await?;
        if outcome.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("House".to_string()));
        }
        self.house(house_id).await
    }

    /// Delete a house together with every row scoped to it.
    ///
    /// Children go first (lines, purchases, attendance, ingredients, meals,
    /// items, people), all inside one transaction.
    pub async fn delete_house(&self, house_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_house(&db_tx, house_id).await?;

            purchase_lines::Entity::delete_many()
                .filter(purchase_lines::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;
            purchases::Entity::delete_many()
                .filter(purchases::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;
            meal_attendees::Entity::delete_many()
                .filter(meal_attendees::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;
            meal_ingredients::Entity::delete_many()
                .filter(meal_ingredients::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;
            meals::Entity::delete_many()
                .filter(meals::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;
            items::Entity::delete_many()
                .filter(items::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;
            people::Entity::delete_many()
                .filter(people::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;

            let result = houses::Entity::delete_by_id(house_id).exec(&db_tx).await?;
            if result.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("House".to_string()));
            }
            tracing::info!(house_id, "house deleted with all scoped rows");
            Ok(())
        })
    }
}
