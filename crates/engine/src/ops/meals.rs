use sea_orm::{
    ActiveValue, Condition, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
};

use crate::{
    Attendee, EngineError, Meal, MealDetail, MealIngredientView, MealPatch, NewMeal,
    NewMealIngredient, Person, ResultEngine, commands::today, costs, meal_attendees,
    meal_ingredients, meals, patch, store, views,
};

use super::{Engine, ensure_unit_cost, normalize_required_text, with_tx};

const INSERT_ATTENDEE_SQL: &str =
    "INSERT INTO meal_attend (meal_id, house_id, user_id) VALUES (?, ?, ?)";

const INSERT_INGREDIENT_SQL: &str = "INSERT INTO meal_ingredient (meal_id, house_id, item_id, quant_used, cost_per_ct) \
     VALUES (?, ?, ?, ?, ?)";

impl Engine {
    /// Meals of a house, or of every house when `house_id` is `None`.
    pub async fn meals(&self, house_id: Option<i32>) -> ResultEngine<Vec<Meal>> {
        let mut query = meals::Entity::find();
        if let Some(house_id) = house_id {
            query = query.filter(meals::Column::HouseId.eq(house_id));
        }
        Ok(query
            .order_by_asc(meals::Column::MealId)
            .all(&self.database)
            .await?)
    }

    /// A meal with its attendees, ingredients and the cost split.
    pub async fn meal_detail(&self, meal_id: i32, house_id: i32) -> ResultEngine<MealDetail> {
        let meal = self
            .require_meal_in_house(&self.database, house_id, meal_id)
            .await?;
        let attendees = attendees_of(&self.database, meal_id, house_id).await?;
        let ingredients = ingredients_of(&self.database, meal_id, house_id).await?;
        let cost = costs::meal_cost(&ingredients, attendees.len());
        Ok(MealDetail {
            meal,
            attendees,
            ingredients,
            cost,
        })
    }

    pub async fn meal_attendees(&self, meal_id: i32, house_id: i32) -> ResultEngine<Vec<Attendee>> {
        self.require_meal_in_house(&self.database, house_id, meal_id)
            .await?;
        attendees_of(&self.database, meal_id, house_id).await
    }

    pub async fn meal_ingredients(
        &self,
        meal_id: i32,
        house_id: i32,
    ) -> ResultEngine<Vec<MealIngredientView>> {
        self.require_meal_in_house(&self.database, house_id, meal_id)
            .await?;
        ingredients_of(&self.database, meal_id, house_id).await
    }

    pub async fn new_meal(&self, cmd: NewMeal) -> ResultEngine<Meal> {
        let meal_name = normalize_required_text(&cmd.meal_name, "meal_name")?;
        self.require_house(&self.database, cmd.house_id).await?;

        let active = meals::ActiveModel {
            house_id: ActiveValue::Set(cmd.house_id),
            meal_name: ActiveValue::Set(meal_name),
            made_on: ActiveValue::Set(cmd.made_on.unwrap_or_else(today)),
            ..Default::default()
        };
        Ok(active.insert(&self.database).await?)
    }

    /// Register `user_id` as attending the meal and return the person.
    pub async fn add_meal_attendee(
        &self,
        meal_id: i32,
        house_id: i32,
        user_id: i32,
    ) -> ResultEngine<Person> {
        with_tx!(self, |db_tx| {
            self.require_meal_in_house(&db_tx, house_id, meal_id)
                .await?;
            let person = self
                .require_person_in_house(&db_tx, house_id, user_id)
                .await?;

            let already = meal_attendees::Entity::find_by_id((meal_id, user_id))
                .one(&db_tx)
                .await?;
            if already.is_some() {
                return Err(EngineError::ExistingKey(
                    "User already attending this meal".to_string(),
                ));
            }

            store::execute(
                &db_tx,
                store::raw(
                    &db_tx,
                    INSERT_ATTENDEE_SQL,
                    vec![meal_id.into(), house_id.into(), user_id.into()],
                ),
            )
            .await?;
            Ok(person)
        })
    }

    /// Record an item consumed by the meal. Each item appears at most once
    /// per meal.
    pub async fn add_meal_ingredient(
        &self,
        meal_id: i32,
        cmd: NewMealIngredient,
    ) -> ResultEngine<MealIngredientView> {
        if !cmd.quant_used.is_finite() || cmd.quant_used <= 0.0 {
            return Err(EngineError::InvalidField(
                "quant_used must be greater than zero".to_string(),
            ));
        }
        ensure_unit_cost(cmd.cost_per_ct)?;

        with_tx!(self, |db_tx| {
            self.require_meal_in_house(&db_tx, cmd.house_id, meal_id)
                .await?;
            self.require_item_in_house(&db_tx, cmd.house_id, cmd.item_id)
                .await?;

            let already = meal_ingredients::Entity::find_by_id((meal_id, cmd.item_id))
                .one(&db_tx)
                .await?;
            if already.is_some() {
                return Err(EngineError::ExistingKey(
                    "Item already used in this meal".to_string(),
                ));
            }

            store::execute(
                &db_tx,
                store::raw(
                    &db_tx,
                    INSERT_INGREDIENT_SQL,
                    vec![
                        meal_id.into(),
                        cmd.house_id.into(),
                        cmd.item_id.into(),
                        cmd.quant_used.into(),
                        cmd.cost_per_ct.into(),
                    ],
                ),
            )
            .await?;

            store::fetch_one(
                &db_tx,
                store::raw(
                    &db_tx,
                    views::MEAL_INGREDIENT_SQL,
                    vec![meal_id.into(), cmd.house_id.into(), cmd.item_id.into()],
                ),
            )
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("Ingredient".to_string()))
        })
    }

    pub async fn update_meal(
        &self,
        meal_id: i32,
        house_id: i32,
        patch: &MealPatch,
    ) -> ResultEngine<Meal> {
        let statement = patch::update_statement(
            patch,
            Condition::all()
                .add(meals::Column::MealId.eq(meal_id))
                .add(meals::Column::HouseId.eq(house_id)),
        )?;
        let outcome = store::execute(
            &self.database,
            store::build(&self.database, &statement),
        )
        .await?;
        if outcome.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("Meal".to_string()));
        }
        self.require_meal_in_house(&self.database, house_id, meal_id)
            .await
    }

    pub async fn remove_meal_attendee(
        &self,
        meal_id: i32,
        house_id: i32,
        user_id: i32,
    ) -> ResultEngine<()> {
        let result = meal_attendees::Entity::delete_many()
            .filter(meal_attendees::Column::MealId.eq(meal_id))
            .filter(meal_attendees::Column::UserId.eq(user_id))
            .filter(meal_attendees::Column::HouseId.eq(house_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("Attendee".to_string()));
        }
        Ok(())
    }

    pub async fn remove_meal_ingredient(
        &self,
        meal_id: i32,
        house_id: i32,
        item_id: i32,
    ) -> ResultEngine<()> {
        let result = meal_ingredients::Entity::delete_many()
            .filter(meal_ingredients::Column::MealId.eq(meal_id))
            .filter(meal_ingredients::Column::ItemId.eq(item_id))
            .filter(meal_ingredients::Column::HouseId.eq(house_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("Ingredient".to_string()));
        }
        Ok(())
    }

    /// Delete a meal with its attendance and ingredient rows, in one
    /// transaction.
    pub async fn delete_meal(&self, meal_id: i32, house_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_meal_in_house(&db_tx, house_id, meal_id)
                .await?;

            meal_attendees::Entity::delete_many()
                .filter(meal_attendees::Column::MealId.eq(meal_id))
                .filter(meal_attendees::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;
            meal_ingredients::Entity::delete_many()
                .filter(meal_ingredients::Column::MealId.eq(meal_id))
                .filter(meal_ingredients::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;

            let result = meals::Entity::delete_many()
                .filter(meals::Column::MealId.eq(meal_id))
                .filter(meals::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("Meal".to_string()));
            }
            Ok(())
        })
    }
}

async fn attendees_of<C: ConnectionTrait>(
    db: &C,
    meal_id: i32,
    house_id: i32,
) -> ResultEngine<Vec<Attendee>> {
    store::fetch_all(
        db,
        store::raw(db, views::MEAL_ATTENDEES_SQL, vec![meal_id.into(), house_id.into()]),
    )
    .await
}

async fn ingredients_of<C: ConnectionTrait>(
    db: &C,
    meal_id: i32,
    house_id: i32,
) -> ResultEngine<Vec<MealIngredientView>> {
    store::fetch_all(
        db,
        store::raw(
            db,
            views::MEAL_INGREDIENTS_SQL,
            vec![meal_id.into(), house_id.into()],
        ),
    )
    .await
}
