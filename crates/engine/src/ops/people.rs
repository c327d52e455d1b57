use sea_orm::{
    ActiveValue, Condition, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
};

use crate::{
    EngineError, Meal, NewPerson, Person, PersonPatch, Purchase, ResultEngine, patch, people,
    purchases, store, views,
};

use super::{Engine, normalize_required_text, with_tx};

const DUPLICATE_EMAIL: &str = "Email already exists";

impl Engine {
    /// Every person in the store, across all houses.
    pub async fn people(&self) -> ResultEngine<Vec<Person>> {
        Ok(people::Entity::find()
            .order_by_asc(people::Column::Id)
            .all(&self.database)
            .await?)
    }

    /// Members of one house.
    pub async fn people_in_house(&self, house_id: i32) -> ResultEngine<Vec<Person>> {
        self.require_house(&self.database, house_id).await?;
        Ok(people::Entity::find()
            .filter(people::Column::HouseId.eq(house_id))
            .order_by_asc(people::Column::Id)
            .all(&self.database)
            .await?)
    }

    pub async fn person(&self, person_id: i32, house_id: i32) -> ResultEngine<Person> {
        self.require_person_in_house(&self.database, house_id, person_id)
            .await
    }

    /// Create a person.
    ///
    /// The email must not be used by anybody else in the store, whatever house
    /// they belong to.
    pub async fn new_person(&self, cmd: NewPerson) -> ResultEngine<Person> {
        let name = normalize_required_text(&cmd.name, "name")?;
        let email = normalize_required_text(&cmd.email, "email")?;
        with_tx!(self, |db_tx| {
            self.require_house(&db_tx, cmd.house_id).await?;
            if email_taken(&db_tx, &email, None).await? {
                return Err(EngineError::ExistingKey(DUPLICATE_EMAIL.to_string()));
            }

            let active = people::ActiveModel {
                name: ActiveValue::Set(name),
                email: ActiveValue::Set(email),
                house_id: ActiveValue::Set(cmd.house_id),
                ..Default::default()
            };
            Ok(active.insert(&db_tx).await?)
        })
    }

    pub async fn update_person(
        &self,
        person_id: i32,
        house_id: i32,
        patch: &PersonPatch,
    ) -> ResultEngine<Person> {
        with_tx!(self, |db_tx| {
            if let Some(email) = patch.email.as_deref().map(str::trim)
                && !email.is_empty()
                && email_taken(&db_tx, email, Some((person_id, house_id))).await?
            {
                return Err(EngineError::ExistingKey(DUPLICATE_EMAIL.to_string()));
            }

            let statement = patch::update_statement(
                patch,
                Condition::all()
                    .add(people::Column::Id.eq(person_id))
                    .add(people::Column::HouseId.eq(house_id)),
            )?;
            let outcome = store::execute(&db_tx, store::build(&db_tx, &statement)).await?;
            if outcome.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("Person".to_string()));
            }
            self.require_person_in_house(&db_tx, house_id, person_id)
                .await
        })
    }

    pub async fn delete_person(&self, person_id: i32, house_id: i32) -> ResultEngine<()> {
        let result = people::Entity::delete_many()
            .filter(people::Column::Id.eq(person_id))
            .filter(people::Column::HouseId.eq(house_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("Person".to_string()));
        }
        Ok(())
    }

    /// Purchases paid by a person.
    pub async fn person_purchases(
        &self,
        person_id: i32,
        house_id: i32,
    ) -> ResultEngine<Vec<Purchase>> {
        self.require_person_in_house(&self.database, house_id, person_id)
            .await?;
        Ok(purchases::Entity::find()
            .filter(purchases::Column::BuyerId.eq(person_id))
            .filter(purchases::Column::HouseId.eq(house_id))
            .order_by_asc(purchases::Column::PId)
            .all(&self.database)
            .await?)
    }

    /// Meals a person attended.
    pub async fn person_meals(&self, person_id: i32, house_id: i32) -> ResultEngine<Vec<Meal>> {
        self.require_person_in_house(&self.database, house_id, person_id)
            .await?;
        let statement = store::raw(
            &self.database,
            views::PERSON_MEALS_SQL,
            vec![person_id.into(), house_id.into()],
        );
        store::fetch_all(&self.database, statement).await
    }
}

/// Whether `email` already belongs to someone other than `except`
/// (`(person_id, house_id)`).
async fn email_taken<C: ConnectionTrait>(
    db: &C,
    email: &str,
    except: Option<(i32, i32)>,
) -> ResultEngine<bool> {
    let mut query = people::Entity::find().filter(people::Column::Email.eq(email));
    if let Some((person_id, house_id)) = except {
        query = query.filter(
            Condition::any()
                .add(people::Column::Id.ne(person_id))
                .add(people::Column::HouseId.ne(house_id)),
        );
    }
    Ok(query.one(db).await?.is_some())
}
