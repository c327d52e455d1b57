//! People API endpoints.

use api_types::{
    common::{HouseScope, Message},
    meal::Meal,
    person::{Person, PersonNew, PersonUpdate},
    purchase::Purchase,
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{NewPerson, PersonPatch};

use crate::{
    JsonBody, PathParams, QueryParams, ServerError, meals::meal_view, present,
    purchases::purchase_view, query_house, required, server::ServerState,
};

pub(crate) fn person_view(person: engine::Person) -> Person {
    Person {
        id: person.id,
        name: person.name,
        email: person.email,
        house_id: person.house_id,
    }
}

/// Every person, across houses.
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Person>>, ServerError> {
    let people = state.engine.people().await?;
    Ok(Json(people.into_iter().map(person_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Person>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    Ok(Json(person_view(state.engine.person(id, house_id).await?)))
}

pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<PersonNew>,
) -> Result<(StatusCode, Json<Person>), ServerError> {
    const MISSING: &str = "name, email, and house_id are required";
    let name = required(present(payload.name), MISSING)?;
    let email = required(present(payload.email), MISSING)?;
    let house_id = required(payload.house_id, MISSING)?;

    let person = state
        .engine
        .new_person(NewPerson {
            name,
            email,
            house_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(person_view(person))))
}

pub async fn update(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    JsonBody(payload): JsonBody<PersonUpdate>,
) -> Result<Json<Person>, ServerError> {
    let house_id = required(payload.house_id, "house_id is required")?;
    let patch = PersonPatch {
        name: payload.name,
        email: payload.email,
    };
    Ok(Json(person_view(
        state.engine.update_person(id, house_id, &patch).await?,
    )))
}

pub async fn remove(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Message>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    state.engine.delete_person(id, house_id).await?;
    Ok(Json(Message::new("Person deleted successfully")))
}

/// Purchases paid by the person.
pub async fn purchases(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Vec<Purchase>>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    let purchases = state.engine.person_purchases(id, house_id).await?;
    Ok(Json(purchases.into_iter().map(purchase_view).collect()))
}

/// Meals the person attended.
pub async fn meals(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Vec<Meal>>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    let meals = state.engine.person_meals(id, house_id).await?;
    Ok(Json(meals.into_iter().map(meal_view).collect()))
}
