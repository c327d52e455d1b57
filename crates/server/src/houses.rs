//! Houses API endpoints.

use api_types::{
    common::Message,
    house::{House, HouseNew, HouseUpdate},
    item::Item,
    meal::Meal,
    person::Person,
    purchase::Purchase,
};
use axum::{Json, extract::State, http::StatusCode};
use engine::HousePatch;

use crate::{
    JsonBody, PathParams, ServerError, items::item_view, meals::meal_view,
    people::person_view, present, purchases::purchase_view, required, server::ServerState,
};

pub(crate) fn house_view(house: engine::House) -> House {
    House {
        id: house.id,
        name: house.name,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<House>>, ServerError> {
    let houses = state.engine.houses().await?;
    Ok(Json(houses.into_iter().map(house_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<House>, ServerError> {
    Ok(Json(house_view(state.engine.house(id).await?)))
}

pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<HouseNew>,
) -> Result<(StatusCode, Json<House>), ServerError> {
    let name = required(present(payload.name), "name is required")?;
    let house = state.engine.new_house(&name).await?;
    Ok((StatusCode::CREATED, Json(house_view(house))))
}

pub async fn update(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    JsonBody(payload): JsonBody<HouseUpdate>,
) -> Result<Json<House>, ServerError> {
    let patch = HousePatch { name: payload.name };
    Ok(Json(house_view(state.engine.update_house(id, &patch).await?)))
}

/// Delete the house and everything scoped to it.
pub async fn remove(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_house(id).await?;
    Ok(Json(Message::new("House deleted successfully")))
}

pub async fn members(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<Vec<Person>>, ServerError> {
    let people = state.engine.people_in_house(id).await?;
    Ok(Json(people.into_iter().map(person_view).collect()))
}

pub async fn items(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<Vec<Item>>, ServerError> {
    state.engine.house(id).await?;
    let items = state.engine.items(Some(id)).await?;
    Ok(Json(items.into_iter().map(item_view).collect()))
}

pub async fn purchases(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<Vec<Purchase>>, ServerError> {
    state.engine.house(id).await?;
    let purchases = state.engine.purchases(Some(id)).await?;
    Ok(Json(purchases.into_iter().map(purchase_view).collect()))
}

pub async fn meals(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<Vec<Meal>>, ServerError> {
    state.engine.house(id).await?;
    let meals = state.engine.meals(Some(id)).await?;
    Ok(Json(meals.into_iter().map(meal_view).collect()))
}
