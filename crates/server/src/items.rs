//! Inventory items API endpoints.

use api_types::{
    common::{HouseScope, Message},
    item::{Item, ItemCountChange, ItemNew, ItemUpdate},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{ItemPatch, NewItem};

use crate::{
    JsonBody, PathParams, QueryParams, ServerError, present, query_house, required,
    server::ServerState,
};

pub(crate) fn item_view(item: engine::Item) -> Item {
    Item {
        item_id: item.item_id,
        item_name: item.item_name,
        count: item.count,
        cost_per_ct: item.cost_per_ct,
        house_id: item.house_id,
    }
}

/// Items of one house when `house_id` is given, of every house otherwise.
pub async fn list(
    State(state): State<ServerState>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Vec<Item>>, ServerError> {
    let items = state.engine.items(scope.house_id).await?;
    Ok(Json(items.into_iter().map(item_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Item>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    Ok(Json(item_view(state.engine.item(id, house_id).await?)))
}

pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<ItemNew>,
) -> Result<(StatusCode, Json<Item>), ServerError> {
    const MISSING: &str = "item_name, count, house_id, and cost_per_ct are required";
    let item_name = required(present(payload.item_name), MISSING)?;
    let count = required(payload.count, MISSING)?;
    let house_id = required(payload.house_id, MISSING)?;
    let cost_per_ct = required(payload.cost_per_ct, MISSING)?;

    let item = state
        .engine
        .new_item(NewItem {
            item_name,
            count,
            cost_per_ct,
            house_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(item_view(item))))
}

pub async fn update(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    JsonBody(payload): JsonBody<ItemUpdate>,
) -> Result<Json<Item>, ServerError> {
    let house_id = required(payload.house_id, "house_id is required")?;
    let patch = ItemPatch {
        item_name: payload.item_name,
        count: payload.count,
        cost_per_ct: payload.cost_per_ct,
    };
    Ok(Json(item_view(
        state.engine.update_item(id, house_id, &patch).await?,
    )))
}

/// Apply a signed stock change.
pub async fn adjust_count(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    JsonBody(payload): JsonBody<ItemCountChange>,
) -> Result<Json<Item>, ServerError> {
    const MISSING: &str = "house_id and change are required";
    let house_id = required(payload.house_id, MISSING)?;
    let change = required(payload.change, MISSING)?;
    Ok(Json(item_view(
        state.engine.adjust_item_count(id, house_id, change).await?,
    )))
}

pub async fn remove(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Message>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    state.engine.delete_item(id, house_id).await?;
    Ok(Json(Message::new("Item deleted successfully")))
}
