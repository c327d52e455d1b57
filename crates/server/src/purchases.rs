//! Purchases API endpoints.

use api_types::{
    common::{HouseScope, Message},
    purchase::{
        Purchase, PurchaseDetail, PurchaseLine, PurchaseLineNew, PurchaseNew, PurchaseUpdate,
    },
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{NewPurchase, NewPurchaseLine, PurchaseLineView, PurchasePatch, line_total};

use crate::{
    JsonBody, PathParams, QueryParams, ServerError, query_house, required, server::ServerState,
};

pub(crate) fn purchase_view(purchase: engine::Purchase) -> Purchase {
    Purchase {
        p_id: purchase.p_id,
        house_id: purchase.house_id,
        buyer_id: purchase.buyer_id,
        purchase_at: purchase.purchase_at,
    }
}

fn line_view(line: PurchaseLineView) -> PurchaseLine {
    PurchaseLine {
        line_total: line_total(&line),
        pl_id: line.pl_id,
        p_id: line.p_id,
        house_id: line.house_id,
        item_id: line.item_id,
        quantity: line.quantity,
        cost_per_ct: line.cost_per_ct,
        item_name: line.item_name,
    }
}

/// Purchases of one house when `house_id` is given, of every house otherwise.
pub async fn list(
    State(state): State<ServerState>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Vec<Purchase>>, ServerError> {
    let purchases = state.engine.purchases(scope.house_id).await?;
    Ok(Json(purchases.into_iter().map(purchase_view).collect()))
}

/// Purchase with buyer name, lines and total.
pub async fn get(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<PurchaseDetail>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    let detail = state.engine.purchase_detail(id, house_id).await?;
    let header = detail.purchase;
    Ok(Json(PurchaseDetail {
        p_id: header.p_id,
        house_id: header.house_id,
        buyer_id: header.buyer_id,
        purchase_at: header.purchase_at,
        buyer_name: header.buyer_name,
        lines: detail.lines.into_iter().map(line_view).collect(),
        total: detail.total,
    }))
}

pub async fn lines(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Vec<PurchaseLine>>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    let lines = state.engine.purchase_lines(id, house_id).await?;
    Ok(Json(lines.into_iter().map(line_view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<PurchaseNew>,
) -> Result<(StatusCode, Json<Purchase>), ServerError> {
    const MISSING: &str = "house_id and buyer_id are required";
    let house_id = required(payload.house_id, MISSING)?;
    let buyer_id = required(payload.buyer_id, MISSING)?;

    let purchase = state
        .engine
        .new_purchase(NewPurchase {
            house_id,
            buyer_id,
            purchase_at: payload.purchase_at,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(purchase_view(purchase))))
}

/// Add a line. A zero quantity or unit cost counts as missing.
pub async fn add_line(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    JsonBody(payload): JsonBody<PurchaseLineNew>,
) -> Result<(StatusCode, Json<PurchaseLine>), ServerError> {
    const MISSING: &str = "house_id, item_id, quantity, and cost_per_ct are required";
    let house_id = required(payload.house_id, MISSING)?;
    let item_id = required(payload.item_id, MISSING)?;
    let quantity = required(payload.quantity.filter(|q| *q != 0), MISSING)?;
    let cost_per_ct = required(payload.cost_per_ct.filter(|c| *c != 0.0), MISSING)?;

    let line = state
        .engine
        .add_purchase_line(
            id,
            NewPurchaseLine {
                house_id,
                item_id,
                quantity,
                cost_per_ct,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(line_view(line))))
}

pub async fn update(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    JsonBody(payload): JsonBody<PurchaseUpdate>,
) -> Result<Json<Purchase>, ServerError> {
    let house_id = required(payload.house_id, "house_id is required")?;
    let patch = PurchasePatch {
        buyer_id: payload.buyer_id,
        purchase_at: payload.purchase_at,
    };
    Ok(Json(purchase_view(
        state.engine.update_purchase(id, house_id, &patch).await?,
    )))
}

pub async fn remove_line(
    State(state): State<ServerState>,
    PathParams((id, line_id)): PathParams<(i32, i32)>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_purchase_line(line_id, id).await?;
    Ok(Json(Message::new("Purchase line deleted successfully")))
}

/// Delete the purchase and its lines.
pub async fn remove(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Message>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    state.engine.delete_purchase(id, house_id).await?;
    Ok(Json(Message::new("Purchase deleted successfully")))
}
