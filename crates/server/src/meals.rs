//! Meals API endpoints.

use api_types::{
    common::{HouseScope, Message},
    meal::{
        Attendee, Meal, MealAttendeeNew, MealDetail, MealIngredient, MealIngredientNew, MealNew,
        MealUpdate,
    },
    person::Person,
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{MealIngredientView, MealPatch, NewMeal, NewMealIngredient, line_total};

use crate::{
    JsonBody, PathParams, QueryParams, ServerError, people::person_view, present, query_house,
    required, server::ServerState,
};

pub(crate) fn meal_view(meal: engine::Meal) -> Meal {
    Meal {
        meal_id: meal.meal_id,
        house_id: meal.house_id,
        meal_name: meal.meal_name,
        made_on: meal.made_on,
    }
}

fn attendee_view(attendee: engine::Attendee) -> Attendee {
    Attendee {
        id: attendee.id,
        name: attendee.name,
        email: attendee.email,
        house_id: attendee.house_id,
    }
}

fn ingredient_view(ingredient: MealIngredientView) -> MealIngredient {
    MealIngredient {
        line_total: line_total(&ingredient),
        meal_id: ingredient.meal_id,
        house_id: ingredient.house_id,
        item_id: ingredient.item_id,
        quant_used: ingredient.quant_used,
        cost_per_ct: ingredient.cost_per_ct,
        item_name: ingredient.item_name,
    }
}

/// Meals of one house when `house_id` is given, of every house otherwise.
pub async fn list(
    State(state): State<ServerState>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Vec<Meal>>, ServerError> {
    let meals = state.engine.meals(scope.house_id).await?;
    Ok(Json(meals.into_iter().map(meal_view).collect()))
}

/// Meal with attendees, ingredients and the per-person split.
pub async fn get(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<MealDetail>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    let detail = state.engine.meal_detail(id, house_id).await?;
    Ok(Json(MealDetail {
        meal_id: detail.meal.meal_id,
        house_id: detail.meal.house_id,
        meal_name: detail.meal.meal_name,
        made_on: detail.meal.made_on,
        attendees: detail.attendees.into_iter().map(attendee_view).collect(),
        ingredients: detail.ingredients.into_iter().map(ingredient_view).collect(),
        total_cost: detail.cost.total_cost,
        cost_per_person: detail.cost.cost_per_person,
    }))
}

pub async fn attendees(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Vec<Attendee>>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    let attendees = state.engine.meal_attendees(id, house_id).await?;
    Ok(Json(attendees.into_iter().map(attendee_view).collect()))
}

pub async fn ingredients(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Vec<MealIngredient>>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    let ingredients = state.engine.meal_ingredients(id, house_id).await?;
    Ok(Json(ingredients.into_iter().map(ingredient_view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<MealNew>,
) -> Result<(StatusCode, Json<Meal>), ServerError> {
    const MISSING: &str = "house_id and meal_name are required";
    let house_id = required(payload.house_id, MISSING)?;
    let meal_name = required(present(payload.meal_name), MISSING)?;

    let meal = state
        .engine
        .new_meal(NewMeal {
            house_id,
            meal_name,
            made_on: payload.made_on,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(meal_view(meal))))
}

/// Register an attendee and return their person row.
pub async fn add_attendee(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    JsonBody(payload): JsonBody<MealAttendeeNew>,
) -> Result<(StatusCode, Json<Person>), ServerError> {
    const MISSING: &str = "house_id and user_id are required";
    let house_id = required(payload.house_id, MISSING)?;
    let user_id = required(payload.user_id, MISSING)?;

    let person = state
        .engine
        .add_meal_attendee(id, house_id, user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(person_view(person))))
}

/// Add an ingredient. A zero quantity or unit cost counts as missing.
pub async fn add_ingredient(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    JsonBody(payload): JsonBody<MealIngredientNew>,
) -> Result<(StatusCode, Json<MealIngredient>), ServerError> {
    const MISSING: &str = "house_id, item_id, quant_used, and cost_per_ct are required";
    let house_id = required(payload.house_id, MISSING)?;
    let item_id = required(payload.item_id, MISSING)?;
    let quant_used = required(payload.quant_used.filter(|q| *q != 0.0), MISSING)?;
    let cost_per_ct = required(payload.cost_per_ct.filter(|c| *c != 0.0), MISSING)?;

    let ingredient = state
        .engine
        .add_meal_ingredient(
            id,
            NewMealIngredient {
                house_id,
                item_id,
                quant_used,
                cost_per_ct,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ingredient_view(ingredient))))
}

pub async fn update(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    JsonBody(payload): JsonBody<MealUpdate>,
) -> Result<Json<Meal>, ServerError> {
    let house_id = required(payload.house_id, "house_id is required")?;
    let patch = MealPatch {
        meal_name: payload.meal_name,
        made_on: payload.made_on,
    };
    Ok(Json(meal_view(
        state.engine.update_meal(id, house_id, &patch).await?,
    )))
}

pub async fn remove_attendee(
    State(state): State<ServerState>,
    PathParams((id, user_id)): PathParams<(i32, i32)>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Message>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    state
        .engine
        .remove_meal_attendee(id, house_id, user_id)
        .await?;
    Ok(Json(Message::new("Attendee removed successfully")))
}

pub async fn remove_ingredient(
    State(state): State<ServerState>,
    PathParams((id, item_id)): PathParams<(i32, i32)>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Message>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    state
        .engine
        .remove_meal_ingredient(id, house_id, item_id)
        .await?;
    Ok(Json(Message::new("Ingredient removed successfully")))
}

/// Delete the meal with its attendance and ingredients.
pub async fn remove(
    State(state): State<ServerState>,
    PathParams(id): PathParams<i32>,
    QueryParams(scope): QueryParams<HouseScope>,
) -> Result<Json<Message>, ServerError> {
    let house_id = query_house(scope.house_id)?;
    state.engine.delete_meal(id, house_id).await?;
    Ok(Json(Message::new("Meal deleted successfully")))
}
