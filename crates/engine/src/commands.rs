//! Command structs for engine write operations.
//!
//! `New*` types carry the fields of a create. `*Patch` types carry the fields
//! of a sparse update: each field is independently present or absent, and
//! only the present ones end up in the `SET` clause (see [`crate::patch`]).

use chrono::{NaiveDate, Utc};

/// Create a person inside a house.
#[derive(Clone, Debug)]
pub struct NewPerson {
    pub name: String,
    pub email: String,
    pub house_id: i32,
}

/// Create an inventory item.
#[derive(Clone, Debug)]
pub struct NewItem {
    pub item_name: String,
    pub count: i64,
    pub cost_per_ct: f64,
    pub house_id: i32,
}

/// Create a purchase. `purchase_at` defaults to today (UTC).
#[derive(Clone, Debug)]
pub struct NewPurchase {
    pub house_id: i32,
    pub buyer_id: i32,
    pub purchase_at: Option<NaiveDate>,
}

/// Add a line to an existing purchase.
#[derive(Clone, Debug)]
pub struct NewPurchaseLine {
    pub house_id: i32,
    pub item_id: i32,
    pub quantity: i64,
    pub cost_per_ct: f64,
}

/// Create a meal. `made_on` defaults to today (UTC).
#[derive(Clone, Debug)]
pub struct NewMeal {
    pub house_id: i32,
    pub meal_name: String,
    pub made_on: Option<NaiveDate>,
}

/// Record an item consumed by a meal.
#[derive(Clone, Debug)]
pub struct NewMealIngredient {
    pub house_id: i32,
    pub item_id: i32,
    pub quant_used: f64,
    pub cost_per_ct: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HousePatch {
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ItemPatch {
    pub item_name: Option<String>,
    pub count: Option<i64>,
    pub cost_per_ct: Option<f64>,
}

#[derive(Clone, Debug, Default)]
pub struct PurchasePatch {
    pub buyer_id: Option<i32>,
    pub purchase_at: Option<NaiveDate>,
}

#[derive(Clone, Debug, Default)]
pub struct MealPatch {
    pub meal_name: Option<String>,
    pub made_on: Option<NaiveDate>,
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
