//! Read models built from joins.
//!
//! Child rows are always joined with `LEFT JOIN`, so every line, ingredient
//! and attendee of a parent shows up (and counts toward its totals) even when
//! the item or person it references has since been removed.

use sea_orm::{FromQueryResult, prelude::Date};

use crate::{MealCost, meals};

/// A purchase header with the buyer's name.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct PurchaseHeader {
    pub p_id: i32,
    pub house_id: i32,
    pub buyer_id: i32,
    pub purchase_at: Date,
    pub buyer_name: Option<String>,
}

/// A purchase line with the name of the item it refers to.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct PurchaseLineView {
    pub pl_id: i32,
    pub p_id: i32,
    pub house_id: i32,
    pub item_id: i32,
    pub quantity: i64,
    pub cost_per_ct: f64,
    pub item_name: Option<String>,
}

/// Purchase with its lines and derived total.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseDetail {
    pub purchase: PurchaseHeader,
    pub lines: Vec<PurchaseLineView>,
    pub total: f64,
}

/// A meal attendee joined with the person row.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct Attendee {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub house_id: i32,
}

/// A meal ingredient with the name of the item it consumes.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct MealIngredientView {
    pub meal_id: i32,
    pub house_id: i32,
    pub item_id: i32,
    pub quant_used: f64,
    pub cost_per_ct: f64,
    pub item_name: Option<String>,
}

/// Meal with attendees, ingredients and derived costs.
#[derive(Clone, Debug, PartialEq)]
pub struct MealDetail {
    pub meal: meals::Model,
    pub attendees: Vec<Attendee>,
    pub ingredients: Vec<MealIngredientView>,
    pub cost: MealCost,
}

pub(crate) const PURCHASE_HEADER_SQL: &str = "SELECT p.p_id, p.house_id, p.buyer_id, p.purchase_at, pe.name AS buyer_name \
     FROM purchase p \
     LEFT JOIN people pe ON p.buyer_id = pe.id AND p.house_id = pe.house_id \
     WHERE p.p_id = ? AND p.house_id = ?";

pub(crate) const PURCHASE_LINES_SQL: &str = "SELECT pl.pl_id, pl.p_id, pl.house_id, pl.item_id, pl.quantity, pl.cost_per_ct, i.item_name \
     FROM purchase_line pl \
     LEFT JOIN item i ON pl.item_id = i.item_id AND pl.house_id = i.house_id \
     WHERE pl.p_id = ? AND pl.house_id = ? \
     ORDER BY pl.pl_id";

pub(crate) const PURCHASE_LINE_SQL: &str = "SELECT pl.pl_id, pl.p_id, pl.house_id, pl.item_id, pl.quantity, pl.cost_per_ct, i.item_name \
     FROM purchase_line pl \
     LEFT JOIN item i ON pl.item_id = i.item_id AND pl.house_id = i.house_id \
     WHERE pl.pl_id = ? AND pl.p_id = ?";

pub(crate) const MEAL_ATTENDEES_SQL: &str = "SELECT ma.user_id AS id, p.name, p.email, ma.house_id \
     FROM meal_attend ma \
     LEFT JOIN people p ON ma.user_id = p.id AND ma.house_id = p.house_id \
     WHERE ma.meal_id = ? AND ma.house_id = ? \
     ORDER BY ma.user_id";

pub(crate) const MEAL_INGREDIENTS_SQL: &str = "SELECT mi.meal_id, mi.house_id, mi.item_id, mi.quant_used, mi.cost_per_ct, i.item_name \
     FROM meal_ingredient mi \
     LEFT JOIN item i ON mi.item_id = i.item_id AND mi.house_id = i.house_id \
     WHERE mi.meal_id = ? AND mi.house_id = ? \
     ORDER BY mi.item_id";

pub(crate) const MEAL_INGREDIENT_SQL: &str = "SELECT mi.meal_id, mi.house_id, mi.item_id, mi.quant_used, mi.cost_per_ct, i.item_name \
     FROM meal_ingredient mi \
     LEFT JOIN item i ON mi.item_id = i.item_id AND mi.house_id = i.house_id \
     WHERE mi.meal_id = ? AND mi.house_id = ? AND mi.item_id = ?";

pub(crate) const PERSON_MEALS_SQL: &str = "SELECT m.meal_id, m.house_id, m.meal_name, m.made_on \
     FROM meal m \
     JOIN meal_attend ma ON m.meal_id = ma.meal_id AND m.house_id = ma.house_id \
     WHERE ma.user_id = ? AND ma.house_id = ? \
     ORDER BY m.meal_id";
