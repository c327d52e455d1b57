//! Household expense and shared-meal engine.
//!
//! The engine owns the SQLite connection and exposes one repository per entity
//! family (houses, people, items, purchases, meals) as methods on [`Engine`].
//! Every house-scoped read or write filters on `house_id`; a row of house A is
//! never visible through house B even when the numeric id matches.

pub use commands::{
    HousePatch, ItemPatch, MealPatch, NewItem, NewMeal, NewMealIngredient, NewPerson,
    NewPurchase, NewPurchaseLine, PersonPatch, PurchasePatch,
};
pub use costs::{MealCost, Priced, line_total, meal_cost, purchase_total};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use store::Execution;
pub use views::{
    Attendee, MealDetail, MealIngredientView, PurchaseDetail, PurchaseHeader, PurchaseLineView,
};

pub type House = houses::Model;
pub type Person = people::Model;
pub type Item = items::Model;
pub type Purchase = purchases::Model;
pub type PurchaseLine = purchase_lines::Model;
pub type Meal = meals::Model;

mod commands;
mod costs;
mod error;
mod houses;
mod items;
mod meal_attendees;
mod meal_ingredients;
mod meals;
mod ops;
mod patch;
mod people;
mod purchase_lines;
mod purchases;
mod store;
mod views;

type ResultEngine<T> = Result<T, EngineError>;
