//! Cost aggregation for purchases and meals.
//!
//! Totals are derived, never stored. They always use the unit cost captured on
//! the line or ingredient row, not the item's current `cost_per_ct`, so later
//! price changes on an item do not rewrite past purchases or meals.

use crate::{MealIngredientView, PurchaseLineView};

/// A row that contributes `quantity * unit_cost` to a total.
pub trait Priced {
    fn quantity(&self) -> f64;
    fn unit_cost(&self) -> f64;
}

/// Total cost of a meal and its share per attendee.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MealCost {
    pub total_cost: f64,
    /// `0` when nobody attended.
    pub cost_per_person: f64,
}

/// `quantity * unit_cost` for a single row.
pub fn line_total<P: Priced + ?Sized>(row: &P) -> f64 {
    row.quantity() * row.unit_cost()
}

/// Sum of the line totals of a purchase.
pub fn purchase_total<P: Priced>(lines: &[P]) -> f64 {
    lines.iter().map(|line| line_total(line)).sum()
}

/// Total ingredient cost of a meal, split evenly between `attendees`.
pub fn meal_cost<P: Priced>(ingredients: &[P], attendees: usize) -> MealCost {
    let total_cost: f64 = ingredients.iter().map(|ing| line_total(ing)).sum();
    let cost_per_person = if attendees == 0 {
        0.0
    } else {
        total_cost / attendees as f64
    };
    MealCost {
        total_cost,
        cost_per_person,
    }
}

impl Priced for PurchaseLineView {
    fn quantity(&self) -> f64 {
        self.quantity as f64
    }

    fn unit_cost(&self) -> f64 {
        self.cost_per_ct
    }
}

impl Priced for MealIngredientView {
    fn quantity(&self) -> f64 {
        self.quant_used
    }

    fn unit_cost(&self) -> f64 {
        self.cost_per_ct
    }
}
