//! Sparse updates.
//!
//! A patch turns into a list of `(column, value)` assignments. Text fields
//! that are empty after trimming count as absent. An all-absent patch is
//! rejected with [`EngineError::NoFieldsToUpdate`] instead of running an
//! `UPDATE` with an empty `SET` clause.

use sea_orm::{
    Condition, EntityName, EntityTrait, Value,
    sea_query::{Expr, Query, UpdateStatement},
};

use crate::{
    EngineError, HousePatch, ItemPatch, MealPatch, PersonPatch, PurchasePatch, ResultEngine,
    houses, items, meals, people, purchases,
};

pub(crate) trait Patch {
    type Entity: EntityTrait;

    fn assignments(&self) -> Vec<(<Self::Entity as EntityTrait>::Column, Value)>;
}

/// Build `UPDATE <table> SET ... WHERE <scope>` from the present fields.
pub(crate) fn update_statement<P: Patch>(patch: &P, scope: Condition) -> ResultEngine<UpdateStatement> {
    let assignments = patch.assignments();
    if assignments.is_empty() {
        return Err(EngineError::NoFieldsToUpdate);
    }

    let mut statement = Query::update();
    statement
        .table(P::Entity::default().table_ref())
        .values(
            assignments
                .into_iter()
                .map(|(column, value)| (column, Expr::value(value))),
        )
        .cond_where(scope);
    Ok(statement)
}

fn present_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

impl Patch for HousePatch {
    type Entity = houses::Entity;

    fn assignments(&self) -> Vec<(houses::Column, Value)> {
        let mut out = Vec::new();
        if let Some(name) = present_text(&self.name) {
            out.push((houses::Column::Name, name.into()));
        }
        out
    }
}

impl Patch for PersonPatch {
    type Entity = people::Entity;

    fn assignments(&self) -> Vec<(people::Column, Value)> {
        let mut out = Vec::new();
        if let Some(name) = present_text(&self.name) {
            out.push((people::Column::Name, name.into()));
        }
        if let Some(email) = present_text(&self.email) {
            out.push((people::Column::Email, email.into()));
        }
        out
    }
}

impl Patch for ItemPatch {
    type Entity = items::Entity;

    fn assignments(&self) -> Vec<(items::Column, Value)> {
        let mut out = Vec::new();
        if let Some(name) = present_text(&self.item_name) {
            out.push((items::Column::ItemName, name.into()));
        }
        if let Some(count) = self.count {
            out.push((items::Column::Count, count.into()));
        }
        if let Some(cost) = self.cost_per_ct {
            out.push((items::Column::CostPerCt, cost.into()));
        }
        out
    }
}

impl Patch for PurchasePatch {
    type Entity = purchases::Entity;

    fn assignments(&self) -> Vec<(purchases::Column, Value)> {
        let mut out = Vec::new();
        if let Some(buyer_id) = self.buyer_id {
            out.push((purchases::Column::BuyerId, buyer_id.into()));
        }
        if let Some(date) = self.purchase_at {
            out.push((purchases::Column::PurchaseAt, date.into()));
        }
        out
    }
}

impl Patch for MealPatch {
    type Entity = meals::Entity;

    fn assignments(&self) -> Vec<(meals::Column, Value)> {
        let mut out = Vec::new();
        if let Some(name) = present_text(&self.meal_name) {
            out.push((meals::Column::MealName, name.into()));
        }
        if let Some(date) = self.made_on {
            out.push((meals::Column::MadeOn, date.into()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ColumnTrait, DbBackend};

    use super::*;

    #[test]
    fn empty_patch_is_rejected() {
        let err = update_statement(&PersonPatch::default(), Condition::all()).unwrap_err();
        assert_eq!(err, EngineError::NoFieldsToUpdate);
    }

    #[test]
    fn blank_text_counts_as_absent() {
        let patch = MealPatch {
            meal_name: Some("   ".to_string()),
            made_on: None,
        };
        assert!(patch.assignments().is_empty());
    }

    #[test]
    fn only_present_fields_are_set() {
        let patch = ItemPatch {
            item_name: None,
            count: Some(0),
            cost_per_ct: Some(1.5),
        };
        let scope = Condition::all()
            .add(items::Column::ItemId.eq(7))
            .add(items::Column::HouseId.eq(1));
        let statement = update_statement(&patch, scope).unwrap();
        let sql = DbBackend::Sqlite.build(&statement).to_string();

        assert!(sql.starts_with("UPDATE \"item\" SET"));
        assert!(sql.contains("\"count\" = 0, \"cost_per_ct\" = 1.5"));
        assert!(!sql.contains("item_name"));
        assert!(sql.contains("\"item_id\" = 7"));
        assert!(sql.contains("\"house_id\" = 1"));
    }
}
