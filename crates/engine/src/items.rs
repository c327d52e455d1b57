//! Inventory items, one row per SKU and house.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub item_id: i32,
    pub item_name: String,
    /// Units currently in stock, never negative.
    pub count: i64,
    /// Current unit cost. Purchase lines and meal ingredients keep their own
    /// copy, so changing this never rewrites history.
    pub cost_per_ct: f64,
    pub house_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
