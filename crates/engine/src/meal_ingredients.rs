//! Meal ingredients: items consumed by a meal, at most one row per item.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "meal_ingredient")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub meal_id: i32,
    pub house_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: i32,
    pub quant_used: f64,
    /// Unit cost captured when the meal was made.
    pub cost_per_ct: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::meals::Entity",
        from = "Column::MealId",
        to = "super::meals::Column::MealId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Meal,
}

impl Related<super::meals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
