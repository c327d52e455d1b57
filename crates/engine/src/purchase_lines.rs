//! Purchase lines: one item/quantity/unit-cost record per purchase.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "purchase_line")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub pl_id: i32,
    pub p_id: i32,
    pub house_id: i32,
    pub item_id: i32,
    pub quantity: i64,
    /// Unit cost captured when the purchase was made.
    pub cost_per_ct: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchases::Entity",
        from = "Column::PId",
        to = "super::purchases::Column::PId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Purchase,
}

impl Related<super::purchases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
