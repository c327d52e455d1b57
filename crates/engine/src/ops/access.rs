use sea_orm::{ConnectionTrait, QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine, houses, items, meals, people, purchases};

use super::Engine;

/// Generates a `require_*_in_house` lookup for an entity keyed by an integer
/// id and scoped by a `house_id` column.
macro_rules! impl_require_in_house {
    ($require_fn:ident, $entity:ident, $house_col:expr, $label:literal) => {
        pub(super) async fn $require_fn<C: ConnectionTrait>(
            &self,
            db: &C,
            house_id: i32,
            target_id: i32,
        ) -> ResultEngine<$entity::Model> {
            $entity::Entity::find_by_id(target_id)
                .filter($house_col.eq(house_id))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($label.to_string()))
        }
    };
}

impl Engine {
    impl_require_in_house!(
        require_person_in_house,
        people,
        people::Column::HouseId,
        "Person"
    );

    impl_require_in_house!(
        require_item_in_house,
        items,
        items::Column::HouseId,
        "Item"
    );

    impl_require_in_house!(
        require_purchase_in_house,
        purchases,
        purchases::Column::HouseId,
        "Purchase"
    );

    impl_require_in_house!(
        require_meal_in_house,
        meals,
        meals::Column::HouseId,
        "Meal"
    );

    pub(super) async fn require_house<C: ConnectionTrait>(
        &self,
        db: &C,
        house_id: i32,
    ) -> ResultEngine<houses::Model> {
        houses::Entity::find_by_id(house_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("House".to_string()))
    }
}
