use sea_orm::{
    ActiveValue, Condition, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
};

use crate::{
    EngineError, NewPurchase, NewPurchaseLine, Purchase, PurchaseDetail, PurchaseHeader,
    PurchaseLineView, PurchasePatch, ResultEngine, commands::today, costs, patch,
    purchase_lines, purchases, store, views,
};

use super::{Engine, ensure_unit_cost, with_tx};

const INSERT_LINE_SQL: &str = "INSERT INTO purchase_line (house_id, p_id, item_id, quantity, cost_per_ct) \
     VALUES (?, ?, ?, ?, ?)";

impl Engine {
    /// Purchases of a house, or of every house when `house_id` is `None`.
    pub async fn purchases(&self, house_id: Option<i32>) -> ResultEngine<Vec<Purchase>> {
        let mut query = purchases::Entity::find();
        if let Some(house_id) = house_id {
            query = query.filter(purchases::Column::HouseId.eq(house_id));
        }
        Ok(query
            .order_by_asc(purchases::Column::PId)
            .all(&self.database)
            .await?)
    }

    /// A purchase with buyer name, lines and derived total.
    pub async fn purchase_detail(&self, p_id: i32, house_id: i32) -> ResultEngine<PurchaseDetail> {
        let header: PurchaseHeader = store::fetch_one(
            &self.database,
            store::raw(
                &self.database,
                views::PURCHASE_HEADER_SQL,
                vec![p_id.into(), house_id.into()],
            ),
        )
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("Purchase".to_string()))?;

        let lines = lines_of(&self.database, p_id, house_id).await?;
        let total = costs::purchase_total(&lines);
        Ok(PurchaseDetail {
            purchase: header,
            lines,
            total,
        })
    }

    pub async fn purchase_lines(
        &self,
        p_id: i32,
        house_id: i32,
    ) -> ResultEngine<Vec<PurchaseLineView>> {
        self.require_purchase_in_house(&self.database, house_id, p_id)
            .await?;
        lines_of(&self.database, p_id, house_id).await
    }

    /// Create a purchase paid by `buyer_id`, a member of the same house.
    pub async fn new_purchase(&self, cmd: NewPurchase) -> ResultEngine<Purchase> {
        with_tx!(self, |db_tx| {
            self.require_house(&db_tx, cmd.house_id).await?;
            self.require_person_in_house(&db_tx, cmd.house_id, cmd.buyer_id)
                .await?;

            let active = purchases::ActiveModel {
                house_id: ActiveValue::Set(cmd.house_id),
                buyer_id: ActiveValue::Set(cmd.buyer_id),
                purchase_at: ActiveValue::Set(cmd.purchase_at.unwrap_or_else(today)),
                ..Default::default()
            };
            Ok(active.insert(&db_tx).await?)
        })
    }

    /// Attach a line to a purchase. The unit cost is stored as given and is
    /// independent from the item's current cost.
    pub async fn add_purchase_line(
        &self,
        p_id: i32,
        cmd: NewPurchaseLine,
    ) -> ResultEngine<PurchaseLineView> {
        if cmd.quantity <= 0 {
            return Err(EngineError::InvalidField(
                "quantity must be greater than zero".to_string(),
            ));
        }
        ensure_unit_cost(cmd.cost_per_ct)?;

        with_tx!(self, |db_tx| {
            self.require_purchase_in_house(&db_tx, cmd.house_id, p_id)
                .await?;
            self.require_item_in_house(&db_tx, cmd.house_id, cmd.item_id)
                .await?;

            let outcome = store::execute(
                &db_tx,
                store::raw(
                    &db_tx,
                    INSERT_LINE_SQL,
                    vec![
                        cmd.house_id.into(),
                        p_id.into(),
                        cmd.item_id.into(),
                        cmd.quantity.into(),
                        cmd.cost_per_ct.into(),
                    ],
                ),
            )
            .await?;
            let pl_id = outcome.inserted_key()?;

            store::fetch_one(
                &db_tx,
                store::raw(&db_tx, views::PURCHASE_LINE_SQL, vec![pl_id.into(), p_id.into()]),
            )
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("Purchase line".to_string()))
        })
    }

    pub async fn update_purchase(
        &self,
        p_id: i32,
        house_id: i32,
        patch: &PurchasePatch,
    ) -> ResultEngine<Purchase> {
        with_tx!(self, |db_tx| {
            if let Some(buyer_id) = patch.buyer_id {
                self.require_person_in_house(&db_tx, house_id, buyer_id)
                    .await?;
            }

            let statement = patch::update_statement(
                patch,
                Condition::all()
                    .add(purchases::Column::PId.eq(p_id))
                    .add(purchases::Column::HouseId.eq(house_id)),
            )?;
            let outcome = store::execute(&db_tx, store::build(&db_tx, &statement)).await?;
            if outcome.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("Purchase".to_string()));
            }
            self.require_purchase_in_house(&db_tx, house_id, p_id)
                .await
        })
    }

    /// Remove one line, addressed by line id and purchase id.
    pub async fn delete_purchase_line(&self, pl_id: i32, p_id: i32) -> ResultEngine<()> {
        let result = purchase_lines::Entity::delete_many()
            .filter(purchase_lines::Column::PlId.eq(pl_id))
            .filter(purchase_lines::Column::PId.eq(p_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("Purchase line".to_string()));
        }
        Ok(())
    }

    /// Delete a purchase and its lines.
    ///
    /// The purchase must exist in the house first; lines are then removed
    /// before the purchase itself, in one transaction.
    pub async fn delete_purchase(&self, p_id: i32, house_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_purchase_in_house(&db_tx, house_id, p_id)
                .await?;

            purchase_lines::Entity::delete_many()
                .filter(purchase_lines::Column::PId.eq(p_id))
                .filter(purchase_lines::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;

            let result = purchases::Entity::delete_many()
                .filter(purchases::Column::PId.eq(p_id))
                .filter(purchases::Column::HouseId.eq(house_id))
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("Purchase".to_string()));
            }
            Ok(())
        })
    }
}

async fn lines_of<C: ConnectionTrait>(
    db: &C,
    p_id: i32,
    house_id: i32,
) -> ResultEngine<Vec<PurchaseLineView>> {
    store::fetch_all(
        db,
        store::raw(db, views::PURCHASE_LINES_SQL, vec![p_id.into(), house_id.into()]),
    )
    .await
}
