use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Purchase {
    Table,
    #[iden = "p_id"]
    PId,
    HouseId,
    BuyerId,
    PurchaseAt,
}

#[derive(Iden)]
enum PurchaseLine {
    Table,
    #[iden = "pl_id"]
    PlId,
    #[iden = "p_id"]
    PId,
    HouseId,
    ItemId,
    Quantity,
    CostPerCt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Purchase::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Purchase::PId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Purchase::HouseId).integer().not_null())
                    .col(ColumnDef::new(Purchase::BuyerId).integer().not_null())
                    .col(ColumnDef::new(Purchase::PurchaseAt).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchase-house_id")
                    .table(Purchase::Table)
                    .col(Purchase::HouseId)
                    .to_owned(),
            )
            .await?;

        // Line cost is captured at purchase time and never follows the item.
        manager
            .create_table(
                Table::create()
                    .table(PurchaseLine::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseLine::PlId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PurchaseLine::PId).integer().not_null())
                    .col(ColumnDef::new(PurchaseLine::HouseId).integer().not_null())
                    .col(ColumnDef::new(PurchaseLine::ItemId).integer().not_null())
                    .col(
                        ColumnDef::new(PurchaseLine::Quantity)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseLine::CostPerCt).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchase_line-p_id")
                    .table(PurchaseLine::Table)
                    .col(PurchaseLine::PId)
                    .col(PurchaseLine::HouseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PurchaseLine::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Purchase::Table).to_owned())
            .await?;
        Ok(())
    }
}
