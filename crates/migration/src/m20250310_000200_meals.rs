use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Meal {
    Table,
    MealId,
    HouseId,
    MealName,
    MadeOn,
}

#[derive(Iden)]
enum MealAttend {
    Table,
    MealId,
    HouseId,
    UserId,
}

#[derive(Iden)]
enum MealIngredient {
    Table,
    MealId,
    HouseId,
    ItemId,
    QuantUsed,
    CostPerCt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Meal::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Meal::MealId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Meal::HouseId).integer().not_null())
                    .col(ColumnDef::new(Meal::MealName).string().not_null())
                    .col(ColumnDef::new(Meal::MadeOn).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-meal-house_id")
                    .table(Meal::Table)
                    .col(Meal::HouseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MealAttend::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MealAttend::MealId).integer().not_null())
                    .col(ColumnDef::new(MealAttend::HouseId).integer().not_null())
                    .col(ColumnDef::new(MealAttend::UserId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(MealAttend::MealId)
                            .col(MealAttend::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-meal_attend-user_id")
                    .table(MealAttend::Table)
                    .col(MealAttend::UserId)
                    .col(MealAttend::HouseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MealIngredient::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MealIngredient::MealId).integer().not_null())
                    .col(ColumnDef::new(MealIngredient::HouseId).integer().not_null())
                    .col(ColumnDef::new(MealIngredient::ItemId).integer().not_null())
                    .col(ColumnDef::new(MealIngredient::QuantUsed).double().not_null())
                    .col(ColumnDef::new(MealIngredient::CostPerCt).double().not_null())
                    .primary_key(
                        Index::create()
                            .col(MealIngredient::MealId)
                            .col(MealIngredient::ItemId),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MealIngredient::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MealAttend::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Meal::Table).to_owned())
            .await?;
        Ok(())
    }
}
