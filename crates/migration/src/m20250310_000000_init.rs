//! Initial schema: houses, their members and the inventory.
//!
//! - `house`: root tenant unit
//! - `people`: house members (email is unique across the whole store, checked
//!   by the engine rather than by a constraint)
//! - `item`: one inventory SKU per house
//!
//! `house_id` columns carry no foreign key: scoping is a query predicate
//! applied by the engine.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum House {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum People {
    Table,
    Id,
    Name,
    Email,
    HouseId,
}

#[derive(Iden)]
enum Item {
    Table,
    ItemId,
    ItemName,
    Count,
    CostPerCt,
    HouseId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(House::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(House::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(House::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(People::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(People::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(People::Name).string().not_null())
                    .col(ColumnDef::new(People::Email).string().not_null())
                    .col(ColumnDef::new(People::HouseId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-people-house_id")
                    .table(People::Table)
                    .col(People::HouseId)
                    .to_owned(),
            )
            .await?;

        // Non-unique: email uniqueness is checked by the engine.
        manager
            .create_index(
                Index::create()
                    .name("idx-people-email")
                    .table(People::Table)
                    .col(People::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Item::ItemId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Item::ItemName).string().not_null())
                    .col(
                        ColumnDef::new(Item::Count)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Item::CostPerCt)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Item::HouseId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-item-house_id")
                    .table(Item::Table)
                    .col(Item::HouseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Item::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(People::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(House::Table).to_owned())
            .await?;
        Ok(())
    }
}
