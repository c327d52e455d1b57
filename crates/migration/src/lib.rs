pub use sea_orm_migration::prelude::*;

mod m20250310_000000_init;
mod m20250310_000100_purchases;
mod m20250310_000200_meals;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000000_init::Migration),
            Box::new(m20250310_000100_purchases::Migration),
            Box::new(m20250310_000200_meals::Migration),
        ]
    }
}
