use sea_orm_migration::{prelude::*, sea_orm::TransactionTrait};

use crate::seeder;

/// seeds demo listings and inquiries when `SEED_DEMO_DATA` is truthy,
/// meant for development environments only
fn should_seed_demo_data() -> bool {
    std::env::var("SEED_DEMO_DATA")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let transaction = db.begin().await?;

        seeder::admin_user(&transaction).await?;

        if should_seed_demo_data() {
            for _ in 0..20 {
                let vehicle = seeder::vehicle(&transaction).await?;

                seeder::inquiry(&transaction, vehicle.id).await?;
            }
        }

        transaction.commit().await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(String::from("cannot be reverted")))
    }
}
