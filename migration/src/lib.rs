pub use sea_orm_migration::prelude::*;

mod m20250811_093000_init;
mod m20250811_094500_seed_admin_user;
mod seeder;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250811_093000_init::Migration),
            Box::new(m20250811_094500_seed_admin_user::Migration),
        ]
    }
}
