//! Schema migrations for the Kindred database.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_charities;
mod m20240101_000002_create_social;
mod m20240101_000003_create_donations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_charities::Migration),
            Box::new(m20240101_000002_create_social::Migration),
            Box::new(m20240101_000003_create_donations::Migration),
        ]
    }
}
