//! Database migrations for the mobility analysis pipeline.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2025_06_01_000001_create_consolidate_city;
mod m2025_06_01_000002_create_consolidate_station;
mod m2025_06_01_000003_create_consolidate_station_statement;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_06_01_000001_create_consolidate_city::Migration),
            Box::new(m2025_06_01_000002_create_consolidate_station::Migration),
            Box::new(m2025_06_01_000003_create_consolidate_station_statement::Migration),
        ]
    }
}
