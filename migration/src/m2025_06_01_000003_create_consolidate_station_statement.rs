//! Migration to create the consolidate_station_statement table.
//!
//! One availability reading per station and ingestion date; sources report
//! a single reading per poll, so (station_id, created_date) is the primary
//! key and the conflict target for the daily replace-load.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConsolidateStationStatement::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConsolidateStationStatement::StationId)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConsolidateStationStatement::BicycleAvailable)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConsolidateStationStatement::BicycleDocksAvailable)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConsolidateStationStatement::LastStatementDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConsolidateStationStatement::CreatedDate)
                            .date()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ConsolidateStationStatement::StationId)
                            .col(ConsolidateStationStatement::CreatedDate),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ConsolidateStationStatement::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ConsolidateStationStatement {
    Table,
    StationId,
    BicycleAvailable,
    BicycleDocksAvailable,
    LastStatementDate,
    CreatedDate,
}
