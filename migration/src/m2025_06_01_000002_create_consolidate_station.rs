//! Migration to create the consolidate_station table.
//!
//! One row per station and ingestion date. The id column carries the
//! synthesized "{city_code}-{native_code}" identifier; (id, created_date)
//! is the conflict target for the daily replace-load.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConsolidateStation::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ConsolidateStation::Id).text().not_null())
                    .col(ColumnDef::new(ConsolidateStation::Code).text().not_null())
                    .col(ColumnDef::new(ConsolidateStation::Name).text().not_null())
                    .col(ColumnDef::new(ConsolidateStation::CityName).text().not_null())
                    .col(ColumnDef::new(ConsolidateStation::CityCode).text())
                    .col(ColumnDef::new(ConsolidateStation::Address).text())
                    .col(ColumnDef::new(ConsolidateStation::Longitude).double().not_null())
                    .col(ColumnDef::new(ConsolidateStation::Latitude).double().not_null())
                    .col(ColumnDef::new(ConsolidateStation::Status).text().not_null())
                    .col(ColumnDef::new(ConsolidateStation::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(ConsolidateStation::CreatedDate)
                            .date()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ConsolidateStation::Id)
                            .col(ConsolidateStation::CreatedDate),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConsolidateStation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ConsolidateStation {
    Table,
    Id,
    Code,
    Name,
    CityName,
    CityCode,
    Address,
    Longitude,
    Latitude,
    Status,
    Capacity,
    CreatedDate,
}
