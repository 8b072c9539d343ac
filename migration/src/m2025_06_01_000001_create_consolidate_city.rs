//! Migration to create the consolidate_city table.
//!
//! This table holds one row per commune and ingestion date, keyed on the
//! INSEE code plus the ingestion date so a same-day reload replaces rows
//! instead of duplicating them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConsolidateCity::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ConsolidateCity::Id).text().not_null())
                    .col(ColumnDef::new(ConsolidateCity::Name).text().not_null())
                    .col(ColumnDef::new(ConsolidateCity::NbInhabitants).big_integer())
                    .col(ColumnDef::new(ConsolidateCity::CreatedDate).date().not_null())
                    .primary_key(
                        Index::create()
                            .col(ConsolidateCity::Id)
                            .col(ConsolidateCity::CreatedDate),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConsolidateCity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ConsolidateCity {
    Table,
    Id,
    Name,
    NbInhabitants,
    CreatedDate,
}
