//! Station statement repository for database operations.

use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use super::INSERT_CHUNK;
use crate::consolidation::StationStatementRecord;
use crate::models::station_statement::{
    ActiveModel, Column, Entity as StationStatement, Model,
};

/// Repository for canonical availability readings.
pub struct StationStatementRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StationStatementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Insert-or-replace all rows for their ingestion date.
    pub async fn replace_for_date(
        &self,
        records: &[StationStatementRecord],
    ) -> Result<u64, DbErr> {
        let mut written = 0;
        for chunk in records.chunks(INSERT_CHUNK) {
            let models = chunk.iter().map(|record| ActiveModel {
                station_id: Set(record.station_id.clone()),
                bicycle_available: Set(record.bicycle_available),
                bicycle_docks_available: Set(record.bicycle_docks_available),
                last_statement_date: Set(record.last_statement_date),
                created_date: Set(record.created_date),
            });
            written += StationStatement::insert_many(models)
                .on_conflict(
                    OnConflict::columns([Column::StationId, Column::CreatedDate])
                        .update_columns([
                            Column::BicycleAvailable,
                            Column::BicycleDocksAvailable,
                            Column::LastStatementDate,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(self.db)
                .await?;
        }
        Ok(written)
    }

    /// All readings for one ingestion date, ordered by station identifier.
    pub async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Model>, DbErr> {
        StationStatement::find()
            .filter(Column::CreatedDate.eq(date))
            .order_by_asc(Column::StationId)
            .all(self.db)
            .await
    }
}
