//! Station repository for database operations.

use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use super::INSERT_CHUNK;
use crate::consolidation::StationRecord;
use crate::models::station::{ActiveModel, Column, Entity as Station, Model};

/// Repository for canonical station rows.
pub struct StationRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Insert-or-replace all rows for their ingestion date.
    pub async fn replace_for_date(&self, records: &[StationRecord]) -> Result<u64, DbErr> {
        let mut written = 0;
        for chunk in records.chunks(INSERT_CHUNK) {
            let models = chunk.iter().map(|record| ActiveModel {
                id: Set(record.id.clone()),
                code: Set(record.code.clone()),
                name: Set(record.name.clone()),
                city_name: Set(record.city_name.clone()),
                city_code: Set(record.city_code.clone()),
                address: Set(record.address.clone()),
                longitude: Set(record.longitude),
                latitude: Set(record.latitude),
                status: Set(record.status.as_str().to_string()),
                capacity: Set(record.capacity),
                created_date: Set(record.created_date),
            });
            written += Station::insert_many(models)
                .on_conflict(
                    OnConflict::columns([Column::Id, Column::CreatedDate])
                        .update_columns([
                            Column::Code,
                            Column::Name,
                            Column::CityName,
                            Column::CityCode,
                            Column::Address,
                            Column::Longitude,
                            Column::Latitude,
                            Column::Status,
                            Column::Capacity,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(self.db)
                .await?;
        }
        Ok(written)
    }

    /// All station rows for one ingestion date, ordered by identifier.
    pub async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Model>, DbErr> {
        Station::find()
            .filter(Column::CreatedDate.eq(date))
            .order_by_asc(Column::Id)
            .all(self.db)
            .await
    }
}
