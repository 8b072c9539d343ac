//! City repository for database operations.

use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use super::INSERT_CHUNK;
use crate::consolidation::CityRecord;
use crate::models::city::{ActiveModel, Column, Entity as City, Model};

/// Repository for commune registry rows.
pub struct CityRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CityRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Insert-or-replace all rows for their ingestion date.
    pub async fn replace_for_date(&self, records: &[CityRecord]) -> Result<u64, DbErr> {
        let mut written = 0;
        for chunk in records.chunks(INSERT_CHUNK) {
            let models = chunk.iter().map(|record| ActiveModel {
                id: Set(record.id.clone()),
                name: Set(record.name.clone()),
                nb_inhabitants: Set(record.nb_inhabitants),
                created_date: Set(record.created_date),
            });
            written += City::insert_many(models)
                .on_conflict(
                    OnConflict::columns([Column::Id, Column::CreatedDate])
                        .update_columns([Column::Name, Column::NbInhabitants])
                        .to_owned(),
                )
                .exec_without_returning(self.db)
                .await?;
        }
        Ok(written)
    }

    /// All commune rows for one ingestion date, ordered by INSEE code so
    /// downstream consumers see a deterministic sequence.
    pub async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Model>, DbErr> {
        City::find()
            .filter(Column::CreatedDate.eq(date))
            .order_by_asc(Column::Id)
            .all(self.db)
            .await
    }
}
