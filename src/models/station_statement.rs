//! Station statement entity model
//!
//! One availability reading per station per ingestion run.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "consolidate_station_statement")]
pub struct Model {
    /// Synthesized station identifier this reading belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub station_id: String,

    pub bicycle_available: i32,

    pub bicycle_docks_available: i32,

    /// Source-reported freshness of the reading
    pub last_statement_date: DateTimeUtc,

    /// Ingestion date acting as the snapshot partition key
    #[sea_orm(primary_key, auto_increment = false)]
    pub created_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
