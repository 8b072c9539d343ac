//! Station entity model
//!
//! This module contains the SeaORM entity model for the consolidate_station
//! table, which stores the canonical per-station attributes produced by the
//! source adapters.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "consolidate_station")]
pub struct Model {
    /// Globally unique station identifier, "{city_code}-{native_code}"
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Source-local station code
    pub code: String,

    /// Station name
    pub name: String,

    /// City name as reported by the source, not normalized
    pub city_name: String,

    /// INSEE administrative code; null when resolution failed
    pub city_code: Option<String>,

    /// Street address; only some sources report it
    pub address: Option<String>,

    pub longitude: f64,

    pub latitude: f64,

    /// Canonical two-valued status, "OPEN" or "CLOSED"
    pub status: String,

    /// Total docking capacity
    pub capacity: i32,

    /// Ingestion date acting as the snapshot partition key
    #[sea_orm(primary_key, auto_increment = false)]
    pub created_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
