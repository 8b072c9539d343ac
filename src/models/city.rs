//! City entity model
//!
//! One row per commune from the national registry and per ingestion date.
//! The station adapters resolve INSEE codes against the rows of the current
//! run date.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "consolidate_city")]
pub struct Model {
    /// INSEE administrative code of the commune (primary key with date)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Commune name as published by the registry
    pub name: String,

    /// Population count; absent for a handful of communes
    pub nb_inhabitants: Option<i64>,

    /// Ingestion date acting as the snapshot partition key
    #[sea_orm(primary_key, auto_increment = false)]
    pub created_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
