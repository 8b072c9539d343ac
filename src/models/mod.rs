//! # Data Models
//!
//! SeaORM entity models for the consolidation tables.

pub mod city;
pub mod station;
pub mod station_statement;

pub use city::Entity as City;
pub use station::Entity as Station;
pub use station_statement::Entity as StationStatement;
