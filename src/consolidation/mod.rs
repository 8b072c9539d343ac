//! Consolidation layer
//!
//! Reconciles the five per-city feeds into one canonical station and
//! statement representation and performs the idempotent daily replace-load
//! into the consolidation tables. Sources are processed sequentially in
//! registry order; any fatal error aborts the run before the single bulk
//! write, so a failed run never leaves a partial day behind.

pub mod adapter;
pub mod city_codes;
pub mod ids;
pub mod status;

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::Value;
use tracing::info;

use crate::error::ConsolidationError;
use crate::ingestion::snapshot_path;
use crate::repositories::{CityRepository, StationRepository, StationStatementRepository};
use crate::sources::{ALL_SOURCES, COMMUNE_DATA_FILE};
use city_codes::CityCodeResolver;
use status::StationStatus;

/// Canonical per-station attributes produced by the source adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub id: String,
    pub code: String,
    pub name: String,
    pub city_name: String,
    pub city_code: Option<String>,
    pub address: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub status: StationStatus,
    pub capacity: i32,
    pub created_date: NaiveDate,
}

/// Canonical availability reading, one per station per run.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStatementRecord {
    pub station_id: String,
    pub bicycle_available: i32,
    pub bicycle_docks_available: i32,
    pub last_statement_date: DateTime<Utc>,
    pub created_date: NaiveDate,
}

/// Canonical commune row from the national registry.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRecord {
    pub id: String,
    pub name: String,
    pub nb_inhabitants: Option<i64>,
    pub created_date: NaiveDate,
}

/// Row counts written by one consolidation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsolidationSummary {
    pub stations: usize,
    pub statements: usize,
}

/// Runs the consolidation phase for one ingestion date.
pub struct Consolidator<'a> {
    db: &'a DatabaseConnection,
    ingestion_root: &'a Path,
    run_date: NaiveDate,
}

impl<'a> Consolidator<'a> {
    pub fn new(db: &'a DatabaseConnection, ingestion_root: &'a Path, run_date: NaiveDate) -> Self {
        Self {
            db,
            ingestion_root,
            run_date,
        }
    }

    /// Load the commune registry snapshot into the city table.
    ///
    /// Must run before [`Self::consolidate_stations`]: the station adapters
    /// resolve INSEE codes against the rows written here.
    pub async fn consolidate_cities(&self) -> Result<usize, ConsolidationError> {
        let records = self.load_snapshot("communes", COMMUNE_DATA_FILE)?;
        let cities = adapter::adapt_communes(&records, self.run_date)?;
        let count = cities.len();

        let txn = self.db.begin().await?;
        CityRepository::new(&txn).replace_for_date(&cities).await?;
        txn.commit().await?;

        info!(rows = count, "consolidated commune registry");
        Ok(count)
    }

    /// Adapt all five feeds in registry order and return the concatenated
    /// canonical rows without writing them.
    pub async fn collect_stations(
        &self,
    ) -> Result<(Vec<StationRecord>, Vec<StationStatementRecord>), ConsolidationError> {
        let cities = CityRepository::new(self.db)
            .list_for_date(self.run_date)
            .await?;
        let resolver = CityCodeResolver::new(cities.into_iter().map(|c| (c.name, c.id)));

        let mut stations = Vec::new();
        let mut statements = Vec::new();
        for source in ALL_SOURCES {
            let records = self.load_snapshot(source.slug, source.snapshot_file)?;
            let (source_stations, source_statements) =
                adapter::adapt_source(source, &records, &resolver, self.run_date)?;
            info!(
                source = source.slug,
                stations = source_stations.len(),
                "adapted source snapshot"
            );
            stations.extend(source_stations);
            statements.extend(source_statements);
        }

        Ok((stations, statements))
    }

    /// Consolidate all five feeds and replace-load the station and
    /// statement tables for the run date in a single transaction.
    pub async fn consolidate_stations(
        &self,
    ) -> Result<ConsolidationSummary, ConsolidationError> {
        let (stations, statements) = self.collect_stations().await?;
        let summary = ConsolidationSummary {
            stations: stations.len(),
            statements: statements.len(),
        };

        let txn = self.db.begin().await?;
        StationRepository::new(&txn)
            .replace_for_date(&stations)
            .await?;
        StationStatementRepository::new(&txn)
            .replace_for_date(&statements)
            .await?;
        txn.commit().await?;

        info!(
            stations = summary.stations,
            statements = summary.statements,
            "consolidated station tables"
        );
        Ok(summary)
    }

    fn load_snapshot(
        &self,
        source: &'static str,
        file: &str,
    ) -> Result<Vec<Value>, ConsolidationError> {
        let path = snapshot_path(self.ingestion_root, self.run_date, file);
        let raw = std::fs::read(&path).map_err(|cause| ConsolidationError::MissingSnapshot {
            source,
            path: path.clone(),
            cause,
        })?;
        let value: Value = serde_json::from_slice(&raw)
            .map_err(|cause| ConsolidationError::SnapshotParse { source, cause })?;
        snapshot_records(source, value)
    }
}

/// Unwrap a snapshot document into its record list. The portals serve
/// either a bare array or an object wrapping one under `results`.
fn snapshot_records(
    source: &'static str,
    value: Value,
) -> Result<Vec<Value>, ConsolidationError> {
    match value {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(ConsolidationError::malformed_field(
                source,
                "results",
                "expected an array of records",
            )),
        },
        _ => Err(ConsolidationError::malformed_field(
            source,
            "<root>",
            "expected an array of records",
        )),
    }
}
