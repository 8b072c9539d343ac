//! End-to-end consolidation tests against a scratch SQLite database.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, NaiveDate};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde_json::json;
use tempfile::TempDir;

use mobility_analysis::consolidation::Consolidator;
use mobility_analysis::error::ConsolidationError;
use mobility_analysis::ingestion::snapshot_dir;
use mobility_analysis::repositories::{
    CityRepository, StationRepository, StationStatementRepository,
};

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

async fn connect(dir: &TempDir) -> Result<DatabaseConnection> {
    let db_path = dir.path().join("mobility_analysis.db");
    let db = Database::connect(format!("sqlite://{}?mode=rwc", db_path.display())).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

fn write_snapshot(root: &Path, file: &str, value: serde_json::Value) -> Result<()> {
    let dir = snapshot_dir(root, run_date());
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join(file), serde_json::to_vec(&value)?)?;
    Ok(())
}

fn commune_snapshot() -> serde_json::Value {
    json!([
        {"nom": "Paris", "code": "75056", "population": 2145906},
        {"nom": "Nantes", "code": "44109", "population": 320732},
        {"nom": "Toulouse", "code": "31555", "population": 504078},
        {"nom": "Strasbourg", "code": "67482", "population": 290576},
        {"nom": "Montpellier", "code": "34172", "population": 302454}
    ])
}

fn paris_snapshot() -> serde_json::Value {
    json!([
        {
            "stationcode": "16107",
            "name": "Benjamin Godard - Victor Hugo",
            "is_installed": "OUI",
            "capacity": 35,
            "numdocksavailable": 30,
            "numbikesavailable": 4,
            "duedate": "2025-06-01T10:00:00+02:00",
            "coordonnees_geo": {"lon": 2.275725, "lat": 48.865983},
            "nom_arrondissement_communes": "Paris",
            "code_insee_commune": "75056"
        },
        {
            "stationcode": "11104",
            "name": "Charonne - Robert et Sonia Delaunay",
            "is_installed": "NON",
            "capacity": 20,
            "numdocksavailable": 20,
            "numbikesavailable": 0,
            "duedate": "2025-06-01T09:45:00+02:00",
            "coordonnees_geo": {"lon": 2.392542, "lat": 48.855908},
            "nom_arrondissement_communes": "Paris",
            "code_insee_commune": "75056"
        }
    ])
}

fn nantes_snapshot() -> serde_json::Value {
    json!([
        {
            "number": 85,
            "name": "00085 - GARE SUD 2",
            "contract_name": "nantes",
            "status": "OPEN",
            "bike_stands": 20,
            "available_bike_stands": 18,
            "available_bikes": 2,
            "last_update": "2025-06-01T09:58:00+02:00",
            "position": {"lon": -1.54226, "lat": 47.21157}
        }
    ])
}

fn toulouse_snapshot() -> serde_json::Value {
    json!([
        {
            "number": 55,
            "name": "00055 - SAINT-SERNIN G. ARNOULT",
            "contract_name": "toulouse",
            "status": "CLOSED",
            "bike_stands": 15,
            "available_bike_stands": 15,
            "available_bikes": 0,
            "last_update": "2025-06-01T09:50:00+02:00",
            "position": {"lon": 1.44119, "lat": 43.60847}
        }
    ])
}

fn strasbourg_snapshot() -> serde_json::Value {
    json!([
        {
            "id": "42",
            "na": "Gare Centrale",
            "lon": 7.735,
            "lat": 48.585,
            "is_installed": "1",
            "to": 7,
            "av": 3,
            "last_reported": "1700000000",
            "address": "Place de la Gare"
        }
    ])
}

fn montpellier_snapshot() -> serde_json::Value {
    json!([
        {
            "id": "urn:ngsi-ld:station:001",
            "address": {
                "type": "PostalAddress",
                "value": {
                    "addressLocality": "Montpellier",
                    "streetAddress": "Rue de la Loge"
                }
            },
            "location": {
                "type": "geo:json",
                "value": {"coordinates": [3.88, 43.608], "type": "Point"}
            },
            "status": {"type": "Text", "value": "working"},
            "totalSlotNumber": {"type": "Number", "value": 12},
            "availableBikeNumber": {
                "type": "Number",
                "value": 5,
                "metadata": {
                    "timestamp": {"type": "DateTime", "value": "2025-06-01T08:00:00.000Z"}
                }
            }
        }
    ])
}

fn write_all_snapshots(root: &Path) -> Result<()> {
    write_snapshot(root, "commune_data.json", commune_snapshot())?;
    write_snapshot(root, "paris_realtime_bicycle_data.json", paris_snapshot())?;
    write_snapshot(root, "nantes_realtime_bicycle_data.json", nantes_snapshot())?;
    write_snapshot(root, "toulouse_realtime_bicycle_data.json", toulouse_snapshot())?;
    write_snapshot(root, "strasbourg_realtime_bicycle_data.json", strasbourg_snapshot())?;
    write_snapshot(
        root,
        "montpellier_realtime_bicycle_data.json",
        montpellier_snapshot(),
    )?;
    Ok(())
}

#[tokio::test]
async fn full_pipeline_consolidates_all_sources() -> Result<()> {
    let dir = TempDir::new()?;
    let db = connect(&dir).await?;
    write_all_snapshots(dir.path())?;

    let consolidator = Consolidator::new(&db, dir.path(), run_date());
    let cities = consolidator.consolidate_cities().await?;
    assert_eq!(cities, 5);

    let summary = consolidator.consolidate_stations().await?;
    assert_eq!(summary.stations, 6);
    assert_eq!(summary.statements, 6);

    let stations = StationRepository::new(&db).list_for_date(run_date()).await?;
    assert_eq!(stations.len(), 6);

    let ids: Vec<_> = stations.iter().map(|s| s.id.as_str()).collect();
    assert!(ids.contains(&"1-16107"));
    assert!(ids.contains(&"2-85"));
    assert!(ids.contains(&"3-55"));
    assert!(ids.contains(&"4-42"));
    assert!(ids.contains(&"5-001"));

    // Every status is canonical.
    for station in &stations {
        assert!(station.status == "OPEN" || station.status == "CLOSED");
    }

    // Resolved INSEE codes, embedded for Paris, looked up for the rest.
    let by_id = |id: &str| stations.iter().find(|s| s.id == id).unwrap();
    assert_eq!(by_id("1-16107").city_code.as_deref(), Some("75056"));
    assert_eq!(by_id("2-85").city_code.as_deref(), Some("44109"));
    assert_eq!(by_id("4-42").city_code.as_deref(), Some("67482"));

    let strasbourg = by_id("4-42");
    assert_eq!(strasbourg.status, "OPEN");
    assert_eq!(strasbourg.capacity, 7);
    assert_eq!(strasbourg.city_name, "strasbourg");

    let closed = by_id("1-11104");
    assert_eq!(closed.status, "CLOSED");

    let statements = StationStatementRepository::new(&db)
        .list_for_date(run_date())
        .await?;
    assert_eq!(statements.len(), 6);

    let reading = statements.iter().find(|s| s.station_id == "4-42").unwrap();
    assert_eq!(reading.bicycle_docks_available, 3);
    assert_eq!(reading.bicycle_available, 7);
    assert_eq!(
        reading.last_statement_date,
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    );

    Ok(())
}

#[tokio::test]
async fn consolidation_is_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    let db = connect(&dir).await?;
    write_all_snapshots(dir.path())?;

    let consolidator = Consolidator::new(&db, dir.path(), run_date());
    consolidator.consolidate_cities().await?;
    consolidator.consolidate_stations().await?;

    let first_stations = StationRepository::new(&db).list_for_date(run_date()).await?;
    let first_statements = StationStatementRepository::new(&db)
        .list_for_date(run_date())
        .await?;
    let first_cities = CityRepository::new(&db).list_for_date(run_date()).await?;

    consolidator.consolidate_cities().await?;
    consolidator.consolidate_stations().await?;

    let second_stations = StationRepository::new(&db).list_for_date(run_date()).await?;
    let second_statements = StationStatementRepository::new(&db)
        .list_for_date(run_date())
        .await?;
    let second_cities = CityRepository::new(&db).list_for_date(run_date()).await?;

    assert_eq!(first_stations, second_stations);
    assert_eq!(first_statements, second_statements);
    assert_eq!(first_cities, second_cities);

    Ok(())
}

#[tokio::test]
async fn missing_snapshot_aborts_without_partial_write() -> Result<()> {
    let dir = TempDir::new()?;
    let db = connect(&dir).await?;
    write_all_snapshots(dir.path())?;

    // Remove one source after the fact; the run must fail whole.
    std::fs::remove_file(
        snapshot_dir(dir.path(), run_date()).join("montpellier_realtime_bicycle_data.json"),
    )?;

    let consolidator = Consolidator::new(&db, dir.path(), run_date());
    consolidator.consolidate_cities().await?;

    let result = consolidator.consolidate_stations().await;
    assert!(matches!(
        result,
        Err(ConsolidationError::MissingSnapshot {
            source: "montpellier",
            ..
        })
    ));

    // Nothing was written for the failed run.
    let stations = StationRepository::new(&db).list_for_date(run_date()).await?;
    assert!(stations.is_empty());
    let statements = StationStatementRepository::new(&db)
        .list_for_date(run_date())
        .await?;
    assert!(statements.is_empty());

    Ok(())
}

#[tokio::test]
async fn unresolved_city_carries_a_null_code() -> Result<()> {
    let dir = TempDir::new()?;
    let db = connect(&dir).await?;
    write_all_snapshots(dir.path())?;

    // Registry without Strasbourg: its stations must still load.
    write_snapshot(
        dir.path(),
        "commune_data.json",
        json!([
            {"nom": "Paris", "code": "75056", "population": 2145906},
            {"nom": "Nantes", "code": "44109", "population": 320732},
            {"nom": "Toulouse", "code": "31555", "population": 504078},
            {"nom": "Montpellier", "code": "34172", "population": 302454}
        ]),
    )?;

    let consolidator = Consolidator::new(&db, dir.path(), run_date());
    consolidator.consolidate_cities().await?;
    let summary = consolidator.consolidate_stations().await?;
    assert_eq!(summary.stations, 6);

    let stations = StationRepository::new(&db).list_for_date(run_date()).await?;
    let strasbourg = stations.iter().find(|s| s.id == "4-42").unwrap();
    assert_eq!(strasbourg.city_code, None);

    let nantes = stations.iter().find(|s| s.id == "2-85").unwrap();
    assert_eq!(nantes.city_code.as_deref(), Some("44109"));

    Ok(())
}

#[tokio::test]
async fn concatenation_preserves_source_order_and_counts() -> Result<()> {
    let dir = TempDir::new()?;
    let db = connect(&dir).await?;
    write_all_snapshots(dir.path())?;

    let consolidator = Consolidator::new(&db, dir.path(), run_date());
    consolidator.consolidate_cities().await?;

    let (stations, statements) = consolidator.collect_stations().await?;
    assert_eq!(stations.len(), 6);
    assert_eq!(statements.len(), stations.len());

    let prefixes: Vec<_> = stations
        .iter()
        .map(|s| s.id.split('-').next().unwrap().to_string())
        .collect();
    assert_eq!(prefixes, ["1", "1", "2", "3", "4", "5"]);

    // Statements line up with their stations.
    for (station, statement) in stations.iter().zip(&statements) {
        assert_eq!(station.id, statement.station_id);
    }

    Ok(())
}
