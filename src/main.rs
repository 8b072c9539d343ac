//! # Mobility Analysis Pipeline Entry Point
//!
//! Runs the daily batch: ingest the raw feeds, then consolidate them into
//! the canonical tables.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tracing::info;

use mobility_analysis::{
    config::{AppConfig, ConfigLoader},
    consolidation::Consolidator,
    db,
    ingestion::IngestionClient,
    logging,
};

#[derive(Parser)]
#[command(
    name = "mobility-analysis",
    about = "Consolidates French bike-share availability feeds into an analytical store",
    version
)]
struct Cli {
    /// Run date; defaults to today (UTC). Selects both the snapshot
    /// directory and the created_date partition.
    #[arg(long, value_name = "YYYY-MM-DD", global = true)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the day's raw snapshots, then consolidate them.
    Run,
    /// Fetch the day's raw snapshots only.
    Ingest,
    /// Consolidate already-ingested snapshots only.
    Consolidate,
    /// Drop all managed tables.
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::new().load()?;
    logging::init_subscriber(&config);

    let run_date = cli.date.unwrap_or_else(|| Utc::now().date_naive());

    match cli.command {
        Command::Run => {
            let db = db::init_pool(&config).await?;
            Migrator::up(&db, None).await?;
            ingest(&config, run_date).await?;
            consolidate(&db, &config, run_date).await?;
        }
        Command::Ingest => {
            ingest(&config, run_date).await?;
        }
        Command::Consolidate => {
            let db = db::init_pool(&config).await?;
            Migrator::up(&db, None).await?;
            consolidate(&db, &config, run_date).await?;
        }
        Command::Reset => {
            let db = db::init_pool(&config).await?;
            Migrator::down(&db, None).await?;
            info!("dropped all managed tables");
        }
    }

    Ok(())
}

async fn ingest(config: &AppConfig, run_date: NaiveDate) -> Result<()> {
    info!(%run_date, "ingestion started");
    let client = IngestionClient::new(config)?;
    client.ingest_all(run_date).await?;
    info!("ingestion done");
    Ok(())
}

async fn consolidate(
    db: &DatabaseConnection,
    config: &AppConfig,
    run_date: NaiveDate,
) -> Result<()> {
    info!(%run_date, "consolidation started");
    let consolidator = Consolidator::new(db, &config.ingestion_root, run_date);
    let cities = consolidator.consolidate_cities().await?;
    let summary = consolidator.consolidate_stations().await?;
    info!(
        cities,
        stations = summary.stations,
        statements = summary.statements,
        "consolidation done"
    );
    Ok(())
}
