//! Raw snapshot ingestion
//!
//! Fetches each city's real-time feed plus the national commune registry
//! and serializes every response verbatim to
//! `{ingestion_root}/{date}/{file}`. Adapters read the same path
//! convention back, so it lives here in one place.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::ACCEPT;
use tokio::fs;
use tracing::info;
use url::Url;

use crate::config::AppConfig;
use crate::error::IngestionError;
use crate::sources::{ALL_SOURCES, COMMUNE_DATA_FILE, COMMUNE_ENDPOINT, Source};

/// Directory holding all snapshots for one ingestion date.
pub fn snapshot_dir(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(date.format("%Y-%m-%d").to_string())
}

/// Full path of one source's snapshot for one ingestion date.
pub fn snapshot_path(root: &Path, date: NaiveDate, file: &str) -> PathBuf {
    snapshot_dir(root, date).join(file)
}

/// HTTP client fetching raw snapshots into the dated ingestion directory.
pub struct IngestionClient {
    http: reqwest::Client,
    root: PathBuf,
}

impl IngestionClient {
    pub fn new(config: &AppConfig) -> Result<Self, IngestionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            root: config.ingestion_root.clone(),
        })
    }

    /// Fetch every feed plus the commune registry for one date.
    pub async fn ingest_all(&self, date: NaiveDate) -> Result<(), IngestionError> {
        for source in ALL_SOURCES {
            self.ingest_source(source, date).await?;
        }
        self.ingest_communes(date).await
    }

    /// Fetch one city's real-time feed.
    pub async fn ingest_source(
        &self,
        source: &Source,
        date: NaiveDate,
    ) -> Result<(), IngestionError> {
        info!(source = source.slug, "fetching real-time feed");
        let url = parse_endpoint(source.endpoint)?;
        self.fetch_to(url, &snapshot_path(&self.root, date, source.snapshot_file))
            .await
    }

    /// Fetch the national commune registry.
    pub async fn ingest_communes(&self, date: NaiveDate) -> Result<(), IngestionError> {
        info!("fetching commune registry");
        let url = parse_endpoint(COMMUNE_ENDPOINT)?;
        self.fetch_to(url, &snapshot_path(&self.root, date, COMMUNE_DATA_FILE))
            .await
    }

    /// Fetch one URL and write the response body verbatim to `dest`.
    pub async fn fetch_to(&self, url: Url, dest: &Path) -> Result<(), IngestionError> {
        let response = self
            .http
            .get(url.clone())
            // The Montpellier portal refuses requests without an explicit
            // accept header; the others ignore it.
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestionError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(dest, body).await?;
        Ok(())
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, IngestionError> {
    Url::parse(raw).map_err(|source| IngestionError::InvalidEndpoint {
        value: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_paths_follow_the_dated_convention() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let path = snapshot_path(Path::new("data/raw_data"), date, "commune_data.json");
        assert_eq!(
            path,
            PathBuf::from("data/raw_data/2025-06-01/commune_data.json")
        );
    }

    #[test]
    fn registry_endpoints_are_valid_urls() {
        for source in ALL_SOURCES {
            assert!(
                parse_endpoint(source.endpoint).is_ok(),
                "invalid endpoint for {}",
                source.slug
            );
        }
        assert!(parse_endpoint(COMMUNE_ENDPOINT).is_ok());
    }
}
