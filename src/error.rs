//! # Error Handling
//!
//! Unified error types for the consolidation and ingestion layers. Fatal
//! errors abort the whole run: downstream aggregation assumes all five
//! sources are present for a given date, so skipping a failing source is
//! never an option.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while consolidating raw snapshots into the canonical tables.
#[derive(Debug, Error)]
pub enum ConsolidationError {
    /// The day's raw file for a source is absent.
    #[error("missing snapshot for source '{source}' at {path}")]
    MissingSnapshot {
        source: &'static str,
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    /// The snapshot exists but is not valid JSON.
    #[error("failed to parse snapshot for source '{source}': {cause}")]
    SnapshotParse {
        source: &'static str,
        #[source]
        cause: serde_json::Error,
    },

    /// An expected field or path is absent or of unexpected shape.
    #[error("malformed field '{field}' in source '{source_name}': {detail}")]
    MalformedField {
        source_name: &'static str,
        field: String,
        detail: String,
    },

    /// The bulk upsert failed; the transaction is rolled back.
    #[error("storage write failed: {0}")]
    Storage(#[from] sea_orm::DbErr),
}

impl ConsolidationError {
    pub fn malformed_field(
        source: &'static str,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::MalformedField {
            source_name: source,
            field: field.into(),
            detail: detail.into(),
        }
    }
}

/// Errors raised while fetching raw snapshots from the upstream portals.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("invalid endpoint '{value}': {source}")]
    InvalidEndpoint {
        value: String,
        source: url::ParseError,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream {url} returned status {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
}
