//! # Mobility Analysis Library
//!
//! This library provides the core functionality for the mobility analysis
//! pipeline: ingestion of the five city bike-share feeds plus the national
//! commune registry, consolidation of the heterogeneous source schemas into
//! canonical station and statement tables, and the storage layer beneath
//! them.

pub mod config;
pub mod consolidation;
pub mod db;
pub mod error;
pub mod ingestion;
pub mod logging;
pub mod models;
pub mod repositories;
pub mod sources;
pub use migration;
