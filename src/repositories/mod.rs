//! # Repository Layer
//!
//! Repositories encapsulating SeaORM operations for the consolidation
//! tables. All writes are chunked insert-or-replace statements keyed on the
//! composite (natural id, created_date) primary key, so re-running a day's
//! load replaces rows instead of duplicating them. Methods are generic over
//! the connection so the consolidator can run them inside one transaction.

pub mod city;
pub mod station;
pub mod station_statement;

pub use city::CityRepository;
pub use station::StationRepository;
pub use station_statement::StationStatementRepository;

/// Rows per bulk insert statement, keeping the bind-parameter count well
/// under SQLite's limit for the widest table.
pub(crate) const INSERT_CHUNK: usize = 250;
