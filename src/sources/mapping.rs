//! Declarative field-mapping rules.
//!
//! Each source describes how its raw JSON maps onto the canonical station
//! and statement fields with a [`SourceMapping`]; one generic adapter
//! interprets the rules. Adding a city means writing a new mapping, not a
//! new adapter body.

use serde_json::Value;

/// Follow a dotted path into nested JSON objects.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// How to obtain the source-local station code.
#[derive(Debug, Clone, Copy)]
pub enum CodeRule {
    /// The value of a single field, rendered as a string.
    Field(&'static str),
    /// The trailing `chars` characters of a string field.
    CharSuffix { field: &'static str, chars: usize },
}

/// How to obtain a required string value.
#[derive(Debug, Clone, Copy)]
pub enum ValueRule {
    /// Dotted path into the record.
    Path(&'static str),
    /// A fixed value the source does not report.
    Constant(&'static str),
}

/// How to obtain one coordinate axis.
#[derive(Debug, Clone, Copy)]
pub enum CoordRule {
    /// Dotted path to a number.
    Path(&'static str),
    /// Element `index` of an array at `path` (0 = longitude, 1 = latitude).
    Index { path: &'static str, index: usize },
}

/// Which raw value marks a station as operational.
#[derive(Debug, Clone, Copy)]
pub struct StatusRule {
    pub path: &'static str,
    pub open_token: &'static str,
}

/// How to obtain the statement timestamp.
#[derive(Debug, Clone, Copy)]
pub enum TimestampRule {
    /// RFC 3339 string at the given path.
    Rfc3339(&'static str),
    /// Integer-valued epoch-seconds string at the given path.
    EpochSeconds(&'static str),
}

/// How to obtain the INSEE code for the station's city.
#[derive(Debug, Clone, Copy)]
pub enum CityCodeRule {
    /// The feed embeds the code directly.
    Embedded(&'static str),
    /// Resolve a fixed registry city name against the commune table.
    Lookup(&'static str),
}

/// Complete mapping from one source's raw schema to the canonical fields.
#[derive(Debug, Clone, Copy)]
pub struct SourceMapping {
    pub native_code: CodeRule,
    pub name: ValueRule,
    pub city_name: ValueRule,
    pub city_code: CityCodeRule,
    /// Dotted path to the street address, if the source reports one.
    pub address: Option<&'static str>,
    pub longitude: CoordRule,
    pub latitude: CoordRule,
    pub status: StatusRule,
    pub capacity: &'static str,
    pub bicycle_available: &'static str,
    pub bicycle_docks_available: &'static str,
    pub last_statement_date: TimestampRule,
}
