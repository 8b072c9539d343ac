//! Generic source adapter.
//!
//! Interprets a source's declarative [`SourceMapping`] over the records of
//! one raw snapshot and produces the canonical station and statement rows.
//! A missing or wrongly-shaped required field is fatal for the whole run;
//! only the city code and the address may be absent.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::consolidation::city_codes::CityCodeResolver;
use crate::consolidation::ids::synthesize_station_id;
use crate::consolidation::status::StationStatus;
use crate::consolidation::{CityRecord, StationRecord, StationStatementRecord};
use crate::error::ConsolidationError;
use crate::sources::Source;
use crate::sources::mapping::{
    CityCodeRule, CodeRule, CoordRule, TimestampRule, ValueRule, lookup,
};

/// Map one snapshot's records into canonical station and statement rows.
pub fn adapt_source(
    source: &Source,
    records: &[Value],
    resolver: &CityCodeResolver,
    run_date: NaiveDate,
) -> Result<(Vec<StationRecord>, Vec<StationStatementRecord>), ConsolidationError> {
    let mapping = &source.mapping;
    let mut stations = Vec::with_capacity(records.len());
    let mut statements = Vec::with_capacity(records.len());

    for record in records {
        let native_code = native_code(source, record)?;
        let id = synthesize_station_id(source.city_code, &native_code);

        let status_raw = string_at(source, record, mapping.status.path)?;
        let status = StationStatus::normalize(&status_raw, mapping.status.open_token);

        let city_code = match mapping.city_code {
            CityCodeRule::Embedded(path) => lookup(record, path).and_then(scalar_string),
            CityCodeRule::Lookup(name) => resolver.resolve(name).map(str::to_string),
        };

        stations.push(StationRecord {
            id: id.clone(),
            code: native_code,
            name: value_rule(source, record, &mapping.name)?,
            city_name: value_rule(source, record, &mapping.city_name)?,
            city_code,
            address: mapping
                .address
                .and_then(|path| lookup(record, path))
                .and_then(scalar_string),
            longitude: coord(source, record, &mapping.longitude)?,
            latitude: coord(source, record, &mapping.latitude)?,
            status,
            capacity: int_at(source, record, mapping.capacity)?,
            created_date: run_date,
        });

        statements.push(StationStatementRecord {
            station_id: id,
            bicycle_available: int_at(source, record, mapping.bicycle_available)?,
            bicycle_docks_available: int_at(source, record, mapping.bicycle_docks_available)?,
            last_statement_date: timestamp(source, record, &mapping.last_statement_date)?,
            created_date: run_date,
        });
    }

    Ok((stations, statements))
}

/// Map the commune registry snapshot into canonical city rows.
pub fn adapt_communes(
    records: &[Value],
    run_date: NaiveDate,
) -> Result<Vec<CityRecord>, ConsolidationError> {
    const SOURCE: &str = "communes";

    let mut cities = Vec::with_capacity(records.len());
    for record in records {
        let id = lookup(record, "code")
            .and_then(scalar_string)
            .ok_or_else(|| {
                ConsolidationError::malformed_field(SOURCE, "code", "expected a string")
            })?;
        let name = lookup(record, "nom")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ConsolidationError::malformed_field(SOURCE, "nom", "expected a string")
            })?;
        // Population is absent for a handful of communes; carry a null.
        let nb_inhabitants = lookup(record, "population").and_then(Value::as_i64);

        cities.push(CityRecord {
            id,
            name: name.to_string(),
            nb_inhabitants,
            created_date: run_date,
        });
    }

    Ok(cities)
}

fn native_code(source: &Source, record: &Value) -> Result<String, ConsolidationError> {
    match source.mapping.native_code {
        CodeRule::Field(field) => lookup(record, field).and_then(scalar_string).ok_or_else(|| {
            ConsolidationError::malformed_field(source.slug, field, "expected a station code")
        }),
        CodeRule::CharSuffix { field, chars } => {
            let value = lookup(record, field).and_then(|v| v.as_str()).ok_or_else(|| {
                ConsolidationError::malformed_field(source.slug, field, "expected a string")
            })?;
            Ok(char_suffix(value, chars).to_string())
        }
    }
}

/// Trailing `chars` characters of a string, the whole string when shorter.
fn char_suffix(value: &str, chars: usize) -> &str {
    let total = value.chars().count();
    if total <= chars {
        return value;
    }
    match value.char_indices().nth(total - chars) {
        Some((byte_idx, _)) => &value[byte_idx..],
        None => value,
    }
}

/// Render a JSON string or number as a string; codes arrive as either.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_rule(
    source: &Source,
    record: &Value,
    rule: &ValueRule,
) -> Result<String, ConsolidationError> {
    match rule {
        ValueRule::Path(path) => string_at(source, record, path),
        ValueRule::Constant(value) => Ok((*value).to_string()),
    }
}

fn string_at(source: &Source, record: &Value, path: &str) -> Result<String, ConsolidationError> {
    lookup(record, path)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| ConsolidationError::malformed_field(source.slug, path, "expected a string"))
}

fn float_at(source: &Source, record: &Value, path: &str) -> Result<f64, ConsolidationError> {
    let value = lookup(record, path).ok_or_else(|| {
        ConsolidationError::malformed_field(source.slug, path, "expected a number")
    })?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| ConsolidationError::malformed_field(source.slug, path, "expected a number"))
}

fn int_at(source: &Source, record: &Value, path: &str) -> Result<i32, ConsolidationError> {
    let value = lookup(record, path).ok_or_else(|| {
        ConsolidationError::malformed_field(source.slug, path, "expected an integer")
    })?;
    let wide = value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| {
            ConsolidationError::malformed_field(source.slug, path, "expected an integer")
        })?;
    i32::try_from(wide).map_err(|_| {
        ConsolidationError::malformed_field(source.slug, path, "integer out of range")
    })
}

fn coord(source: &Source, record: &Value, rule: &CoordRule) -> Result<f64, ConsolidationError> {
    match rule {
        CoordRule::Path(path) => float_at(source, record, path),
        CoordRule::Index { path, index } => {
            let array = lookup(record, path).and_then(|v| v.as_array()).ok_or_else(|| {
                ConsolidationError::malformed_field(source.slug, *path, "expected an array")
            })?;
            array.get(*index).and_then(Value::as_f64).ok_or_else(|| {
                ConsolidationError::malformed_field(
                    source.slug,
                    format!("{path}[{index}]"),
                    "expected a coordinate",
                )
            })
        }
    }
}

fn timestamp(
    source: &Source,
    record: &Value,
    rule: &TimestampRule,
) -> Result<DateTime<Utc>, ConsolidationError> {
    match rule {
        TimestampRule::Rfc3339(path) => {
            let raw = string_at(source, record, path)?;
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    ConsolidationError::malformed_field(source.slug, *path, e.to_string())
                })
        }
        TimestampRule::EpochSeconds(path) => {
            let value = lookup(record, path).ok_or_else(|| {
                ConsolidationError::malformed_field(source.slug, *path, "expected epoch seconds")
            })?;
            let seconds = value
                .as_i64()
                .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
                .ok_or_else(|| {
                    ConsolidationError::malformed_field(
                        source.slug,
                        *path,
                        "expected a numeric epoch value",
                    )
                })?;
            DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
                ConsolidationError::malformed_field(source.slug, *path, "epoch value out of range")
            })
        }
    }
}
