//! Source registry
//!
//! The single catalog of bike-share feeds the pipeline consolidates. Each
//! entry carries the per-city numeric code, the snapshot file name, the
//! upstream endpoint, and the declarative field mapping interpreted by the
//! generic adapter. Sources are processed in the order they appear here.

pub mod mapping;

use mapping::{
    CityCodeRule, CodeRule, CoordRule, SourceMapping, StatusRule, TimestampRule, ValueRule,
};

/// One consolidated bike-share feed.
#[derive(Debug, Clone, Copy)]
pub struct Source {
    /// Short identifier used in logs and error messages.
    pub slug: &'static str,
    /// Per-city numeric code prefixed onto every station identifier.
    pub city_code: u8,
    /// File name of the raw snapshot under the dated ingestion directory.
    pub snapshot_file: &'static str,
    /// Upstream endpoint serving the real-time feed.
    pub endpoint: &'static str,
    /// Field mapping interpreted by the generic adapter.
    pub mapping: SourceMapping,
}

/// Commune registry snapshot file name.
pub const COMMUNE_DATA_FILE: &str = "commune_data.json";

/// Commune registry endpoint.
pub const COMMUNE_ENDPOINT: &str = "https://geo.api.gouv.fr/communes";

pub const PARIS: Source = Source {
    slug: "paris",
    city_code: 1,
    snapshot_file: "paris_realtime_bicycle_data.json",
    endpoint: "https://opendata.paris.fr/api/explore/v2.1/catalog/datasets/velib-disponibilite-en-temps-reel/exports/json",
    mapping: SourceMapping {
        native_code: CodeRule::Field("stationcode"),
        name: ValueRule::Path("name"),
        city_name: ValueRule::Path("nom_arrondissement_communes"),
        city_code: CityCodeRule::Embedded("code_insee_commune"),
        address: None,
        longitude: CoordRule::Path("coordonnees_geo.lon"),
        latitude: CoordRule::Path("coordonnees_geo.lat"),
        status: StatusRule {
            path: "is_installed",
            open_token: "OUI",
        },
        capacity: "capacity",
        bicycle_available: "numbikesavailable",
        bicycle_docks_available: "numdocksavailable",
        last_statement_date: TimestampRule::Rfc3339("duedate"),
    },
};

pub const NANTES: Source = Source {
    slug: "nantes",
    city_code: 2,
    snapshot_file: "nantes_realtime_bicycle_data.json",
    endpoint: "https://data.nantesmetropole.fr/api/explore/v2.1/catalog/datasets/244400404_stations-velos-libre-service-nantes-metropole-disponibilites/exports/json",
    mapping: SourceMapping {
        native_code: CodeRule::Field("number"),
        name: ValueRule::Path("name"),
        city_name: ValueRule::Path("contract_name"),
        city_code: CityCodeRule::Lookup("Nantes"),
        address: None,
        longitude: CoordRule::Path("position.lon"),
        latitude: CoordRule::Path("position.lat"),
        // The feed already reports the canonical OPEN/CLOSED vocabulary.
        status: StatusRule {
            path: "status",
            open_token: "OPEN",
        },
        capacity: "bike_stands",
        bicycle_available: "available_bikes",
        bicycle_docks_available: "available_bike_stands",
        last_statement_date: TimestampRule::Rfc3339("last_update"),
    },
};

pub const TOULOUSE: Source = Source {
    slug: "toulouse",
    city_code: 3,
    snapshot_file: "toulouse_realtime_bicycle_data.json",
    endpoint: "https://data.toulouse-metropole.fr/api/explore/v2.1/catalog/datasets/api-velo-toulouse-temps-reel/exports/json",
    mapping: SourceMapping {
        native_code: CodeRule::Field("number"),
        name: ValueRule::Path("name"),
        city_name: ValueRule::Path("contract_name"),
        city_code: CityCodeRule::Lookup("Toulouse"),
        address: None,
        longitude: CoordRule::Path("position.lon"),
        latitude: CoordRule::Path("position.lat"),
        status: StatusRule {
            path: "status",
            open_token: "OPEN",
        },
        capacity: "bike_stands",
        bicycle_available: "available_bikes",
        bicycle_docks_available: "available_bike_stands",
        last_statement_date: TimestampRule::Rfc3339("last_update"),
    },
};

pub const STRASBOURG: Source = Source {
    slug: "strasbourg",
    city_code: 4,
    snapshot_file: "strasbourg_realtime_bicycle_data.json",
    endpoint: "https://data.strasbourg.eu/api/explore/v2.1/catalog/datasets/stations-velhop/exports/json",
    mapping: SourceMapping {
        native_code: CodeRule::Field("id"),
        name: ValueRule::Path("na"),
        // The feed carries no city name.
        city_name: ValueRule::Constant("strasbourg"),
        city_code: CityCodeRule::Lookup("Strasbourg"),
        address: Some("address"),
        longitude: CoordRule::Path("lon"),
        latitude: CoordRule::Path("lat"),
        status: StatusRule {
            path: "is_installed",
            open_token: "1",
        },
        capacity: "to",
        bicycle_available: "to",
        bicycle_docks_available: "av",
        last_statement_date: TimestampRule::EpochSeconds("last_reported"),
    },
};

pub const MONTPELLIER: Source = Source {
    slug: "montpellier",
    city_code: 5,
    snapshot_file: "montpellier_realtime_bicycle_data.json",
    endpoint: "https://portail-api-data.montpellier3m.fr/bikestation",
    mapping: SourceMapping {
        // Station ids look like "urn:ngsi-ld:station:001"; the native code
        // is the trailing three characters.
        native_code: CodeRule::CharSuffix {
            field: "id",
            chars: 3,
        },
        name: ValueRule::Path("address.value.streetAddress"),
        city_name: ValueRule::Path("address.value.addressLocality"),
        city_code: CityCodeRule::Lookup("Montpellier"),
        address: Some("address.value.streetAddress"),
        longitude: CoordRule::Index {
            path: "location.value.coordinates",
            index: 0,
        },
        latitude: CoordRule::Index {
            path: "location.value.coordinates",
            index: 1,
        },
        status: StatusRule {
            path: "status.value",
            open_token: "working",
        },
        capacity: "totalSlotNumber.value",
        bicycle_available: "totalSlotNumber.value",
        bicycle_docks_available: "availableBikeNumber.value",
        last_statement_date: TimestampRule::Rfc3339(
            "availableBikeNumber.metadata.timestamp.value",
        ),
    },
};

/// All sources, in consolidation order.
pub const ALL_SOURCES: &[Source] = &[PARIS, NANTES, TOULOUSE, STRASBOURG, MONTPELLIER];

/// Look up a source by slug.
pub fn find_by_slug(slug: &str) -> Option<&'static Source> {
    ALL_SOURCES.iter().find(|s| s.slug == slug)
}
