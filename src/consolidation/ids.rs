//! Station identifier synthesis.

/// Build the globally unique station identifier from the per-city numeric
/// code and the source-local station code.
///
/// Pure and deterministic; injective as long as native codes are unique
/// within a city, which the sources guarantee but this function does not
/// verify.
pub fn synthesize_station_id(city_code: u8, native_code: &str) -> String {
    format!("{city_code}-{native_code}")
}
