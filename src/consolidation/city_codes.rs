//! INSEE code resolution.
//!
//! Most feeds do not embed the administrative code of their city; the
//! resolver looks it up in the commune rows loaded earlier in the same run.
//! Taking the rows as a constructor argument makes that ordering dependency
//! part of the signature instead of an implicit invocation-order rule.

use std::collections::HashMap;

use tracing::debug;

/// Name-keyed lookup over the commune registry rows of the current run.
#[derive(Debug, Default)]
pub struct CityCodeResolver {
    by_name: HashMap<String, String>,
}

impl CityCodeResolver {
    /// Build a resolver from (name, INSEE code) pairs.
    ///
    /// Commune names are not unique nationally; on a duplicate name the
    /// first pair wins and later ones are ignored, keeping resolution
    /// deterministic for a given input order.
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut by_name = HashMap::new();
        for (name, code) in records {
            if by_name.contains_key(&name) {
                debug!(name = %name, "duplicate commune name ignored by resolver");
                continue;
            }
            by_name.insert(name, code);
        }
        Self { by_name }
    }

    /// Exact, case-sensitive lookup. `None` when the name is unknown;
    /// callers propagate a null city code rather than failing the run.
    pub fn resolve(&self, city_name: &str) -> Option<&str> {
        self.by_name.get(city_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
