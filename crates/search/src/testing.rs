//! Shared fixtures for unit tests.

use crate::engine::{SearchEngine, SearchSettings};
use laserlookup_catalog::Catalog;

pub(crate) const EQUIPMENT_JSON: &str = include_str!("../testdata/equipment.json");

/// A fresh catalog (new identity on every call) over the bundled test data.
pub(crate) fn catalog() -> Catalog {
    Catalog::from_json_str(EQUIPMENT_JSON).expect("test catalog is valid")
}

/// An engine with default settings over a fresh [`catalog`].
pub(crate) fn engine() -> SearchEngine {
    let settings = SearchSettings::default();
    SearchEngine::new(&catalog(), &mut settings.cache(), &settings)
}
