//! WASM bindings for the search engine.
//!
//! A browser loads the catalog JSON once, builds a [`SearchHandle`] and calls
//! it from the input's (debounced) change handler. Debouncing and combobox
//! state stay on the JavaScript side.

use crate::engine::{SearchEngine, SearchSettings};
use laserlookup_catalog::Catalog;
use wasm_bindgen::prelude::*;

/// Search engine over one catalog.
#[wasm_bindgen]
pub struct SearchHandle {
    engine: SearchEngine,
}

#[wasm_bindgen]
impl SearchHandle {
    /// Build both indexes from a JSON array of equipment records.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str) -> Result<SearchHandle, JsValue> {
        let catalog = Catalog::from_json_str(catalog_json)
            .map_err(|e| JsValue::from_str(&format!("Catalog error: {}", e)))?;
        let settings = SearchSettings::default();
        let engine = SearchEngine::new(&catalog, &mut settings.cache(), &settings);
        Ok(Self { engine })
    }

    /// Number of records in the catalog.
    #[wasm_bindgen(getter, js_name = recordCount)]
    pub fn record_count(&self) -> usize {
        self.engine.catalog().len()
    }

    /// Strict results only, as JSON.
    pub fn search(&self, query: &str) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.search(query))
            .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
    }

    /// Strict results, or suggestions when there are none, as JSON.
    ///
    /// # Arguments
    /// * `query` - Raw input text
    /// * `current` - Slug of the record being viewed, if any
    pub fn lookup(&self, query: &str, current: Option<String>) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.lookup(query, current.as_deref()))
            .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
    }
}
