//! Index cache keyed on catalog identity.
//!
//! Building an index folds every searchable value of the catalog; querying
//! only reads. The cache is an ordinary value owned by whoever composes the
//! search components, so tests and widgets never share hidden state.

use crate::index::{FuzzyIndex, IndexMode, IndexOptions};
use laserlookup_catalog::{Catalog, CatalogId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Built indexes, one per `(catalog, mode)` pair.
#[derive(Debug)]
pub struct IndexCache {
    strict: IndexOptions,
    loose: IndexOptions,
    entries: HashMap<(CatalogId, IndexMode), Arc<FuzzyIndex>>,
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::new(IndexOptions::strict(), IndexOptions::loose())
    }
}

impl IndexCache {
    pub fn new(strict: IndexOptions, loose: IndexOptions) -> Self {
        Self {
            strict,
            loose,
            entries: HashMap::new(),
        }
    }

    /// The index for `catalog` in `mode`, built on first use.
    pub fn get(&mut self, catalog: &Catalog, mode: IndexMode) -> Arc<FuzzyIndex> {
        let options = match mode {
            IndexMode::Strict => &self.strict,
            IndexMode::Loose => &self.loose,
        };
        let entry = self.entries.entry((catalog.id(), mode)).or_insert_with(|| {
            let started = Instant::now();
            let index = FuzzyIndex::build(catalog, options.clone());
            tracing::debug!(
                catalog = %catalog.id(),
                ?mode,
                records = index.len(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "Built fuzzy index"
            );
            Arc::new(index)
        });
        Arc::clone(entry)
    }

    /// Drop every index built for `id`.
    pub fn evict(&mut self, id: CatalogId) {
        self.entries.retain(|(catalog, _), _| *catalog != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
