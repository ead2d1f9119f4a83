//! Weighted fuzzy index over a catalog.
//!
//! Each record contributes up to four fields (name, aliases, manufacturer,
//! slug). A query is aligned against every field value; a field counts when
//! its error rate is within the threshold and at least one exactly-matched run
//! is long enough. Matched fields add their weighted closeness to the record's
//! relevance.

use crate::fuzzy::{best_alignment, fold_case};
use laserlookup_catalog::{Catalog, CatalogId, Equipment};
use laserlookup_core::config::{SearchConfig, WeightsConfig};
use serde::Serialize;
use std::ops::Range;
use std::sync::Arc;

/// A searchable field of an equipment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Aliases,
    Manufacturer,
    Slug,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Name,
        SearchField::Aliases,
        SearchField::Manufacturer,
        SearchField::Slug,
    ];

    fn values(self, record: &Equipment) -> Vec<&str> {
        match self {
            SearchField::Name => vec![record.name()],
            SearchField::Aliases => record.aliases().iter().map(String::as_str).collect(),
            SearchField::Manufacturer => record.manufacturer().into_iter().collect(),
            SearchField::Slug => vec![record.slug()],
        }
    }
}

/// Relative importance of each field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldWeights {
    pub name: f64,
    pub aliases: f64,
    pub manufacturer: f64,
    pub slug: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        WeightsConfig::default().into()
    }
}

impl From<WeightsConfig> for FieldWeights {
    fn from(config: WeightsConfig) -> Self {
        Self {
            name: config.name,
            aliases: config.aliases,
            manufacturer: config.manufacturer,
            slug: config.slug,
        }
    }
}

impl FieldWeights {
    #[inline]
    pub fn get(&self, field: SearchField) -> f64 {
        match field {
            SearchField::Name => self.name,
            SearchField::Aliases => self.aliases,
            SearchField::Manufacturer => self.manufacturer,
            SearchField::Slug => self.slug,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.name + self.aliases + self.manufacturer + self.slug
    }
}

/// Which of the two index configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexMode {
    /// Primary results
    Strict,
    /// Fallback "did you mean" candidates
    Loose,
}

/// Matching and ranking parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexOptions {
    /// Maximum errors per pattern character for a field to match (0.0..=1.0)
    pub threshold: f64,
    /// Maximum number of results
    pub limit: usize,
    /// Exactly-matched runs shorter than this are ignored
    pub min_match_len: usize,
    pub weights: FieldWeights,
}

impl IndexOptions {
    /// Tight matching for primary results: effectively typo-free below 20 chars.
    pub fn strict() -> Self {
        Self::from_config(&SearchConfig::default(), IndexMode::Strict)
    }

    /// Wide matching for fallback suggestions.
    pub fn loose() -> Self {
        Self::from_config(&SearchConfig::default(), IndexMode::Loose)
    }

    pub fn from_config(config: &SearchConfig, mode: IndexMode) -> Self {
        let (threshold, limit) = match mode {
            IndexMode::Strict => (config.strict_threshold, config.strict_limit),
            IndexMode::Loose => (config.loose_threshold, config.loose_limit),
        };
        Self {
            threshold,
            limit,
            min_match_len: config.min_match_len,
            weights: config.weights.into(),
        }
    }
}

/// How one field of a record matched the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub field: SearchField,
    /// The field value that matched (for aliases, the best alias)
    pub value: String,
    /// Char ranges within `value` to highlight
    pub ranges: Vec<Range<usize>>,
    /// Errors per pattern character, 0.0 for an exact substring
    pub distance: f64,
}

/// One ranked hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    pub record: Arc<Equipment>,
    /// 0.0 is a perfect match on every field; lower is better
    pub score: f64,
    pub matches: Vec<FieldMatch>,
}

impl SearchMatch {
    #[inline]
    pub fn slug(&self) -> &str {
        self.record.slug()
    }

    /// Match details for one field, if it matched.
    pub fn field(&self, field: SearchField) -> Option<&FieldMatch> {
        self.matches.iter().find(|m| m.field == field)
    }
}

struct IndexedValue {
    text: String,
    folded: Vec<char>,
}

struct IndexedRecord {
    record: Arc<Equipment>,
    fields: Vec<(SearchField, Vec<IndexedValue>)>,
}

struct ValueHit {
    distance: f64,
    coverage: f64,
    ranges: Vec<Range<usize>>,
}

struct Ranked {
    position: usize,
    score: f64,
    coverage: f64,
    matches: Vec<FieldMatch>,
}

/// Pre-folded, read-only view of a catalog for fuzzy queries.
pub struct FuzzyIndex {
    catalog_id: CatalogId,
    options: IndexOptions,
    entries: Vec<IndexedRecord>,
}

impl std::fmt::Debug for FuzzyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyIndex")
            .field("catalog_id", &self.catalog_id)
            .field("options", &self.options)
            .field("records", &self.entries.len())
            .finish()
    }
}

impl FuzzyIndex {
    /// Fold every searchable value of the catalog once.
    pub fn build(catalog: &Catalog, options: IndexOptions) -> Self {
        let entries = catalog
            .records()
            .iter()
            .map(|record| IndexedRecord {
                record: Arc::clone(record),
                fields: SearchField::ALL
                    .into_iter()
                    .map(|field| {
                        let values = field
                            .values(record)
                            .into_iter()
                            .map(|text| IndexedValue {
                                text: text.to_string(),
                                folded: fold_case(text),
                            })
                            .collect();
                        (field, values)
                    })
                    .collect(),
            })
            .collect();

        Self {
            catalog_id: catalog.id(),
            options,
            entries,
        }
    }

    #[inline]
    pub fn catalog_id(&self) -> CatalogId {
        self.catalog_id
    }

    #[inline]
    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ranked matches for `query`, best first, at most `options.limit`.
    ///
    /// Blank queries return nothing without touching the index.
    pub fn search(&self, query: &str) -> Vec<SearchMatch> {
        let query = query.trim();
        if query.is_empty() || self.entries.is_empty() {
            return Vec::new();
        }

        let pattern = fold_case(query);
        let mut ranked: Vec<Ranked> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| self.rank(&pattern, position, entry))
            .collect();

        ranked.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then(b.coverage.total_cmp(&a.coverage))
                .then(a.position.cmp(&b.position))
        });
        ranked.truncate(self.options.limit);

        tracing::trace!(
            query,
            threshold = self.options.threshold,
            hits = ranked.len(),
            "Fuzzy query"
        );

        ranked
            .into_iter()
            .map(|r| SearchMatch {
                record: Arc::clone(&self.entries[r.position].record),
                score: r.score,
                matches: r.matches,
            })
            .collect()
    }

    fn rank(&self, pattern: &[char], position: usize, entry: &IndexedRecord) -> Option<Ranked> {
        let weights = &self.options.weights;
        let mut relevance = 0.0;
        let mut coverage: f64 = 0.0;
        let mut matches = Vec::new();

        for (field, values) in &entry.fields {
            let mut best: Option<(&IndexedValue, ValueHit)> = None;
            for value in values {
                let Some(hit) = self.match_value(pattern, &value.folded) else {
                    continue;
                };
                let better = best.as_ref().is_none_or(|(_, b)| {
                    hit.distance < b.distance
                        || (hit.distance == b.distance && hit.coverage > b.coverage)
                });
                if better {
                    best = Some((value, hit));
                }
            }

            if let Some((value, hit)) = best {
                let weight = weights.get(*field);
                relevance += weight * (1.0 - hit.distance);
                coverage = coverage.max(weight * hit.coverage);
                matches.push(FieldMatch {
                    field: *field,
                    value: value.text.clone(),
                    ranges: hit.ranges,
                    distance: hit.distance,
                });
            }
        }

        if matches.is_empty() {
            return None;
        }
        Some(Ranked {
            position,
            score: (1.0 - relevance / weights.total()).max(0.0),
            coverage,
            matches,
        })
    }

    fn match_value(&self, pattern: &[char], folded: &[char]) -> Option<ValueHit> {
        let alignment = best_alignment(pattern, folded)?;
        let distance = alignment.errors as f64 / pattern.len() as f64;
        if distance > self.options.threshold {
            return None;
        }

        let ranges: Vec<Range<usize>> = alignment
            .ranges
            .into_iter()
            .filter(|r| r.len() >= self.options.min_match_len)
            .collect();
        if ranges.is_empty() {
            return None;
        }

        let matched: usize = ranges.iter().map(|r| r.len()).sum();
        Some(ValueHit {
            distance,
            coverage: matched as f64 / folded.len() as f64,
            ranges,
        })
    }
}
