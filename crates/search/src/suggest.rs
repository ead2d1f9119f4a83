//! "Did you mean" suggestions for queries the strict tier cannot answer.
//!
//! Two groups, concatenated in this order:
//! 1. `partial`: the best loose-index matches.
//! 2. `related`: machines from a manufacturer named inside the query.
//!
//! A record never appears in both groups.

use crate::index::FuzzyIndex;
use laserlookup_catalog::{Catalog, Equipment};
use laserlookup_core::config::SuggestConfig;
use serde::Serialize;
use std::sync::Arc;

/// Which group a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionTag {
    Partial,
    Related,
}

/// One entry in the flat suggestion list.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    pub record: Arc<Equipment>,
    pub tag: SuggestionTag,
}

impl Suggestion {
    fn new(record: Arc<Equipment>, tag: SuggestionTag) -> Self {
        Self {
            slug: record.slug().to_string(),
            name: record.name().to_string(),
            manufacturer: record.manufacturer().map(str::to_string),
            record,
            tag,
        }
    }
}

/// Group sizes and the manufacturer detection list.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestSettings {
    pub partial_limit: usize,
    pub related_limit: usize,
    pub manufacturers: Vec<String>,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self::from(&SuggestConfig::default())
    }
}

impl From<&SuggestConfig> for SuggestSettings {
    fn from(config: &SuggestConfig) -> Self {
        Self {
            partial_limit: config.partial_limit,
            related_limit: config.related_limit,
            manufacturers: config.manufacturers.clone(),
        }
    }
}

/// Builds the fallback suggestion list from the loose index and the catalog.
#[derive(Debug, Clone)]
pub struct SuggestionResolver {
    catalog: Catalog,
    loose: Arc<FuzzyIndex>,
    settings: SuggestSettings,
    folded_manufacturers: Vec<String>,
}

impl SuggestionResolver {
    pub fn new(catalog: Catalog, loose: Arc<FuzzyIndex>, settings: SuggestSettings) -> Self {
        debug_assert_eq!(catalog.id(), loose.catalog_id(), "loose index built for another catalog");
        let folded_manufacturers =
            settings.manufacturers.iter().map(|m| m.to_lowercase()).collect();
        Self {
            catalog,
            loose,
            settings,
            folded_manufacturers,
        }
    }

    /// First configured manufacturer whose name occurs anywhere in the query.
    ///
    /// A plain substring test, so "alma" also fires inside "dalmatian".
    pub fn detect_manufacturer(&self, query: &str) -> Option<&str> {
        let query = query.to_lowercase();
        self.folded_manufacturers
            .iter()
            .position(|m| !m.is_empty() && query.contains(m.as_str()))
            .map(|idx| self.settings.manufacturers[idx].as_str())
    }

    /// Flat, ordered suggestions for `query`: partial matches, then related
    /// machines. `current` is the slug of the record being viewed, if any; it
    /// is never offered as related.
    pub fn resolve(&self, query: &str, current: Option<&str>) -> Vec<Suggestion> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut suggestions: Vec<Suggestion> = self
            .loose
            .search(query)
            .into_iter()
            .take(self.settings.partial_limit)
            .map(|hit| Suggestion::new(hit.record, SuggestionTag::Partial))
            .collect();
        let partial_count = suggestions.len();

        if let Some(manufacturer) = self.detect_manufacturer(query) {
            let related = self
                .catalog
                .by_manufacturer(manufacturer, current, self.settings.related_limit);
            for record in related {
                let duplicate =
                    suggestions[..partial_count].iter().any(|s| s.slug == record.slug());
                if !duplicate {
                    suggestions.push(Suggestion::new(record, SuggestionTag::Related));
                }
            }
        }

        tracing::debug!(
            query,
            partial = partial_count,
            related = suggestions.len() - partial_count,
            "Resolved suggestions"
        );
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexOptions;
    use crate::testing::catalog;
    use std::collections::HashSet;

    fn resolver() -> SuggestionResolver {
        let cat = catalog();
        let loose = Arc::new(FuzzyIndex::build(&cat, IndexOptions::loose()));
        SuggestionResolver::new(cat, loose, SuggestSettings::default())
    }

    fn tagged(suggestions: &[Suggestion], tag: SuggestionTag) -> Vec<&str> {
        suggestions
            .iter()
            .filter(|s| s.tag == tag)
            .map(|s| s.slug.as_str())
            .collect()
    }

    #[test]
    fn test_detect_manufacturer() {
        let resolver = resolver();
        assert_eq!(resolver.detect_manufacturer("best CANDELA machine"), Some("Candela"));
        assert_eq!(resolver.detect_manufacturer("lumenis"), Some("Lumenis"));
        assert_eq!(resolver.detect_manufacturer("gentlemax"), None);
    }

    #[test]
    fn test_detect_manufacturer_substring_heuristic() {
        assert_eq!(resolver().detect_manufacturer("dalmatian"), Some("Alma"));
    }

    #[test]
    fn test_typo_gives_partial_only() {
        let suggestions = resolver().resolve("gentlemx pro", None);
        assert_eq!(tagged(&suggestions, SuggestionTag::Partial)[0], "gentlemax-pro");
        assert!(tagged(&suggestions, SuggestionTag::Related).is_empty());
        assert!(suggestions.len() <= 3);
    }

    #[test]
    fn test_manufacturer_in_unmatched_query_gives_related() {
        let suggestions = resolver().resolve("Candela GentleMax", None);
        assert!(tagged(&suggestions, SuggestionTag::Partial).is_empty());
        assert_eq!(
            tagged(&suggestions, SuggestionTag::Related),
            ["gentlemax-pro", "gentlelase-pro", "gentleyag-pro"]
        );
        assert!(suggestions.iter().all(|s| s.manufacturer.as_deref() == Some("Candela")));
    }

    #[test]
    fn test_related_is_deduplicated_against_partial() {
        let suggestions = resolver().resolve("candela x", None);
        assert_eq!(
            tagged(&suggestions, SuggestionTag::Partial),
            ["gentlemax-pro", "gentlelase-pro", "gentleyag-pro"]
        );
        assert!(tagged(&suggestions, SuggestionTag::Related).is_empty());
    }

    #[test]
    fn test_current_record_excluded_from_related() {
        let suggestions = resolver().resolve("candela x", Some("gentlemax-pro"));
        assert_eq!(tagged(&suggestions, SuggestionTag::Related), ["vbeam-perfecta"]);

        let slugs: HashSet<_> = suggestions.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs.len(), suggestions.len());
    }

    #[test]
    fn test_partial_precedes_related() {
        let suggestions = resolver().resolve("candela x", Some("gentlemax-pro"));
        let first_related = suggestions.iter().position(|s| s.tag == SuggestionTag::Related);
        let last_partial = suggestions.iter().rposition(|s| s.tag == SuggestionTag::Partial);
        assert!(last_partial < first_related);
    }

    #[test]
    fn test_nothing_to_suggest() {
        let resolver = resolver();
        assert!(resolver.resolve("zzzzzz", None).is_empty());
        assert!(resolver.resolve("   ", None).is_empty());
    }
}
