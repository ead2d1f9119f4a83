//! Two-tier lookup: strict results first, suggestions only when strict is empty.

use crate::cache::IndexCache;
use crate::index::{FuzzyIndex, IndexMode, IndexOptions, SearchMatch};
use crate::suggest::{SuggestSettings, Suggestion, SuggestionResolver};
use laserlookup_catalog::Catalog;
use laserlookup_core::config::ConfigSchema;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Something the user can commit to from the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Selection {
    /// A record's detail view
    Record { slug: String },
    /// The catalog listing, offered after every suggestion list
    BrowseAll,
}

impl Selection {
    /// Route for this selection under `namespace`, e.g. `/equipment/gentlemax-pro`.
    pub fn route(&self, namespace: &str) -> String {
        let namespace = namespace.trim_matches('/');
        match self {
            Selection::Record { slug } => format!("/{namespace}/{slug}"),
            Selection::BrowseAll => format!("/{namespace}"),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            Selection::Record { slug } => Some(slug),
            Selection::BrowseAll => None,
        }
    }
}

/// What the dropdown is currently showing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum SearchOutcome {
    /// No query yet
    #[default]
    Idle,
    /// Strict matches, best first
    Results(Vec<SearchMatch>),
    /// Fallback suggestions; a browse-all entry follows the last one
    Suggestions(Vec<Suggestion>),
}

impl SearchOutcome {
    /// Navigable entries, counting the browse-all entry of a suggestion list.
    pub fn item_count(&self) -> usize {
        match self {
            SearchOutcome::Idle => 0,
            SearchOutcome::Results(results) => results.len(),
            SearchOutcome::Suggestions(suggestions) => suggestions.len() + 1,
        }
    }

    /// The selection behind navigable entry `index`.
    pub fn selection_at(&self, index: usize) -> Option<Selection> {
        match self {
            SearchOutcome::Idle => None,
            SearchOutcome::Results(results) => results.get(index).map(|hit| Selection::Record {
                slug: hit.slug().to_string(),
            }),
            SearchOutcome::Suggestions(suggestions) => match suggestions.get(index) {
                Some(suggestion) => Some(Selection::Record {
                    slug: suggestion.slug.clone(),
                }),
                None if index == suggestions.len() => Some(Selection::BrowseAll),
                None => None,
            },
        }
    }

    /// Best strict result, if this outcome holds any.
    pub fn best_result(&self) -> Option<&SearchMatch> {
        match self {
            SearchOutcome::Results(results) => results.first(),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SearchOutcome::Idle)
    }
}

/// Everything tunable about a search widget, resolved from configuration.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub strict: IndexOptions,
    pub loose: IndexOptions,
    pub suggest: SuggestSettings,
    pub debounce: Duration,
    pub route_namespace: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from_config(&ConfigSchema::default())
    }
}

impl SearchSettings {
    pub fn from_config(config: &ConfigSchema) -> Self {
        Self {
            strict: IndexOptions::from_config(&config.search, IndexMode::Strict),
            loose: IndexOptions::from_config(&config.search, IndexMode::Loose),
            suggest: SuggestSettings::from(&config.suggest),
            debounce: Duration::from_millis(config.widget.debounce_ms),
            route_namespace: config.widget.route_namespace.clone(),
        }
    }

    /// An empty cache that builds indexes with these options.
    pub fn cache(&self) -> IndexCache {
        IndexCache::new(self.strict.clone(), self.loose.clone())
    }
}

/// Strict index plus fallback resolver over one catalog.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    catalog: Catalog,
    strict: Arc<FuzzyIndex>,
    resolver: SuggestionResolver,
}

impl SearchEngine {
    /// Wire up both tiers for `catalog`, reusing indexes already in `cache`.
    pub fn new(catalog: &Catalog, cache: &mut IndexCache, settings: &SearchSettings) -> Self {
        let strict = cache.get(catalog, IndexMode::Strict);
        let loose = cache.get(catalog, IndexMode::Loose);
        Self {
            catalog: catalog.clone(),
            strict,
            resolver: SuggestionResolver::new(catalog.clone(), loose, settings.suggest.clone()),
        }
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn resolver(&self) -> &SuggestionResolver {
        &self.resolver
    }

    /// Strict matches only.
    pub fn search(&self, query: &str) -> SearchOutcome {
        if query.trim().is_empty() {
            return SearchOutcome::Idle;
        }
        SearchOutcome::Results(self.strict.search(query))
    }

    /// Strict matches, or suggestions when there are none.
    ///
    /// `current` is the slug of the record being viewed, if any.
    pub fn lookup(&self, query: &str, current: Option<&str>) -> SearchOutcome {
        if query.trim().is_empty() {
            return SearchOutcome::Idle;
        }
        let results = self.strict.search(query);
        if !results.is_empty() {
            return SearchOutcome::Results(results);
        }
        SearchOutcome::Suggestions(self.suggest(query, current))
    }

    /// Suggestions regardless of what the strict tier would return.
    pub fn suggest(&self, query: &str, current: Option<&str>) -> Vec<Suggestion> {
        self.resolver.resolve(query, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::SuggestionTag;
    use crate::testing::{catalog, engine};

    #[test]
    fn test_blank_query_is_idle() {
        let engine = engine();
        assert!(engine.lookup("", None).is_idle());
        assert!(engine.lookup("  ", Some("gentlemax-pro")).is_idle());
        assert!(engine.search("\n").is_idle());
        assert_eq!(SearchOutcome::Idle.item_count(), 0);
    }

    #[test]
    fn test_strict_hit_skips_suggestions() {
        let outcome = engine().lookup("gentle max pro", None);
        let SearchOutcome::Results(results) = &outcome else {
            panic!("expected strict results, got {outcome:?}");
        };
        assert_eq!(results[0].slug(), "gentlemax-pro");
        assert_eq!(outcome.item_count(), results.len());
        assert_eq!(
            outcome.selection_at(0),
            Some(Selection::Record {
                slug: "gentlemax-pro".into()
            })
        );
        assert_eq!(outcome.selection_at(results.len()), None);
    }

    #[test]
    fn test_typo_falls_back_to_suggestions() {
        let outcome = engine().lookup("gentlemx pro", None);
        let SearchOutcome::Suggestions(suggestions) = &outcome else {
            panic!("expected suggestions, got {outcome:?}");
        };
        assert_eq!(suggestions[0].slug, "gentlemax-pro");
        assert_eq!(outcome.item_count(), suggestions.len() + 1);
        assert_eq!(outcome.selection_at(suggestions.len()), Some(Selection::BrowseAll));
        assert_eq!(outcome.selection_at(suggestions.len() + 1), None);
        assert!(outcome.best_result().is_none());
    }

    #[test]
    fn test_empty_suggestions_still_offer_browse_all() {
        let outcome = engine().lookup("zzzzzz", None);
        assert_eq!(outcome.item_count(), 1);
        assert_eq!(outcome.selection_at(0), Some(Selection::BrowseAll));
    }

    #[test]
    fn test_manufacturer_fallback() {
        let outcome = engine().lookup("Candela GentleMax", Some("gentlemax-pro"));
        let SearchOutcome::Suggestions(suggestions) = outcome else {
            panic!("expected suggestions");
        };
        let related: Vec<_> = suggestions
            .iter()
            .filter(|s| s.tag == SuggestionTag::Related)
            .map(|s| s.slug.as_str())
            .collect();
        assert_eq!(related, ["gentlelase-pro", "gentleyag-pro", "vbeam-perfecta"]);
    }

    #[test]
    fn test_search_never_suggests() {
        let outcome = engine().search("gentlemx pro");
        assert!(matches!(outcome, SearchOutcome::Results(ref r) if r.is_empty()));
        assert_eq!(outcome.item_count(), 0);
    }

    #[test]
    fn test_route() {
        let record = Selection::Record {
            slug: "elite-iq".into(),
        };
        assert_eq!(record.route("equipment"), "/equipment/elite-iq");
        assert_eq!(record.route("/equipment/"), "/equipment/elite-iq");
        assert_eq!(Selection::BrowseAll.route("equipment"), "/equipment");
        assert_eq!(record.slug(), Some("elite-iq"));
        assert_eq!(Selection::BrowseAll.slug(), None);
    }

    #[test]
    fn test_engines_share_cached_indexes() {
        let settings = SearchSettings::default();
        let mut cache = settings.cache();
        let cat = catalog();
        let _a = SearchEngine::new(&cat, &mut cache, &settings);
        let _b = SearchEngine::new(&cat, &mut cache, &settings);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = ConfigSchema::default();
        config.widget.debounce_ms = 300;
        config.search.strict_limit = 4;
        let settings = SearchSettings::from_config(&config);
        assert_eq!(settings.debounce, Duration::from_millis(300));
        assert_eq!(settings.strict.limit, 4);
        assert_eq!(settings.loose.limit, 5);
        assert_eq!(settings.route_namespace, "equipment");
    }
}
