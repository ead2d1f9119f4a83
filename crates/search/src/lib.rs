//! Equipment search for laserlookup.
//!
//! This crate provides:
//! - Typo-tolerant substring matching with highlight ranges ([`fuzzy`])
//! - A weighted strict/loose index over a catalog, cached per catalog identity
//! - "Did you mean" suggestions with manufacturer-related machines
//! - Combobox keyboard and pointer state for a search dropdown
//! - A trailing debounce and a widget tying it all together (`runtime` feature)
//!
//! # Example
//!
//! ```
//! use laserlookup_catalog::Catalog;
//! use laserlookup_search::{SearchEngine, SearchOutcome, SearchSettings};
//!
//! let catalog = Catalog::from_json_str(r#"[
//!     {"type": "machine", "slug": "gentlemax-pro", "name": "GentleMax Pro",
//!      "aliases": ["gentle max pro"], "manufacturer": "Candela",
//!      "technologyType": "laser", "wavelengths": ["755nm", "1064nm"],
//!      "brandTier": "premium-clinical", "purposeBuilt": true}
//! ]"#).unwrap();
//!
//! let settings = SearchSettings::default();
//! let engine = SearchEngine::new(&catalog, &mut settings.cache(), &settings);
//!
//! let outcome = engine.lookup("Gentle Max PRO", None);
//! assert!(matches!(outcome, SearchOutcome::Results(ref r) if r[0].slug() == "gentlemax-pro"));
//!
//! let outcome = engine.lookup("gentlemx pro", None);
//! assert!(matches!(outcome, SearchOutcome::Suggestions(_)));
//! ```

pub mod fuzzy;
pub mod highlight;

mod cache;
mod combobox;
mod engine;
mod index;
mod suggest;

#[cfg(feature = "runtime")]
mod debounce;
#[cfg(feature = "runtime")]
mod widget;

#[cfg(feature = "wasm")]
mod wasm;

#[cfg(test)]
mod testing;

pub use cache::IndexCache;
pub use combobox::{Combobox, Command, Key};
pub use engine::{SearchEngine, SearchOutcome, SearchSettings, Selection};
pub use index::{
    FieldMatch, FieldWeights, FuzzyIndex, IndexMode, IndexOptions, SearchField, SearchMatch,
};
pub use suggest::{SuggestSettings, Suggestion, SuggestionResolver, SuggestionTag};

#[cfg(feature = "runtime")]
pub use debounce::{DEFAULT_DELAY, Debouncer};
#[cfg(feature = "runtime")]
pub use widget::SearchWidget;

#[cfg(feature = "wasm")]
pub use wasm::SearchHandle;
