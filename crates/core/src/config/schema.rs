//! Configuration schema definitions
//!
//! Every section and field has a default, so an empty file (or no file at all)
//! is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub suggest: SuggestConfig,

    #[serde(default)]
    pub widget: WidgetConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the equipment catalog lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the JSON catalog file
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String {
    "data/equipment.json".to_string()
}

/// Fuzzy index tuning for the strict and loose tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum errors-per-character for a strict field match
    #[serde(default = "default_strict_threshold")]
    pub strict_threshold: f64,

    /// Maximum errors-per-character for a loose field match
    #[serde(default = "default_loose_threshold")]
    pub loose_threshold: f64,

    /// Maximum strict results
    #[serde(default = "default_strict_limit")]
    pub strict_limit: usize,

    /// Maximum loose results
    #[serde(default = "default_loose_limit")]
    pub loose_limit: usize,

    /// Matched runs shorter than this never count
    #[serde(default = "default_min_match_len")]
    pub min_match_len: usize,

    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strict_threshold: default_strict_threshold(),
            loose_threshold: default_loose_threshold(),
            strict_limit: default_strict_limit(),
            loose_limit: default_loose_limit(),
            min_match_len: default_min_match_len(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_strict_threshold() -> f64 {
    0.05
}

fn default_loose_threshold() -> f64 {
    0.4
}

fn default_strict_limit() -> usize {
    8
}

fn default_loose_limit() -> usize {
    5
}

fn default_min_match_len() -> usize {
    2
}

/// Relative weight of each searchable field
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_name_weight")]
    pub name: f64,
    #[serde(default = "default_aliases_weight")]
    pub aliases: f64,
    #[serde(default = "default_manufacturer_weight")]
    pub manufacturer: f64,
    #[serde(default = "default_slug_weight")]
    pub slug: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            name: default_name_weight(),
            aliases: default_aliases_weight(),
            manufacturer: default_manufacturer_weight(),
            slug: default_slug_weight(),
        }
    }
}

fn default_name_weight() -> f64 {
    1.0
}

fn default_aliases_weight() -> f64 {
    0.8
}

fn default_manufacturer_weight() -> f64 {
    0.5
}

fn default_slug_weight() -> f64 {
    0.3
}

/// "Did you mean" suggestions shown when the strict tier finds nothing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Loose matches to show
    #[serde(default = "default_suggestion_limit")]
    pub partial_limit: usize,

    /// Same-manufacturer machines to show
    #[serde(default = "default_suggestion_limit")]
    pub related_limit: usize,

    /// Manufacturer names detected inside a query (substring, case-insensitive)
    #[serde(default = "default_manufacturers")]
    pub manufacturers: Vec<String>,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            partial_limit: default_suggestion_limit(),
            related_limit: default_suggestion_limit(),
            manufacturers: default_manufacturers(),
        }
    }
}

fn default_suggestion_limit() -> usize {
    3
}

fn default_manufacturers() -> Vec<String> {
    vec![
        "Candela", "Cynosure", "Lumenis", "Alma", "Cutera", "Syneron", "Sciton", "Fotona",
        "Quanta", "Asclepion", "Deka", "Lutronic", "InMode", "Venus Concept", "Braun", "Philips",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Search widget behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Trailing debounce delay for typed input, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Route prefix for detail pages, e.g. `equipment` gives `/equipment/<slug>`
    #[serde(default = "default_route_namespace")]
    pub route_namespace: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            route_namespace: default_route_namespace(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    150
}

fn default_route_namespace() -> String {
    "equipment".to_string()
}

/// Logging output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
