//! Error types for the catalog crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("Catalog JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Slug is empty or not URL-safe
    #[error("Invalid slug `{0}`: use lowercase letters, digits and single hyphens")]
    InvalidSlug(String),

    /// Record has an empty display name
    #[error("Record `{0}` has an empty name")]
    EmptyName(String),

    /// Two records share a slug
    #[error("Duplicate slug `{0}`")]
    DuplicateSlug(String),

    /// An alias does not resolve to exactly one record
    #[error("Alias `{alias}` on `{slug}` conflicts with `{other}`")]
    AmbiguousAlias {
        alias: String,
        slug: String,
        other: String,
    },
}

/// Error code for integration with laserlookup-core error handling.
/// Range: 11xxx for catalog errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorCode {
    /// Catalog file unreadable
    Io = 11001,
    /// JSON parsing error
    JsonParsing = 11002,
    /// Invalid slug
    InvalidSlug = 11003,
    /// Empty name
    EmptyName = 11004,
    /// Duplicate slug
    DuplicateSlug = 11005,
    /// Ambiguous alias
    AmbiguousAlias = 11006,
}

impl CatalogError {
    /// Returns the error code for this error.
    pub fn code(&self) -> CatalogErrorCode {
        match self {
            CatalogError::Io { .. } => CatalogErrorCode::Io,
            CatalogError::Json(_) => CatalogErrorCode::JsonParsing,
            CatalogError::InvalidSlug(_) => CatalogErrorCode::InvalidSlug,
            CatalogError::EmptyName(_) => CatalogErrorCode::EmptyName,
            CatalogError::DuplicateSlug(_) => CatalogErrorCode::DuplicateSlug,
            CatalogError::AmbiguousAlias { .. } => CatalogErrorCode::AmbiguousAlias,
        }
    }

    /// Whether the data file itself is at fault, as opposed to the environment.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, CatalogError::Io { .. })
    }
}
