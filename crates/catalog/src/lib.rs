//! Equipment catalog for laserlookup.
//!
//! This crate provides:
//! - The equipment record model (machines and technology terms)
//! - JSON loading with validation of slugs and aliases
//! - An immutable, cheaply cloned [`Catalog`] with a stable identity
//!
//! # Example
//!
//! ```no_run
//! use laserlookup_catalog::Catalog;
//!
//! let catalog = Catalog::from_path("data/equipment.json").unwrap();
//! let record = catalog.resolve("gentle max pro").unwrap();
//! assert_eq!(record.slug(), "gentlemax-pro");
//! ```

mod error;
mod loader;
pub mod model;
mod store;

pub use error::{CatalogError, CatalogErrorCode, Result};
pub use model::{BrandTier, Equipment, Machine, RecordKind, TechnologyTerm, TechnologyType};
pub use store::{Catalog, CatalogId};
