//! Catalog loading from JSON.
//!
//! The data file is a JSON array of [`Equipment`] records.

use crate::error::{CatalogError, Result};
use crate::model::Equipment;
use crate::store::Catalog;
use std::io::Read;
use std::path::Path;

impl Catalog {
    /// Parse and validate a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for malformed input and the validation
    /// errors of [`Catalog::new`].
    ///
    /// # Example
    /// ```
    /// use laserlookup_catalog::Catalog;
    ///
    /// let catalog = Catalog::from_json_str(r#"[
    ///     {"type": "technology-term", "slug": "diode-laser", "name": "Diode Laser",
    ///      "isRealLaser": true, "whatItIs": "...", "whyItMatters": "..."}
    /// ]"#).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<Equipment> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Parse and validate a catalog from any reader.
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::from_json_str`].
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let records: Vec<Equipment> = serde_json::from_reader(reader)?;
        Self::new(records)
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] when the file cannot be opened, otherwise
    /// the errors of [`Catalog::from_reader`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::info!(path = %path.display(), records = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogErrorCode;
    use std::io::Write;

    const TWO_RECORDS: &str = r#"[
        {"type": "machine", "slug": "splendor-x", "name": "Splendor X",
         "manufacturer": "Lumenis", "technologyType": "laser"},
        {"type": "technology-term", "slug": "ipl", "name": "Intense Pulsed Light",
         "aliases": ["IPL"], "isRealLaser": false, "whatItIs": "...", "whyItMatters": "..."}
    ]"#;

    #[test]
    fn test_from_json_str() {
        let catalog = Catalog::from_json_str(TWO_RECORDS).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.machines().count(), 1);
        assert_eq!(catalog.technology_terms().count(), 1);
    }

    #[test]
    fn test_empty_array_is_empty_catalog() {
        let catalog = Catalog::from_json_str("[]").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = Catalog::from_json_str(r#"{"not": "an array"}"#).unwrap_err();
        assert_eq!(err.code(), CatalogErrorCode::JsonParsing);
        assert!(err.is_data_error());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_RECORDS.as_bytes()).unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.resolve("ipl").unwrap().name(), "Intense Pulsed Light");
    }

    #[test]
    fn test_from_missing_path() {
        let err = Catalog::from_path("/no/such/catalog.json").unwrap_err();
        assert_eq!(err.code(), CatalogErrorCode::Io);
        assert!(!err.is_data_error());
    }
}
