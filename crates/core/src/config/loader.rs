//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use crate::validation::{ValidationReport, Validator};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

impl Config {
    /// Load configuration from a file path or use defaults.
    ///
    /// An explicit path must exist. Without one, the standard locations are
    /// searched and defaults are used when none is present. The loaded
    /// configuration is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed, or when
    /// validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        let config = Self {
            schema,
            path: config_path,
        };
        config
            .validate()
            .into_result()
            .with_suggestion("Fix the listed keys, or remove them to fall back to the defaults")?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error when the document does not parse or fails validation.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = Self {
            schema: toml::from_str(content)?,
            path: None,
        };
        config.validate().into_result()?;
        Ok(config)
    }

    /// Check every tunable for values the search core cannot honour
    pub fn validate(&self) -> ValidationReport {
        let search = &self.schema.search;
        let suggest = &self.schema.suggest;
        Validator::new()
            .range("search.strict_threshold", search.strict_threshold, 0.0, 1.0)
            .range("search.loose_threshold", search.loose_threshold, 0.0, 1.0)
            .positive("search.strict_limit", search.strict_limit as u64)
            .positive("search.loose_limit", search.loose_limit as u64)
            .positive("search.min_match_len", search.min_match_len as u64)
            .weight("search.weights.name", search.weights.name)
            .weight("search.weights.aliases", search.weights.aliases)
            .weight("search.weights.manufacturer", search.weights.manufacturer)
            .weight("search.weights.slug", search.weights.slug)
            .positive("widget.debounce_ms", self.schema.widget.debounce_ms)
            .warn_if(
                search.loose_threshold < search.strict_threshold,
                "search.loose_threshold",
                "looser than strict threshold; suggestions will rarely appear",
            )
            .warn_if(
                suggest.manufacturers.is_empty(),
                "suggest.manufacturers",
                "empty list disables related-by-manufacturer suggestions",
            )
            .finish()
    }

    /// Catalog path, resolved relative to the config file's directory
    pub fn catalog_path(&self) -> PathBuf {
        let raw = Path::new(&self.schema.catalog.path);
        match self.path.as_deref().and_then(Path::parent) {
            Some(dir) if raw.is_relative() => dir.join(raw),
            _ => raw.to_path_buf(),
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let local = [".laserlookup.toml", "laserlookup.toml"]
        .into_iter()
        .map(PathBuf::from);
    let user = dirs::config_dir().map(|dir| dir.join("laserlookup").join("config.toml"));

    local.chain(user).find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorCode::ConfigError,
            format!("Failed to read config file {}: {e}", path.display()),
        )
        .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {e}", path.display()),
        )
        .with_source(e)
    })
}
