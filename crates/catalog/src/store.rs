//! Immutable catalog store.

use crate::error::{CatalogError, Result};
use crate::model::{Equipment, Machine, TechnologyTerm};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid"));

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a loaded catalog.
///
/// Two catalogs with identical contents still have different ids; derived
/// indexes are cached per id, not per content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogId(u64);

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "catalog#{}", self.0)
    }
}

/// Read-only collection of equipment records.
///
/// Cloning is cheap and preserves identity.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<Inner>,
}

struct Inner {
    id: CatalogId,
    records: Vec<Arc<Equipment>>,
    by_slug: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("id", &self.inner.id)
            .field("len", &self.inner.records.len())
            .finish()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl Catalog {
    /// Validate and freeze a set of records, keeping their order.
    ///
    /// # Errors
    ///
    /// Fails on an empty name, a slug that is not URL-safe, a duplicate slug,
    /// or an alias that would resolve to more than one record.
    pub fn new(records: Vec<Equipment>) -> Result<Self> {
        let mut by_slug = HashMap::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            let slug = record.slug();
            if !SLUG_PATTERN.is_match(slug) {
                return Err(CatalogError::InvalidSlug(slug.to_string()));
            }
            if record.name().trim().is_empty() {
                return Err(CatalogError::EmptyName(slug.to_string()));
            }
            if by_slug.insert(slug.to_string(), idx).is_some() {
                return Err(CatalogError::DuplicateSlug(slug.to_string()));
            }
        }

        let mut by_alias: HashMap<String, usize> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            for alias in record.aliases() {
                let key = normalize_key(alias);
                if key.is_empty() || key == record.slug() {
                    continue;
                }
                let clash = by_slug
                    .get(&key)
                    .or_else(|| by_alias.get(&key))
                    .copied()
                    .filter(|&other| other != idx);
                if let Some(other) = clash {
                    return Err(CatalogError::AmbiguousAlias {
                        alias: alias.clone(),
                        slug: record.slug().to_string(),
                        other: records[other].slug().to_string(),
                    });
                }
                by_alias.insert(key, idx);
            }
        }

        let id = CatalogId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, records = records.len(), aliases = by_alias.len(), "Catalog frozen");

        Ok(Self {
            inner: Arc::new(Inner {
                id,
                records: records.into_iter().map(Arc::new).collect(),
                by_slug,
                by_alias,
            }),
        })
    }

    /// A catalog with no records.
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(Inner {
                id: CatalogId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
                records: Vec::new(),
                by_slug: HashMap::new(),
                by_alias: HashMap::new(),
            }),
        }
    }

    #[inline]
    pub fn id(&self) -> CatalogId {
        self.inner.id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }

    /// All records in catalog order.
    #[inline]
    pub fn records(&self) -> &[Arc<Equipment>] {
        &self.inner.records
    }

    /// Exact slug lookup.
    pub fn get(&self, slug: &str) -> Option<&Arc<Equipment>> {
        self.inner.by_slug.get(slug).map(|&idx| &self.inner.records[idx])
    }

    /// Resolve a slug or alias (case-insensitive) to its canonical record.
    pub fn resolve(&self, slug_or_alias: &str) -> Option<&Arc<Equipment>> {
        let key = normalize_key(slug_or_alias);
        self.inner
            .by_slug
            .get(&key)
            .or_else(|| self.inner.by_alias.get(&key))
            .map(|&idx| &self.inner.records[idx])
    }

    pub fn machines(&self) -> impl Iterator<Item = &Machine> {
        self.inner.records.iter().filter_map(|r| r.as_machine())
    }

    pub fn technology_terms(&self) -> impl Iterator<Item = &TechnologyTerm> {
        self.inner.records.iter().filter_map(|r| r.as_technology_term())
    }

    /// Machines from one manufacturer (case-insensitive), in catalog order.
    ///
    /// `exclude` drops the record currently being viewed, if any.
    pub fn by_manufacturer(
        &self,
        manufacturer: &str,
        exclude: Option<&str>,
        limit: usize,
    ) -> Vec<Arc<Equipment>> {
        let needle = manufacturer.to_lowercase();
        self.inner
            .records
            .iter()
            .filter(|r| r.manufacturer().is_some_and(|m| m.to_lowercase() == needle))
            .filter(|r| exclude != Some(r.slug()))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Distinct manufacturer names in first-seen order.
    pub fn manufacturers(&self) -> Vec<&str> {
        let mut seen = Vec::<String>::new();
        let mut names = Vec::new();
        for machine in self.machines() {
            let key = machine.manufacturer.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                names.push(machine.manufacturer.as_str());
            }
        }
        names
    }
}

fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BrandTier, TechnologyType};

    fn machine(slug: &str, name: &str, manufacturer: &str, aliases: &[&str]) -> Equipment {
        Equipment::Machine(Machine {
            slug: slug.to_string(),
            name: name.to_string(),
            aliases: aliases.iter().map(ToString::to_string).collect(),
            manufacturer: manufacturer.to_string(),
            technology_type: TechnologyType::Laser,
            wavelengths: Default::default(),
            brand_tier: BrandTier::Unknown,
            purpose_built: true,
            cooling_method: None,
            notes: None,
            rich_content: None,
        })
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            machine("gentlemax-pro", "GentleMax Pro", "Candela", &["gentle max pro"]),
            machine("gentlelase-pro", "GentleLase Pro", "Candela", &[]),
            machine("elite-iq", "Elite iQ", "Cynosure", &[]),
            machine("vbeam-perfecta", "Vbeam Perfecta", "candela", &[]),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_and_resolve() {
        let catalog = sample();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get("elite-iq").unwrap().name(), "Elite iQ");
        assert!(catalog.get("Elite-IQ").is_none());
        assert_eq!(catalog.resolve("Elite-IQ").unwrap().slug(), "elite-iq");
        assert_eq!(catalog.resolve("  Gentle Max Pro ").unwrap().slug(), "gentlemax-pro");
        assert!(catalog.resolve("unknown").is_none());
    }

    #[test]
    fn test_identity_survives_clone() {
        let a = sample();
        let b = a.clone();
        let c = sample();
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_ne!(Catalog::empty().id(), Catalog::empty().id());
    }

    #[test]
    fn test_by_manufacturer() {
        let catalog = sample();
        let slugs: Vec<_> = catalog
            .by_manufacturer("CANDELA", None, 3)
            .iter()
            .map(|r| r.slug().to_string())
            .collect();
        assert_eq!(slugs, ["gentlemax-pro", "gentlelase-pro", "vbeam-perfecta"]);

        let excluded = catalog.by_manufacturer("Candela", Some("gentlemax-pro"), 1);
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].slug(), "gentlelase-pro");

        assert!(catalog.by_manufacturer("Lumenis", None, 3).is_empty());
    }

    #[test]
    fn test_manufacturers_are_distinct() {
        assert_eq!(sample().manufacturers(), ["Candela", "Cynosure"]);
    }

    #[test]
    fn test_rejects_duplicate_slug() {
        let err = Catalog::new(vec![
            machine("a", "A", "X", &[]),
            machine("a", "A2", "X", &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug(ref s) if s == "a"));
    }

    #[test]
    fn test_rejects_invalid_slug() {
        for slug in ["", "Upper", "two words", "trailing-", "double--hyphen"] {
            let err = Catalog::new(vec![machine(slug, "Name", "X", &[])]).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidSlug(_)), "{slug:?} accepted");
        }
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = Catalog::new(vec![machine("a", "  ", "X", &[])]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyName(_)));
    }

    #[test]
    fn test_rejects_alias_matching_other_slug() {
        let err = Catalog::new(vec![
            machine("splendor-x", "Splendor X", "Lumenis", &[]),
            machine("other", "Other", "Lumenis", &["Splendor-X"]),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::AmbiguousAlias { ref other, .. } if other == "splendor-x"
        ));
    }

    #[test]
    fn test_rejects_alias_shared_by_two_records() {
        let err = Catalog::new(vec![
            machine("a", "A", "X", &["shared"]),
            machine("b", "B", "X", &["SHARED"]),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::AmbiguousAlias { .. }));
    }

    #[test]
    fn test_alias_equal_to_own_slug_is_fine() {
        let catalog =
            Catalog::new(vec![machine("m22", "M22", "Lumenis", &["m22", "M22"])]).unwrap();
        assert_eq!(catalog.resolve("M22").unwrap().slug(), "m22");
    }
}
