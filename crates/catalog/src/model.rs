//! Equipment record model.
//!
//! Records are stored on the wire as a JSON array of objects discriminated by
//! `"type"`. Field names use camelCase.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One catalog entry: a machine or an explanatory technology term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Equipment {
    /// A physical device sold by a manufacturer
    #[serde(rename = "machine")]
    Machine(Machine),
    /// A glossary-style term such as "Diode Laser" or "IPL"
    #[serde(rename = "technology-term")]
    TechnologyTerm(TechnologyTerm),
}

/// Discriminator without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Machine,
    TechnologyTerm,
}

/// Machine variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub manufacturer: String,
    pub technology_type: TechnologyType,
    #[serde(default)]
    pub wavelengths: BTreeSet<String>,
    #[serde(default)]
    pub brand_tier: BrandTier,
    #[serde(default)]
    pub purpose_built: bool,
    #[serde(default)]
    pub cooling_method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Editorial content rendered on the detail page; opaque to search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rich_content: Option<serde_json::Value>,
}

/// Technology-term variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyTerm {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub is_real_laser: bool,
    pub what_it_is: String,
    pub why_it_matters: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask_your_clinic: Option<String>,
}

/// Light source of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnologyType {
    Laser,
    Ipl,
    #[serde(other)]
    Other,
}

/// Editorial classification of a manufacturer's reputation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrandTier {
    PremiumClinical,
    StandardClinical,
    Consumer,
    #[default]
    Unknown,
}

impl TechnologyType {
    pub fn label(self) -> &'static str {
        match self {
            TechnologyType::Laser => "Laser",
            TechnologyType::Ipl => "IPL",
            TechnologyType::Other => "Other",
        }
    }
}

impl BrandTier {
    pub fn label(self) -> &'static str {
        match self {
            BrandTier::PremiumClinical => "Premium clinical",
            BrandTier::StandardClinical => "Standard clinical",
            BrandTier::Consumer => "Consumer",
            BrandTier::Unknown => "Unknown",
        }
    }
}

impl Equipment {
    /// Unique, URL-safe primary key.
    #[inline]
    pub fn slug(&self) -> &str {
        match self {
            Equipment::Machine(m) => &m.slug,
            Equipment::TechnologyTerm(t) => &t.slug,
        }
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Equipment::Machine(m) => &m.name,
            Equipment::TechnologyTerm(t) => &t.name,
        }
    }

    /// Alternate search strings, in editorial order.
    #[inline]
    pub fn aliases(&self) -> &[String] {
        match self {
            Equipment::Machine(m) => &m.aliases,
            Equipment::TechnologyTerm(t) => &t.aliases,
        }
    }

    /// Manufacturer, for machines only.
    #[inline]
    pub fn manufacturer(&self) -> Option<&str> {
        match self {
            Equipment::Machine(m) => Some(&m.manufacturer),
            Equipment::TechnologyTerm(_) => None,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Equipment::Machine(_) => RecordKind::Machine,
            Equipment::TechnologyTerm(_) => RecordKind::TechnologyTerm,
        }
    }

    pub fn as_machine(&self) -> Option<&Machine> {
        match self {
            Equipment::Machine(m) => Some(m),
            Equipment::TechnologyTerm(_) => None,
        }
    }

    pub fn as_technology_term(&self) -> Option<&TechnologyTerm> {
        match self {
            Equipment::Machine(_) => None,
            Equipment::TechnologyTerm(t) => Some(t),
        }
    }
}
