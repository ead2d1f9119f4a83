//! Search results as terminal lines
//!
//! One line per navigable entry, in dropdown order, so line `i` is the entry
//! an active index of `i` points at.

use laserlookup_catalog::Equipment;
use laserlookup_search::highlight::segments;
use laserlookup_search::{SearchField, SearchMatch, SearchOutcome, Suggestion, SuggestionTag};
use owo_colors::OwoColorize;
use std::ops::Range;

const ACTIVE_MARKER: &str = "❯ ";
const INACTIVE_MARKER: &str = "  ";

/// Line formatter with colors switched on or off.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// Create a renderer
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// `text` with the char `ranges` emphasised
    pub fn highlight(&self, text: &str, ranges: &[Range<usize>]) -> String {
        if !self.color {
            return text.to_string();
        }
        segments(text, ranges)
            .into_iter()
            .map(|segment| {
                if segment.highlighted {
                    segment.text.bold().underline().to_string()
                } else {
                    segment.text.to_string()
                }
            })
            .collect()
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// A strict result: name, then manufacturer and slug.
    ///
    /// When the name itself did not match, the alias that did is shown.
    pub fn result_line(&self, hit: &SearchMatch) -> String {
        let record = &hit.record;
        let name = match hit.field(SearchField::Name) {
            Some(m) => self.highlight(&m.value, &m.ranges),
            None => record.name().to_string(),
        };

        let mut line = name;
        let alias_only = (hit.field(SearchField::Name), hit.field(SearchField::Aliases));
        if let (None, Some(alias)) = alias_only {
            line.push_str(&format!(" ({})", self.highlight(&alias.value, &alias.ranges)));
        }
        if let Some(manufacturer) = record.manufacturer() {
            let text = match hit.field(SearchField::Manufacturer) {
                Some(m) => self.highlight(&m.value, &m.ranges),
                None => manufacturer.to_string(),
            };
            line.push_str("  ");
            line.push_str(&text);
        }
        line.push_str("  ");
        line.push_str(&self.dim(record.slug()));
        line
    }

    /// A suggestion, labelled with its group.
    pub fn suggestion_line(&self, suggestion: &Suggestion) -> String {
        let tag = match suggestion.tag {
            SuggestionTag::Partial => "did you mean",
            SuggestionTag::Related => "related",
        };
        let mut line = format!("{}  {}", self.dim(&format!("[{tag}]")), suggestion.name);
        if let Some(manufacturer) = &suggestion.manufacturer {
            line.push_str("  ");
            line.push_str(manufacturer);
        }
        line
    }

    /// The synthetic last entry of a suggestion list.
    pub fn browse_all_line(&self) -> String {
        self.dim("Browse all equipment →")
    }

    /// Every navigable entry of `outcome`, marking the active one.
    pub fn outcome_lines(&self, outcome: &SearchOutcome, active: Option<usize>) -> Vec<String> {
        let lines: Vec<String> = match outcome {
            SearchOutcome::Idle => Vec::new(),
            SearchOutcome::Results(results) => {
                results.iter().map(|hit| self.result_line(hit)).collect()
            }
            SearchOutcome::Suggestions(suggestions) => suggestions
                .iter()
                .map(|s| self.suggestion_line(s))
                .chain(std::iter::once(self.browse_all_line()))
                .collect(),
        };

        lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| {
                if active == Some(idx) {
                    format!("{ACTIVE_MARKER}{line}")
                } else {
                    format!("{INACTIVE_MARKER}{line}")
                }
            })
            .collect()
    }

    /// Label/value pairs for a record's detail view.
    pub fn record_details(&self, record: &Equipment) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Name", record.name().to_string()),
            ("Slug", record.slug().to_string()),
        ];
        if !record.aliases().is_empty() {
            rows.push(("Aliases", record.aliases().join(", ")));
        }

        match record {
            Equipment::Machine(machine) => {
                rows.push(("Manufacturer", machine.manufacturer.clone()));
                rows.push(("Technology", machine.technology_type.label().to_string()));
                if !machine.wavelengths.is_empty() {
                    let wavelengths: Vec<&str> =
                        machine.wavelengths.iter().map(String::as_str).collect();
                    rows.push(("Wavelengths", wavelengths.join(", ")));
                }
                rows.push(("Brand tier", machine.brand_tier.label().to_string()));
                rows.push(("Purpose-built", yes_no(machine.purpose_built)));
                if let Some(cooling) = &machine.cooling_method {
                    rows.push(("Cooling", cooling.clone()));
                }
                if let Some(notes) = &machine.notes {
                    rows.push(("Notes", notes.clone()));
                }
            }
            Equipment::TechnologyTerm(term) => {
                rows.push(("Real laser", yes_no(term.is_real_laser)));
                rows.push(("What it is", term.what_it_is.clone()));
                rows.push(("Why it matters", term.why_it_matters.clone()));
                if let Some(ask) = &term.ask_your_clinic {
                    rows.push(("Ask your clinic", ask.clone()));
                }
            }
        }
        rows
    }
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use laserlookup_catalog::Catalog;
    use laserlookup_search::{SearchEngine, SearchSettings};

    fn engine() -> SearchEngine {
        let catalog = Catalog::from_json_str(
            r#"[
            {"type": "machine", "slug": "gentlemax-pro", "name": "GentleMax Pro",
             "aliases": ["gentle max pro"], "manufacturer": "Candela",
             "technologyType": "laser", "wavelengths": ["755nm", "1064nm"],
             "brandTier": "premium-clinical", "purposeBuilt": true},
            {"type": "technology-term", "slug": "diode-laser", "name": "Diode Laser",
             "aliases": ["diode"], "isRealLaser": true,
             "whatItIs": "A semiconductor laser.", "whyItMatters": "Common for hair removal."}
        ]"#,
        )
        .unwrap();
        let settings = SearchSettings::default();
        SearchEngine::new(&catalog, &mut settings.cache(), &settings)
    }

    #[test]
    fn test_plain_result_line() {
        let outcome = engine().lookup("gentlemax", None);
        let SearchOutcome::Results(results) = &outcome else {
            panic!("expected results");
        };
        let line = Renderer::new(false).result_line(&results[0]);
        assert_eq!(line, "GentleMax Pro  Candela  gentlemax-pro");
    }

    #[test]
    fn test_colored_highlight() {
        let highlighted = Renderer::new(true).highlight("GentleMax Pro", &[0..7]);
        assert!(highlighted.contains("\u{1b}["));
        assert!(highlighted.ends_with("ax Pro"));
        assert_eq!(Renderer::new(false).highlight("GentleMax Pro", &[0..7]), "GentleMax Pro");
    }

    #[test]
    fn test_outcome_lines_mark_active_and_browse_all() {
        let outcome = engine().lookup("gentlemx pro", None);
        let lines = Renderer::new(false).outcome_lines(&outcome, Some(1));
        assert_eq!(lines.len(), outcome.item_count());
        assert_eq!(lines[0], "  [did you mean]  GentleMax Pro  Candela");
        assert_eq!(lines[1], "❯ Browse all equipment →");
    }

    #[test]
    fn test_idle_renders_nothing() {
        assert!(Renderer::new(false).outcome_lines(&SearchOutcome::Idle, None).is_empty());
    }

    #[test]
    fn test_record_details() {
        let engine = engine();
        let renderer = Renderer::new(false);

        let machine = renderer.record_details(engine.catalog().get("gentlemax-pro").unwrap());
        assert!(machine.contains(&("Manufacturer", "Candela".to_string())));
        assert!(machine.contains(&("Wavelengths", "1064nm, 755nm".to_string())));
        assert!(machine.contains(&("Brand tier", "Premium clinical".to_string())));

        let term = renderer.record_details(engine.catalog().get("diode-laser").unwrap());
        assert!(term.contains(&("Real laser", "yes".to_string())));
        assert!(term.iter().all(|(label, _)| *label != "Manufacturer"));
    }
}
