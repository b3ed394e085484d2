//! The regex pattern catalog for stage 4's pattern recognizer (§4.4.2).
//!
//! Every pattern compiles through the `regex` crate, which guarantees
//! linear-time matching via a Thompson-NFA/pike-VM execution engine and has
//! no lookahead/lookbehind support at all — so a pattern that would need
//! catastrophic backtracking simply fails to compile here, which this
//! module treats as a pool-startup [`DocFlowError::Fatal`], never a
//! per-document warning.

use docflow_core::kinds::EntityKind;
use docflow_core::{DocFlowError, Mention, Span};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

/// One entry of the pattern catalog, as loaded from a TOML file or the
/// built-in defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternSpec {
    pub name: String,
    pub kind: String,
    pub regex: String,
    #[serde(default)]
    pub ignore_case: bool,
}

/// A TOML catalog file: `[[pattern]]` tables, one per entry.
#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    #[serde(rename = "pattern", default)]
    patterns: Vec<PatternSpec>,
}

/// Compiled regex patterns, keyed by name, plus which [`EntityKind`] each
/// pattern produces.
pub struct PatternCatalog {
    compiled: HashMap<String, (Regex, EntityKind)>,
}

impl PatternCatalog {
    /// Compile a list of pattern specs. Fails fast (Fatal) on the first
    /// pattern that doesn't compile, per §6/§7 ("patterns failing the
    /// no-backtracking constraint cause pool-startup failure").
    ///
    /// # Errors
    /// Returns [`DocFlowError::Fatal`] if any pattern fails to compile, or
    /// if it uses a construct the underlying engine rejects (e.g. an
    /// attempted lookahead, which `regex` has no syntax for and reports as
    /// a parse error).
    pub fn build(specs: &[PatternSpec]) -> Result<Self, DocFlowError> {
        let mut compiled = HashMap::with_capacity(specs.len());
        for spec in specs {
            let pattern_source = if spec.ignore_case {
                format!("(?i){}", spec.regex)
            } else {
                spec.regex.clone()
            };
            let regex = Regex::new(&pattern_source).map_err(|e| {
                DocFlowError::Fatal(format!(
                    "pattern '{}' failed to compile to a finite automaton: {e}",
                    spec.name
                ))
            })?;
            let kind: EntityKind = spec.kind.parse().unwrap_or(EntityKind::Other(spec.kind.clone()));
            compiled.insert(spec.name.clone(), (regex, kind));
        }
        Ok(Self { compiled })
    }

    /// Load a catalog from a TOML file, falling back to the built-in
    /// defaults for any pattern name not present in the file.
    ///
    /// # Errors
    /// Returns [`DocFlowError::Fatal`] if the file can't be read/parsed, or
    /// if any pattern (file-provided or default) fails to compile.
    pub fn load(path: &std::path::Path) -> Result<Self, DocFlowError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DocFlowError::Fatal(format!("pattern catalog unreadable: {e}")))?;
        let file: CatalogFile = toml::from_str(&contents)
            .map_err(|e| DocFlowError::Fatal(format!("pattern catalog malformed: {e}")))?;
        Self::build(&file.patterns)
    }

    /// Scan `text` (original case, not lowercased — patterns like EMAIL and
    /// URL are case-sensitive) with every compiled pattern, returning
    /// mentions tagged with each pattern's kind.
    #[must_use = "returns the mentions found, does not mutate the catalog"]
    pub fn scan_all(&self, text: &str) -> Vec<Mention> {
        let mut mentions = Vec::new();
        for (name, (regex, kind)) in &self.compiled {
            for m in regex.find_iter(text) {
                let mut mention =
                    Mention::new(Span::new(m.start(), m.end()), m.as_str(), kind.clone());
                mention.evidence.push(name.clone());
                mentions.push(mention);
            }
        }
        mentions
    }

    #[must_use = "returns whether a pattern with this name is compiled"]
    pub fn contains(&self, name: &str) -> bool {
        self.compiled.contains_key(name)
    }
}

/// The fixed built-in catalog (§4.4.2): MONEY, DATE, TIME, PHONE, EMAIL,
/// URL, MEASUREMENT, REGULATION, PERCENTAGE.
#[must_use = "returns the built-in pattern specs, does not mutate any catalog"]
pub fn default_patterns() -> Vec<PatternSpec> {
    vec![
        PatternSpec {
            name: "MONEY".to_string(),
            kind: "MONEY".to_string(),
            regex: r"\$\s?\d{1,3}(?:,\d{3})*(?:\.\d{2})?".to_string(),
            ignore_case: false,
        },
        PatternSpec {
            name: "DATE".to_string(),
            kind: "DATE".to_string(),
            regex: r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s+\d{4}\b|\b\d{1,2}/\d{1,2}/\d{2,4}\b".to_string(),
            ignore_case: false,
        },
        PatternSpec {
            name: "TIME".to_string(),
            kind: "TIME".to_string(),
            regex: r"\b\d{1,2}:\d{2}(?::\d{2})?\s?(?:[AaPp][Mm])?\b".to_string(),
            ignore_case: false,
        },
        PatternSpec {
            name: "PHONE".to_string(),
            kind: "PHONE".to_string(),
            regex: r"\b\(?\d{3}\)?[-.\s]\d{3}[-.\s]\d{4}\b".to_string(),
            ignore_case: false,
        },
        PatternSpec {
            name: "EMAIL".to_string(),
            kind: "EMAIL".to_string(),
            regex: r"\b[\w.+-]+@[\w-]+\.[\w.-]+\b".to_string(),
            ignore_case: false,
        },
        PatternSpec {
            name: "URL".to_string(),
            kind: "URL".to_string(),
            regex: r"\bhttps?://[^\s<>\)]+".to_string(),
            ignore_case: false,
        },
        PatternSpec {
            name: "MEASUREMENT".to_string(),
            kind: "MEASUREMENT".to_string(),
            regex: r"\b\d+(?:\.\d+)?\s?(?:feet|foot|ft|inches|inch|in|lbs|pounds|kg|kilograms|meters|metres|m|seconds|sec|minutes|min|db|decibels|degrees|fahrenheit|celsius)\b".to_string(),
            ignore_case: true,
        },
        PatternSpec {
            name: "REGULATION".to_string(),
            kind: "REGULATION".to_string(),
            regex: r"\b\d{1,2}\s?CFR\s?\d{3,4}(?:\.\d+)?\b|\bOSHA\s?\d{3,4}(?:\.\d+)?\b".to_string(),
            ignore_case: true,
        },
        PatternSpec {
            name: "PERCENTAGE".to_string(),
            kind: "PERCENTAGE".to_string(),
            regex: r"\b\d+(?:\.\d+)?\s?%".to_string(),
            ignore_case: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_compile() {
        let catalog = PatternCatalog::build(&default_patterns()).unwrap();
        assert!(catalog.contains("MONEY"));
        assert!(catalog.contains("REGULATION"));
    }

    #[test]
    fn test_money_pattern_matches() {
        let catalog = PatternCatalog::build(&default_patterns()).unwrap();
        let mentions = catalog.scan_all("The fine was $145,000 for the violation.");
        assert!(mentions.iter().any(|m| m.text == "$145,000"));
    }

    #[test]
    fn test_regulation_pattern_matches_cfr_and_osha() {
        let catalog = PatternCatalog::build(&default_patterns()).unwrap();
        let mentions = catalog.scan_all("See 29 CFR 1926.95 and OSHA 1910.147 for details.");
        assert!(mentions.iter().any(|m| m.text.contains("1926.95")));
        assert!(mentions.iter().any(|m| m.text.to_uppercase().contains("1910.147")));
    }

    #[test]
    fn test_measurement_pattern_case_insensitive() {
        let catalog = PatternCatalog::build(&default_patterns()).unwrap();
        let mentions = catalog.scan_all("Maintain a clearance of 6 Feet at all times.");
        assert!(mentions.iter().any(|m| m.text.to_lowercase().contains("6 feet")));
    }

    #[test]
    fn test_invalid_pattern_is_fatal_not_panicking() {
        let bad = vec![PatternSpec {
            name: "BROKEN".to_string(),
            kind: "MONEY".to_string(),
            regex: "(unclosed".to_string(),
            ignore_case: false,
        }];
        let result = PatternCatalog::build(&bad);
        assert!(matches!(result, Err(DocFlowError::Fatal(_))));
    }
}
