//! Normalization keys (§4.5): the grouping key two mentions must share to
//! become aliases of the same canonical entity.

use docflow_core::kinds::EntityKind;
use once_cell::sync::Lazy;
use regex::Regex;

const ORG_SUFFIXES: [&str; 8] = [
    "inc",
    "llc",
    "ltd",
    "corp",
    "corporation",
    "co",
    "company",
    "plc",
];
const TITLE_PREFIXES: [&str; 5] = ["mr", "mrs", "ms", "dr", "professor"];
const NAME_SUFFIXES: [&str; 7] = ["jr", "sr", "ii", "iii", "iv", "phd", "md"];

static MEASUREMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*([\d,]+(?:\.\d+)?)\s*([a-zA-Z°%]+)\s*$").unwrap());

/// Compute the grouping key for `text` under `kind`. Two mentions of the
/// same kind normalize to the same canonical entity iff their keys match.
#[must_use = "returns the normalization key, does not mutate anything"]
pub fn normalization_key(kind: &EntityKind, text: &str) -> String {
    match kind {
        EntityKind::Org => org_key(text),
        EntityKind::Person => person_key(text),
        EntityKind::Measurement => measurement_key(text).unwrap_or_else(|| default_key(text)),
        _ => default_key(text),
    }
}

fn default_key(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn org_key(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut tokens: Vec<&str> = lower.split_whitespace().collect();
    if let Some(last) = tokens.last() {
        let normalized = last.trim_end_matches(['.', ',']);
        if ORG_SUFFIXES.contains(&normalized) {
            tokens.pop();
        }
    }
    tokens.join(" ").trim_end_matches(',').trim().to_string()
}

fn strip_person_title_and_suffix(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut tokens: Vec<&str> = lower.split_whitespace().collect();
    if let Some(first) = tokens.first() {
        let normalized = first.trim_end_matches('.');
        if TITLE_PREFIXES.contains(&normalized) {
            tokens.remove(0);
        }
    }
    if let Some(last) = tokens.last() {
        let normalized = last.trim_end_matches(['.', ',']);
        if NAME_SUFFIXES.contains(&normalized) {
            tokens.pop();
        }
    }
    tokens.join(" ")
}

/// `(first, last)` lowercased, title/suffix stripped; single-token names use
/// the same token for both halves so they still cluster with themselves.
fn person_key(text: &str) -> String {
    let cleaned = strip_person_title_and_suffix(text);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    match tokens.as_slice() {
        [] => String::new(),
        [single] => format!("{single}|{single}"),
        [first, .., last] => format!("{first}|{last}"),
    }
}

fn canonical_unit(unit: &str) -> String {
    match unit {
        "ft" | "feet" | "foot" => "feet",
        "in" | "inch" | "inches" => "inches",
        "lb" | "lbs" | "pound" | "pounds" => "pounds",
        "kg" | "kgs" | "kilogram" | "kilograms" => "kilograms",
        "m" | "meter" | "meters" | "metre" | "metres" => "meters",
        "cm" | "centimeter" | "centimeters" => "centimeters",
        "mm" | "millimeter" | "millimeters" => "millimeters",
        "%" | "percent" | "pct" => "percent",
        "f" | "fahrenheit" => "fahrenheit",
        "c" | "celsius" => "celsius",
        other => other,
    }
    .to_string()
}

fn measurement_key(text: &str) -> Option<String> {
    let caps = MEASUREMENT_RE.captures(text)?;
    let raw_value = caps.get(1)?.as_str().replace(',', "");
    let value: f64 = raw_value.parse().ok()?;
    let unit = canonical_unit(&caps.get(2)?.as_str().to_lowercase());
    Some(format!("{value}:{unit}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_key_strips_suffix() {
        assert_eq!(org_key("Acme Inc."), org_key("Acme"));
        assert_eq!(org_key("Acme, LLC"), org_key("Acme"));
    }

    #[test]
    fn test_person_key_strips_title_and_suffix() {
        assert_eq!(
            normalization_key(&EntityKind::Person, "Dr. John Smith"),
            normalization_key(&EntityKind::Person, "John Smith Jr.")
        );
    }

    #[test]
    fn test_person_key_single_token() {
        assert_eq!(person_key("John"), "john|john");
    }

    #[test]
    fn test_measurement_key_unifies_unit_spelling() {
        assert_eq!(
            normalization_key(&EntityKind::Measurement, "12 ft"),
            normalization_key(&EntityKind::Measurement, "12 feet")
        );
    }

    #[test]
    fn test_measurement_key_distinguishes_values() {
        assert_ne!(
            normalization_key(&EntityKind::Measurement, "12 ft"),
            normalization_key(&EntityKind::Measurement, "13 ft")
        );
    }

    #[test]
    fn test_default_key_case_and_whitespace_insensitive() {
        assert_eq!(
            normalization_key(&EntityKind::Date, "  March   2024"),
            normalization_key(&EntityKind::Date, "march 2024")
        );
    }
}
