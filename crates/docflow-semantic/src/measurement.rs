//! Measurement fact generator (§4.6): a Measurement entity preceded by
//! "must be", "shall be", "minimum", or "maximum" becomes a `HAS_VALUE`
//! fact, subject named after the measurement's unit family.

use crate::sentence::score_fact;
use docflow_core::kinds::EntityKind;
use docflow_core::{CanonicalEntity, Fact, FactKind, Span};
use once_cell::sync::Lazy;
use regex::Regex;

static REQUIREMENT_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(must be|shall be|minimum|maximum)\b").unwrap());

/// Classifies a measurement's unit family from its canonical text so the
/// fact's subject reads as e.g. "Distance Requirement" rather than
/// repeating the raw unit.
fn unit_family(canonical_form: &str) -> &'static str {
    let lower = canonical_form.to_lowercase();
    if lower.ends_with("feet")
        || lower.ends_with("inches")
        || lower.ends_with("meters")
        || lower.ends_with("centimeters")
        || lower.ends_with("millimeters")
    {
        "Distance"
    } else if lower.ends_with("pounds") || lower.ends_with("kilograms") {
        "Weight"
    } else if lower.ends_with("fahrenheit") || lower.ends_with("celsius") {
        "Temperature"
    } else if lower.ends_with("db") || lower.contains("decibel") {
        "Sound_Level"
    } else if lower.ends_with("seconds") || lower.ends_with("minutes") || lower.ends_with("hours") || lower.ends_with("days") {
        "Time"
    } else {
        "Measurement"
    }
}

#[must_use = "returns the measurement facts found in this sentence"]
pub fn generate(sentence_span: Span, sentence: &str, entities: &[&CanonicalEntity]) -> Vec<Fact> {
    let Some(cue) = REQUIREMENT_CUE.find(sentence) else {
        return Vec::new();
    };

    entities
        .iter()
        .filter(|e| e.kind == EntityKind::Measurement)
        .filter_map(|e| {
            let first_span = e.spans.first()?;
            let rel_start = first_span.start.saturating_sub(sentence_span.start);
            if rel_start < cue.start() {
                return None;
            }

            let subject = format!("{} Requirement", unit_family(&e.canonical_form));
            let object = e.canonical_form.clone();
            let confidence = score_fact(sentence, &object, false, true);

            Some(Fact {
                subject,
                predicate: "HAS_VALUE".to_string(),
                object,
                confidence,
                kind: FactKind::Measurement,
                span: sentence_span,
                context: String::new(),
                actionable: false,
            })
        })
        .collect()
}
