//! Compliance fact generator (§4.6): a regulatory citation co-occurring
//! with a fine or penalty pattern becomes a `RESULTS_IN` fact naming the
//! amount.

use crate::sentence::{mentions_regulation, score_fact};
use docflow_core::{Fact, FactKind, Span};
use once_cell::sync::Lazy;
use regex::Regex;

static PENALTY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(fine|fines|penalty|penalties|result(?:s)? in)\b").unwrap());

#[must_use = "returns the compliance facts found in this sentence"]
pub fn generate(sentence_span: Span, sentence: &str) -> Vec<Fact> {
    if !mentions_regulation(sentence) {
        return Vec::new();
    }
    let Some(m) = PENALTY_RE.find(sentence) else {
        return Vec::new();
    };

    let object = sentence[m.start()..].trim().trim_end_matches('.').to_string();
    if object.is_empty() {
        return Vec::new();
    }

    let confidence = score_fact(sentence, &object, false, true);

    vec![Fact {
        subject: "Violation".to_string(),
        predicate: "RESULTS_IN".to_string(),
        object,
        confidence,
        kind: FactKind::Compliance,
        span: sentence_span,
        context: String::new(),
        actionable: true,
    }]
}
