//! Requirement fact generator (§4.6): a sentence naming a stakeholder
//! role (employee, worker, employer, contractor, ...) alongside a modal
//! obligation ("must", "shall", "is required to", or an active
//! "requires ... to") becomes a `MUST_COMPLY_WITH` fact.

use crate::sentence::score_fact;
use docflow_core::{Fact, FactKind, Span};
use once_cell::sync::Lazy;
use regex::Regex;

const ROLE_WORDS: [&str; 11] = [
    "employee",
    "employees",
    "worker",
    "workers",
    "employer",
    "employers",
    "contractor",
    "contractors",
    "personnel",
    "visitor",
    "visitors",
];

static MODAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(must|shall|is required to|are required to|requires)\b").unwrap());

fn find_role(sentence: &str) -> Option<&'static str> {
    let lower = sentence.to_lowercase();
    ROLE_WORDS
        .iter()
        .find(|word| {
            lower
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == **word)
        })
        .copied()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[must_use = "returns the requirement facts found in this sentence"]
pub fn generate(sentence_span: Span, sentence: &str) -> Vec<Fact> {
    let Some(role) = find_role(sentence) else {
        return Vec::new();
    };
    let Some(m) = MODAL_RE.find(sentence) else {
        return Vec::new();
    };

    let object = sentence[m.end()..].trim().trim_end_matches('.').to_string();
    if object.is_empty() {
        return Vec::new();
    }

    let modal = m.as_str().to_lowercase();
    let strong_modal = modal == "shall" || modal == "is required to" || modal == "are required to";
    let confidence = score_fact(sentence, &object, strong_modal, true);

    vec![Fact {
        subject: capitalize(role),
        predicate: "MUST_COMPLY_WITH".to_string(),
        object,
        confidence,
        kind: FactKind::Requirement,
        span: sentence_span,
        context: String::new(),
        actionable: true,
    }]
}
