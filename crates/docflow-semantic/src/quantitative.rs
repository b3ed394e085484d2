//! Quantitative fact generator (§4.6): a large money amount or employee
//! count co-occurring with an organization becomes a `REPORTS_METRIC`
//! fact. The predicate name isn't fixed by the catalog text the way the
//! other four are; `REPORTS_METRIC` is this implementation's choice,
//! recorded as an open decision.

use crate::sentence::score_fact;
use docflow_core::kinds::EntityKind;
use docflow_core::{CanonicalEntity, Fact, FactKind, Span};
use once_cell::sync::Lazy;
use regex::Regex;

const LARGE_AMOUNT_THRESHOLD: f64 = 10_000.0;
static EMPLOYEE_COUNT_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bemployees?\b").unwrap());

fn parse_money(canonical_form: &str) -> Option<f64> {
    canonical_form.trim_start_matches('$').replace(',', "").parse().ok()
}

#[must_use = "returns the quantitative facts found in this sentence"]
pub fn generate(sentence_span: Span, sentence: &str, entities: &[&CanonicalEntity]) -> Vec<Fact> {
    if !entities.iter().any(|e| e.kind == EntityKind::Org) {
        return Vec::new();
    }

    entities
        .iter()
        .filter_map(|e| match e.kind {
            EntityKind::Money => {
                let amount = parse_money(&e.canonical_form)?;
                (amount >= LARGE_AMOUNT_THRESHOLD).then_some(*e)
            }
            EntityKind::Percentage if EMPLOYEE_COUNT_HINT.is_match(sentence) => Some(*e),
            _ => None,
        })
        .map(|e| {
            let object = e.canonical_form.clone();
            let confidence = score_fact(sentence, &object, false, true);
            let subject = entities
                .iter()
                .find(|o| o.kind == EntityKind::Org)
                .map(|o| o.canonical_form.clone())
                .unwrap_or_else(|| "Document".to_string());

            Fact {
                subject,
                predicate: "REPORTS_METRIC".to_string(),
                object,
                confidence,
                kind: FactKind::Quantitative,
                span: sentence_span,
                context: String::new(),
                actionable: false,
            }
        })
        .collect()
}
