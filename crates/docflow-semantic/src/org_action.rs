//! Organizational action fact generator (§4.6): an organization paired
//! with one of the action verbs ("provides", "delivers", "requires",
//! "trains") becomes a fact with that verb as the predicate.

use crate::sentence::score_fact;
use docflow_core::kinds::EntityKind;
use docflow_core::{CanonicalEntity, Fact, FactKind, Span};

const ACTION_VERBS: [&str; 8] = [
    "provides", "provide", "delivers", "deliver", "requires", "require", "trains", "train",
];

#[must_use = "returns the organizational action facts found in this sentence"]
pub fn generate(sentence_span: Span, sentence: &str, entities: &[&CanonicalEntity]) -> Vec<Fact> {
    let lower = sentence.to_lowercase();
    let mut facts = Vec::new();

    for org in entities.iter().filter(|e| e.kind == EntityKind::Org) {
        for verb in ACTION_VERBS {
            let Some(pos) = lower.find(verb) else {
                continue;
            };
            let object_start = pos + verb.len();
            let object = sentence[object_start..]
                .trim()
                .trim_start_matches(|c: char| !c.is_alphanumeric())
                .trim_end_matches('.')
                .to_string();
            if object.is_empty() {
                continue;
            }

            let confidence = score_fact(sentence, &object, false, true);
            let predicate = verb.trim_end_matches('s').to_uppercase() + "S";

            facts.push(Fact {
                subject: org.canonical_form.clone(),
                predicate,
                object,
                confidence,
                kind: FactKind::OrganizationalAction,
                span: sentence_span,
                context: String::new(),
                actionable: true,
            });
            break;
        }
    }
    facts
}
