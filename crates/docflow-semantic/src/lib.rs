//! Stage 6 (semantic analyze): five independent fact generators run over
//! every sentence, then their output is deduplicated, overlap-suppressed,
//! and capped.
//!
//! §4.6 fixes the cap at 25 facts per document and the suppression
//! threshold at 60% object word overlap; both are compile-time constants
//! here rather than configuration, matching the closed fact-generator
//! catalog.

pub mod compliance;
pub mod measurement;
pub mod org_action;
pub mod quantitative;
pub mod requirement;
pub mod sentence;

use docflow_core::{CanonicalEntity, Fact};
use sentence::{clean_context, entities_in_span, split_sentences};
use std::collections::{HashMap, HashSet};

const FACT_CAP: usize = 25;
const OVERLAP_SUPPRESSION_THRESHOLD: f64 = 0.6;
const CONTEXT_MAX_LEN: usize = 200;

/// Run every fact generator over `text`, using `normalized_entities` (the
/// stage-5 output) to ground the entity-driven generators.
#[must_use = "returns the deduplicated, capped fact list, does not mutate anything"]
pub fn analyze(text: &str, normalized_entities: &[CanonicalEntity]) -> Vec<Fact> {
    let sentences = split_sentences(text);
    let mut facts = Vec::new();

    for (span, sentence) in &sentences {
        let entities = entities_in_span(normalized_entities, *span);

        facts.extend(requirement::generate(*span, sentence));
        facts.extend(compliance::generate(*span, sentence));
        facts.extend(measurement::generate(*span, sentence, &entities));
        facts.extend(org_action::generate(*span, sentence, &entities));
        facts.extend(quantitative::generate(*span, sentence, &entities));
    }

    attach_context(&mut facts, &sentences);

    let facts = dedup_exact(facts);
    let facts = suppress_overlapping(facts);
    cap_and_sort(facts, FACT_CAP)
}

fn attach_context(facts: &mut [Fact], sentences: &[(docflow_core::Span, String)]) {
    for fact in facts.iter_mut() {
        if let Some((_, sentence)) = sentences.iter().find(|(span, _)| *span == fact.span) {
            fact.context = clean_context(sentence, CONTEXT_MAX_LEN);
        }
    }
}

fn dedup_exact(facts: Vec<Fact>) -> Vec<Fact> {
    let mut best: HashMap<(String, String, String), Fact> = HashMap::new();
    for fact in facts {
        let key = fact.dedup_key();
        match best.get(&key) {
            Some(existing) if existing.confidence >= fact.confidence => {}
            _ => {
                best.insert(key, fact);
            }
        }
    }
    best.into_values().collect()
}

/// A fact is suppressed when a higher-confidence fact of the *same
/// predicate* already kept shares at least 60% of its object's first
/// five words (§4.6) — subjects may differ, the predicate alone is the
/// suppression key.
fn suppress_overlapping(mut facts: Vec<Fact>) -> Vec<Fact> {
    facts.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());
    let mut kept: Vec<Fact> = Vec::with_capacity(facts.len());
    'candidates: for fact in facts {
        for existing in &kept {
            if existing.predicate == fact.predicate
                && first_words_overlap_ratio(&existing.object, &fact.object, 5) >= OVERLAP_SUPPRESSION_THRESHOLD
            {
                continue 'candidates;
            }
        }
        kept.push(fact);
    }
    kept
}

fn first_words_overlap_ratio(a: &str, b: &str, n: usize) -> f64 {
    let set_a: HashSet<String> = a.to_lowercase().split_whitespace().take(n).map(str::to_string).collect();
    let set_b: HashSet<String> = b.to_lowercase().split_whitespace().take(n).map(str::to_string).collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let smaller = set_a.len().min(set_b.len());
    intersection as f64 / smaller as f64
}

fn cap_and_sort(mut facts: Vec<Fact>, limit: usize) -> Vec<Fact> {
    facts.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap()
            .then(a.span.start.cmp(&b.span.start))
    });
    facts.truncate(limit);
    facts
}

#[cfg(test)]
mod tests {
    use super::*;
    use docflow_core::kinds::EntityKind;
    use docflow_core::Span;

    #[test]
    fn test_analyze_requirement_sentence() {
        let text = "All contractors must wear fall protection at all times.";
        let facts = analyze(text, &[]);
        assert!(!facts.is_empty());
        assert!(facts.iter().any(|f| f.predicate == "MUST_COMPLY_WITH"));
    }

    #[test]
    fn test_analyze_compliance_sentence() {
        let text = "Violation of 29 CFR 1910.147 can result in fines up to $145,000.";
        let facts = analyze(text, &[]);
        assert!(facts.iter().any(|f| f.predicate == "RESULTS_IN"));
    }

    #[test]
    fn test_analyze_caps_at_25_facts() {
        let sentence = "Personnel must wear hard hats on site.";
        let text = sentence.repeat(40);
        let facts = analyze(&text, &[]);
        assert!(facts.len() <= FACT_CAP);
    }

    #[test]
    fn test_analyze_attaches_context() {
        let text = "Workers must wear hard hats at the facility.";
        let facts = analyze(text, &[]);
        assert!(facts.iter().all(|f| !f.context.is_empty()));
    }

    #[test]
    fn test_analyze_org_action_uses_normalized_entity() {
        let entity = CanonicalEntity {
            id: "org-0".to_string(),
            canonical_form: "Acme Corp".to_string(),
            kind: EntityKind::Org,
            aliases: vec!["Acme".to_string()],
            count: 1,
            spans: vec![Span::new(0, 9)],
            metadata: Default::default(),
        };
        let text = "Acme Corp trains every new hire on lockout/tagout procedures.";
        let facts = analyze(text, &[entity]);
        assert!(facts.iter().any(|f| f.kind == docflow_core::FactKind::OrganizationalAction));
    }

    #[test]
    fn test_first_words_overlap_ratio_full_match() {
        assert_eq!(first_words_overlap_ratio("hard hats", "hard hats", 5), 1.0);
    }

    #[test]
    fn test_first_words_overlap_ratio_empty_is_zero() {
        assert_eq!(first_words_overlap_ratio("", "hard hats", 5), 0.0);
    }
}
