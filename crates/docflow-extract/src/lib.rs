//! Stage 4 (entity extraction) recognizers and their orchestration.
//!
//! Three independent recognizers run over the same document text: the
//! dictionary recognizer (§4.4.1), the pattern recognizer (§4.4.2), and the
//! person recognizer (§4.4.3). Stage 4 itself performs no cross-recognizer
//! deduplication or overlap resolution — mentions from different
//! recognizers, or even the same recognizer, may overlap in span. That
//! reconciliation is stage 5's job (`docflow-normalize`).

pub mod dictionary;
pub mod pattern;
pub mod person;

pub use dictionary::DictionaryRecognizer;
pub use pattern::PatternRecognizer;
pub use person::{person_first_kind, person_last_kind, PersonBlacklists, PersonRecognizer};

use docflow_core::kinds::EntityKind;
use docflow_core::Mention;
use std::collections::HashMap;

/// The three stage-4 recognizers, bundled so the pipeline can run them
/// over a document in one call and merge their output.
pub struct EntityExtractor {
    pub dictionary: DictionaryRecognizer,
    pub pattern: PatternRecognizer,
    pub person: PersonRecognizer,
}

impl EntityExtractor {
    #[must_use = "constructs a new EntityExtractor, use it or bind it"]
    pub fn new(
        dictionary: DictionaryRecognizer,
        pattern: PatternRecognizer,
        person: PersonRecognizer,
    ) -> Self {
        Self {
            dictionary,
            pattern,
            person,
        }
    }

    /// Run all three recognizers and merge their mentions by kind. `text`
    /// is the document's markdown body in original case; recognizers that
    /// need lowercased text do so internally.
    #[must_use = "returns the merged raw entity map for the document"]
    pub fn extract(&self, text: &str) -> HashMap<EntityKind, Vec<Mention>> {
        let lowercased = text.to_lowercase();
        let mut merged = self.dictionary.recognize(&lowercased, text);

        for (kind, mentions) in self.pattern.recognize(text) {
            merged.entry(kind).or_default().extend(mentions);
        }

        let person_mentions = self.person.recognize(text);
        if !person_mentions.is_empty() {
            merged
                .entry(EntityKind::Person)
                .or_default()
                .extend(person_mentions);
        }

        tracing::debug!(
            kinds = merged.len(),
            mentions = merged.values().map(Vec::len).sum::<usize>(),
            "stage 4 extraction complete"
        );
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docflow_corpus::{default_patterns, AutomatonCorpus, PatternCatalog};
    use std::sync::Arc;

    #[test]
    fn test_extract_merges_all_three_recognizers() {
        let mut lists = HashMap::new();
        lists.insert(EntityKind::Org, vec!["acme".to_string()]);
        lists.insert(person_first_kind(), vec!["john".to_string()]);
        lists.insert(person_last_kind(), vec!["smith".to_string()]);
        let corpus = Arc::new(AutomatonCorpus::build(lists).unwrap());
        let catalog = Arc::new(PatternCatalog::build(&default_patterns()).unwrap());

        let extractor = EntityExtractor::new(
            DictionaryRecognizer::new(corpus.clone(), vec![EntityKind::Org]),
            PatternRecognizer::new(catalog),
            PersonRecognizer::new(corpus, PersonBlacklists::from_defaults()),
        );

        let result = extractor.extract(
            "Dr. John Smith said Acme was fined $1,000 under 29 CFR 1926.95.",
        );

        assert!(result.contains_key(&EntityKind::Org));
        assert!(result.contains_key(&EntityKind::Money));
        assert!(result.contains_key(&EntityKind::Regulation));
        assert!(result.contains_key(&EntityKind::Person));
        assert_eq!(result[&EntityKind::Org][0].text, "Acme");
    }
}
