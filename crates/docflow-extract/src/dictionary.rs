//! Dictionary recognizer (§4.4.1): one Aho-Corasick scan per entity kind
//! over lowercased text, word-boundary filtered.

use docflow_core::kinds::EntityKind;
use docflow_core::Mention;
use docflow_corpus::AutomatonCorpus;
use std::collections::HashMap;
use std::sync::Arc;

pub struct DictionaryRecognizer {
    corpus: Arc<AutomatonCorpus>,
    kinds: Vec<EntityKind>,
}

impl DictionaryRecognizer {
    #[must_use = "constructs a new DictionaryRecognizer, use it or bind it"]
    pub fn new(corpus: Arc<AutomatonCorpus>, kinds: Vec<EntityKind>) -> Self {
        Self { corpus, kinds }
    }

    /// Scan `original_text` once per configured kind. The caller passes
    /// already lowercased text so every kind shares one lowercase pass for
    /// matching; reported mention text is sliced from `original_text` so
    /// it preserves the document's casing (Testable Property 3).
    #[must_use = "returns the mentions found, does not mutate the document"]
    pub fn recognize(
        &self,
        lowercased_text: &str,
        original_text: &str,
    ) -> HashMap<EntityKind, Vec<Mention>> {
        let mut out = HashMap::new();
        for kind in &self.kinds {
            let mentions = self.corpus.scan(kind, lowercased_text, original_text);
            if !mentions.is_empty() {
                out.insert(kind.clone(), mentions);
            }
        }
        out
    }
}
