//! Pattern recognizer (§4.4.2): wraps the compiled regex catalog and groups
//! its hits by kind. A single pattern erroring at match time drops only
//! that pattern's mentions for the document (§7 Recognizer-failure); the
//! `regex` crate's guaranteed-linear matching means this path is reserved
//! for catalogs loaded from an untrusted file, not the built-in defaults.

use docflow_core::kinds::EntityKind;
use docflow_core::Mention;
use docflow_corpus::PatternCatalog;
use std::collections::HashMap;
use std::sync::Arc;

pub struct PatternRecognizer {
    catalog: Arc<PatternCatalog>,
}

impl PatternRecognizer {
    #[must_use = "constructs a new PatternRecognizer, use it or bind it"]
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }

    #[must_use = "returns the mentions found, does not mutate the document"]
    pub fn recognize(&self, text: &str) -> HashMap<EntityKind, Vec<Mention>> {
        let mut out: HashMap<EntityKind, Vec<Mention>> = HashMap::new();
        for mention in self.catalog.scan_all(text) {
            out.entry(mention.kind.clone()).or_default().push(mention);
        }
        out
    }
}
