//! The immutable, process-wide resources every worker shares (§5): the
//! automaton corpus, the pattern catalog, the classification keyword
//! tables, and the registered decoders. Built once at pool startup.

use docflow_core::kinds::{Domain, DocType};
use docflow_core::{DocFlowError, Strategy};
use docflow_corpus::{defaults, AutomatonCorpus, PatternCatalog};
use docflow_extract::{person_first_kind, person_last_kind, PersonBlacklists};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::decode::{Decoder, PlainTextDecoder};
use crate::visual::VisualRecognizer;

/// Options that shape how a batch is processed, mirroring the CLI flags
/// in SPEC_FULL.md §6.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub workers: usize,
    pub strategy: Strategy,
    pub skip_visual: bool,
    pub skip_tables: bool,
    pub skip_images: bool,
    pub skip_tagging: bool,
    pub text_only: bool,
    pub strict: bool,
    pub min_person_confidence: f64,
    /// How long stage 7 waits for the visual queue to drain before
    /// writing un-merged markdown and patching it up later (§9).
    pub visual_drain_timeout: Duration,
    /// Per-document wall-clock budget (`--timeout`, §6). Checked between
    /// pipeline stages by [`crate::run_pipeline_with_timeout`]; `None`
    /// disables it.
    pub timeout: Option<Duration>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().max(1),
            strategy: Strategy::default(),
            skip_visual: false,
            skip_tables: false,
            skip_images: false,
            skip_tagging: false,
            text_only: false,
            strict: false,
            min_person_confidence: 0.7,
            visual_drain_timeout: Duration::from_secs(120),
            timeout: None,
        }
    }
}

pub struct Services {
    pub corpus: std::sync::Arc<AutomatonCorpus>,
    pub catalog: std::sync::Arc<PatternCatalog>,
    pub person_blacklists: PersonBlacklists,
    pub domain_keywords: Vec<(Domain, Vec<String>)>,
    pub doc_type_keywords: Vec<(DocType, Vec<String>)>,
    pub decoders: Vec<Box<dyn Decoder>>,
    pub output_dir: PathBuf,
    pub options: PipelineOptions,
    /// The collaborator stage 7 hands visual jobs to, if one is
    /// configured. `None` (the built-in default) means visual jobs are
    /// written through untouched — a real deployment plugs in a vision
    /// model here.
    pub visual_recognizer: Option<Arc<dyn VisualRecognizer>>,
}

impl Services {
    /// Build from the embedded built-in word lists. Fails (`Fatal`, per
    /// §7) only if the automaton or pattern catalog fail to compile,
    /// which cannot happen with the built-in defaults but can if a
    /// future external corpus file is malformed.
    pub fn from_defaults(output_dir: impl Into<PathBuf>, options: PipelineOptions) -> Result<Self, DocFlowError> {
        let mut word_lists = HashMap::new();
        word_lists.insert(person_first_kind(), split_words(defaults::PERSON_FIRST));
        word_lists.insert(person_last_kind(), split_words(defaults::PERSON_LAST));
        word_lists.insert(docflow_core::kinds::EntityKind::Org, split_words(defaults::ORG));
        word_lists.insert(docflow_core::kinds::EntityKind::Gpe, split_words(defaults::GPE));

        let corpus = AutomatonCorpus::build(word_lists)?;
        let catalog = PatternCatalog::build(&docflow_corpus::default_patterns())?;

        Ok(Self {
            corpus: std::sync::Arc::new(corpus),
            catalog: std::sync::Arc::new(catalog),
            person_blacklists: PersonBlacklists::from_defaults(),
            domain_keywords: defaults::default_domain_keywords(),
            doc_type_keywords: defaults::default_doc_type_keywords(),
            decoders: vec![Box::new(PlainTextDecoder)],
            output_dir: output_dir.into(),
            options,
            visual_recognizer: None,
        })
    }

    #[must_use = "returns whether path's extension is decodable, does not mutate anything"]
    pub fn can_decode(&self, path: &Path) -> bool {
        crate::decode::select_decoder(&self.decoders, path).is_some()
    }

    /// Plugs a visual-element recognizer into an already-built `Services`.
    #[must_use = "returns a new Services with the recognizer attached"]
    pub fn with_visual_recognizer(mut self, recognizer: Arc<dyn VisualRecognizer>) -> Self {
        self.visual_recognizer = Some(recognizer);
        self
    }
}

fn split_words(contents: &str) -> Vec<String> {
    docflow_corpus::wordlist::parse_word_list(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_from_defaults_builds() {
        let services = Services::from_defaults("/tmp/out", PipelineOptions::default()).unwrap();
        assert!(services.corpus.has_kind(&docflow_core::kinds::EntityKind::Org));
    }

    #[test]
    fn test_can_decode_matches_known_extension() {
        let services = Services::from_defaults("/tmp/out", PipelineOptions::default()).unwrap();
        assert!(services.can_decode(Path::new("a.md")));
        assert!(!services.can_decode(Path::new("a.pdf")));
    }
}
