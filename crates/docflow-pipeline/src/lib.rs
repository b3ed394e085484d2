//! Orchestration for the seven-stage document processing pipeline (§4, §5).
//!
//! [`Services`] bundles the resources every worker shares (corpus,
//! pattern catalog, blacklists, decoders); [`run_pipeline`] runs one
//! document through all seven stages; [`pool::run_batch`] fans a whole
//! directory out across a bounded worker pool and writes a
//! [`pool::BatchReport`]. Decoding, the stage functions themselves, and
//! the visual-element queue live in their own modules so each stays
//! independently testable.

pub mod decode;
pub mod integrate;
pub mod pool;
pub mod services;
pub mod stages;
pub mod visual;

pub use pool::{BatchReport, DocumentOutcome};
pub use services::{PipelineOptions, Services};

use docflow_core::kinds::EntityKind;
use docflow_core::{DocFlowError, Document};
use docflow_extract::{DictionaryRecognizer, EntityExtractor, PatternRecognizer, PersonRecognizer};
use std::path::Path;
use std::time::Instant;

/// Builds the stage-4 [`EntityExtractor`] from `services`' shared corpus
/// and catalog. The dictionary recognizer runs over every corpus kind
/// except the two internal person-name tags, which
/// [`docflow_extract::PersonRecognizer`] consumes on its own.
fn build_extractor(services: &Services) -> EntityExtractor {
    let dictionary_kinds: Vec<EntityKind> = services
        .corpus
        .kinds()
        .into_iter()
        .filter(|k| !matches!(k, EntityKind::Other(tag) if tag == "PERSON_FIRST" || tag == "PERSON_LAST"))
        .collect();

    EntityExtractor::new(
        DictionaryRecognizer::new(std::sync::Arc::clone(&services.corpus), dictionary_kinds),
        PatternRecognizer::new(std::sync::Arc::clone(&services.catalog)),
        PersonRecognizer::new(std::sync::Arc::clone(&services.corpus), services.person_blacklists.clone())
            .with_min_confidence(services.options.min_person_confidence),
    )
}

/// Runs a single document through all seven stages in order (§2, §4).
/// Stages 2 through 6 are no-ops once stage 1 marks the document failed,
/// so a decode failure always still reaches stage 7's reporting, just
/// without any writes. Stage 3 itself is skipped entirely when
/// `services.options.skip_tagging` is set (`--no-tagging`); with no
/// classification recorded, stage 4 never sees a routing decision to
/// skip extraction against, so every document is still fully extracted.
#[must_use = "returns the fully processed Document, does not write it to disk"]
pub fn run_pipeline(path: &Path, services: &Services) -> Document {
    let mut doc = stages::convert(path, services);
    stages::process(&mut doc);
    if !services.options.skip_tagging {
        stages::classify(&mut doc, &services.domain_keywords, &services.doc_type_keywords);
    }

    let extractor = build_extractor(services);
    stages::extract(&mut doc, &extractor);
    stages::normalize(&mut doc);
    stages::semantic(&mut doc);
    doc
}

/// Runs [`run_pipeline`] against `services.options.timeout` (`--timeout`,
/// §6). The deadline is checked between stages, not during one — a stage
/// already running always finishes before the document is marked timed
/// out and every remaining stage is skipped. `None` (the default)
/// disables the check entirely and behaves exactly like [`run_pipeline`].
#[must_use = "returns the fully processed (or timed-out) Document, does not write it to disk"]
pub fn run_pipeline_with_timeout(path: &Path, services: &Services) -> Document {
    let Some(timeout) = services.options.timeout else {
        return run_pipeline(path, services);
    };
    let deadline = Instant::now() + timeout;

    let mut doc = stages::convert(path, services);
    if past_deadline(&mut doc, deadline) {
        return doc;
    }
    stages::process(&mut doc);
    if past_deadline(&mut doc, deadline) {
        return doc;
    }
    if !services.options.skip_tagging {
        stages::classify(&mut doc, &services.domain_keywords, &services.doc_type_keywords);
    }
    if past_deadline(&mut doc, deadline) {
        return doc;
    }

    let extractor = build_extractor(services);
    stages::extract(&mut doc, &extractor);
    if past_deadline(&mut doc, deadline) {
        return doc;
    }
    stages::normalize(&mut doc);
    if past_deadline(&mut doc, deadline) {
        return doc;
    }
    stages::semantic(&mut doc);
    doc
}

/// Marks `doc` failed and returns `true` if it is still successful but
/// `deadline` has passed; otherwise leaves it untouched and returns
/// `false`. A document stage 1 already failed keeps its original error.
fn past_deadline(doc: &mut Document, deadline: Instant) -> bool {
    if !doc.success {
        return false;
    }
    if Instant::now() < deadline {
        return false;
    }
    doc.mark_failed(DocFlowError::Fatal("document exceeded its per-document timeout".to_string()).to_string());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_run_pipeline_happy_path_produces_entities_and_facts() {
        let services = Services::from_defaults("/tmp/out", PipelineOptions::default()).unwrap();
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        file.write_all(
            b"Acme Corporation must comply with 29 CFR 1926.95. The fine was $145,000.",
        )
        .unwrap();

        let doc = run_pipeline(file.path(), &services);
        assert!(doc.success);
        assert!(doc.classification.is_some());
        assert!(doc.normalized_entities.is_some());
        assert!(doc.semantic_facts.is_some());
        assert!(doc.stage_keys().contains("conversion"));
        assert!(doc.stage_keys().contains("processing"));
        assert!(doc.stage_keys().contains("classification"));
    }

    #[test]
    fn test_run_pipeline_skip_tagging_leaves_classification_unset_but_still_extracts() {
        let mut options = PipelineOptions::default();
        options.skip_tagging = true;
        let services = Services::from_defaults("/tmp/out", options).unwrap();
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        file.write_all(b"Acme Corporation must comply with 29 CFR 1926.95.")
            .unwrap();

        let doc = run_pipeline(file.path(), &services);
        assert!(doc.success);
        assert!(doc.classification.is_none());
        assert!(!doc.stage_keys().contains("classification"));
        assert!(doc.raw_entities.is_some());
        assert!(!doc.raw_entities.unwrap().is_empty());
    }

    #[test]
    fn test_run_pipeline_failed_decode_skips_later_stages() {
        let services = Services::from_defaults("/tmp/out", PipelineOptions::default()).unwrap();
        let doc = run_pipeline(Path::new("missing.pdf"), &services);
        assert!(!doc.success);
        assert!(doc.classification.is_none());
        assert!(doc.normalized_entities.is_none());
        assert!(doc.semantic_facts.is_none());
    }

    #[test]
    fn test_run_pipeline_with_timeout_disabled_matches_run_pipeline() {
        let services = Services::from_defaults("/tmp/out", PipelineOptions::default()).unwrap();
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        file.write_all(b"Acme Corporation must comply with 29 CFR 1926.95.")
            .unwrap();

        let doc = run_pipeline_with_timeout(file.path(), &services);
        assert!(doc.success);
        assert!(doc.semantic_facts.is_some());
    }

    #[test]
    fn test_run_pipeline_with_timeout_fails_when_deadline_already_passed() {
        let mut options = PipelineOptions::default();
        options.timeout = Some(Duration::from_nanos(1));
        let services = Services::from_defaults("/tmp/out", options).unwrap();
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        file.write_all(b"Acme Corporation must comply with 29 CFR 1926.95.")
            .unwrap();

        let doc = run_pipeline_with_timeout(file.path(), &services);
        assert!(!doc.success);
        assert!(doc.error.as_deref().unwrap_or_default().contains("timeout"));
    }
}
