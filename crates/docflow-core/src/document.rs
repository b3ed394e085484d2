//! The pipeline's central data record.
//!
//! A [`Document`] is built once per input file and threaded through all
//! seven stages. Each stage attaches fields to it and never rewrites a field
//! a prior stage set — growth is monotone, enforced here structurally by
//! giving every stage-scoped field an `Option<T>` that starts `None` and is
//! set exactly once.

use crate::entity::{CanonicalEntity, Mention};
use crate::fact::Fact;
use crate::kinds::{Domain, DocType, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Metadata recorded by stage 1 (Convert).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionMeta {
    /// Identifier of the decoder that produced the text (e.g. `"txt"`, `"md"`).
    pub engine_id: String,
    pub timestamp: DateTime<Utc>,
    pub byte_size: usize,
}

/// Routing decision computed from classification scores (§4.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub skip_entity_extraction: bool,
    pub deep_extraction: bool,
    pub specialization_route: String,
}

/// Output of stage 3 (Classify).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub domains: HashMap<Domain, f64>,
    pub doc_types: HashMap<DocType, f64>,
    pub primary_domain: Domain,
    pub primary_domain_confidence: f64,
    pub primary_doc_type: DocType,
    pub primary_doc_type_confidence: f64,
    pub routing: RoutingDecision,
}

/// A single document as it moves through the pipeline.
///
/// Fields are grouped by the stage that first populates them. `processing_times`
/// is the one field every stage updates, keyed by stage name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    // Set at construction, before stage 1 runs.
    pub source_path: PathBuf,
    pub source_name: String,
    pub source_stem: String,

    // Stage 1: Convert.
    pub markdown: String,
    pub page_count: usize,
    pub conversion_meta: Option<ConversionMeta>,

    // Stage 2: Process.
    pub word_count: Option<usize>,
    pub line_count: Option<usize>,
    pub char_count: Option<usize>,

    // Stage 3: Classify.
    pub classification: Option<ClassificationRecord>,

    // Stage 4: Extract Entities.
    pub raw_entities: Option<HashMap<EntityKind, Vec<Mention>>>,

    // Stage 5: Normalize.
    pub normalized_entities: Option<Vec<CanonicalEntity>>,

    // Stage 6: Semantic Analyze.
    pub semantic_facts: Option<Vec<Fact>>,

    // Updated by every stage.
    pub processing_times: HashMap<String, f64>,

    pub success: bool,
    pub error: Option<String>,
}

impl Document {
    /// Construct a fresh, pre-stage-1 `Document` for the given source path.
    ///
    /// `markdown` and `page_count` are set by stage 1 immediately afterward;
    /// they start empty here because a `Document` must exist before the
    /// decoder runs so decode failures can still be attached to it.
    #[must_use = "constructs a new Document that must be run through the pipeline"]
    pub fn new(source_path: impl AsRef<Path>) -> Self {
        let source_path = source_path.as_ref().to_path_buf();
        let source_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source_stem = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            source_path,
            source_name,
            source_stem,
            markdown: String::new(),
            page_count: 0,
            conversion_meta: None,
            word_count: None,
            line_count: None,
            char_count: None,
            classification: None,
            raw_entities: None,
            normalized_entities: None,
            semantic_facts: None,
            processing_times: HashMap::new(),
            success: true,
            error: None,
        }
    }

    /// Record how long a stage took, in milliseconds.
    pub fn record_timing(&mut self, stage: &str, millis: f64) {
        self.processing_times.insert(stage.to_string(), millis);
    }

    /// Mark the document as failed at the given stage, short-circuiting the
    /// remaining stages per the error handling design (§7 Stage-failure).
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.success = false;
        self.error = Some(message.into());
    }

    /// Names of the stage-scoped fields currently populated.
    ///
    /// Used by the monotone-growth test: once a key appears here it must
    /// never disappear as later stages run.
    #[must_use = "inspect the returned set to check monotone stage growth"]
    pub fn stage_keys(&self) -> std::collections::HashSet<&'static str> {
        let mut keys = std::collections::HashSet::new();
        if self.conversion_meta.is_some() {
            keys.insert("conversion");
        }
        if self.word_count.is_some() {
            keys.insert("processing");
        }
        if self.classification.is_some() {
            keys.insert("classification");
        }
        if self.raw_entities.is_some() {
            keys.insert("raw_entities");
        }
        if self.normalized_entities.is_some() {
            keys.insert("normalized_entities");
        }
        if self.semantic_facts.is_some() {
            keys.insert("semantic_facts");
        }
        keys
    }
}
