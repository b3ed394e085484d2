//! JSON serialization for the `<stem>_semantic.json` sidecar (§6).

use crate::document::{ClassificationRecord, Document};
use crate::entity::{CanonicalEntity, Mention};
use crate::fact::Fact;
use crate::kinds::EntityKind;
use serde::Serialize;
use std::collections::HashMap;

/// Full sidecar schema: written only when `semantic_facts` is non-empty.
#[derive(Debug, Clone, Serialize)]
pub struct SemanticSidecar<'a> {
    pub source_filename: &'a str,
    pub processing: &'a HashMap<String, f64>,
    pub classification: Option<&'a ClassificationRecord>,
    pub entities: Option<&'a HashMap<EntityKind, Vec<Mention>>>,
    pub normalized_entities: Option<&'a [CanonicalEntity]>,
    pub semantic_facts: &'a [Fact],
}

impl<'a> SemanticSidecar<'a> {
    #[must_use = "borrows the document's fields into a sidecar view, use it or bind it"]
    pub fn from_document(doc: &'a Document) -> Option<Self> {
        let facts = doc.semantic_facts.as_deref()?;
        if facts.is_empty() {
            return None;
        }
        Some(Self {
            source_filename: &doc.source_name,
            processing: &doc.processing_times,
            classification: doc.classification.as_ref(),
            entities: doc.raw_entities.as_ref(),
            normalized_entities: doc.normalized_entities.as_deref(),
            semantic_facts: facts,
        })
    }
}

/// Options for JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonOptions {
    pub pretty: bool,
    pub indent: String,
}

impl Default for JsonOptions {
    #[inline]
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

/// JSON serializer for the semantic sidecar and, for debugging, a whole
/// `Document`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonSerializer {
    options: JsonOptions,
}

impl JsonSerializer {
    #[inline]
    #[must_use = "creates serializer with default options"]
    pub fn new() -> Self {
        Self {
            options: JsonOptions::default(),
        }
    }

    #[inline]
    #[must_use = "creates serializer with custom options"]
    pub const fn with_options(options: JsonOptions) -> Self {
        Self { options }
    }

    /// Serialize a document's semantic sidecar, if it has any facts.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn serialize_sidecar(&self, doc: &Document) -> Result<Option<String>, serde_json::Error> {
        let Some(sidecar) = SemanticSidecar::from_document(doc) else {
            return Ok(None);
        };
        let rendered = if self.options.pretty {
            serde_json::to_string_pretty(&sidecar)?
        } else {
            serde_json::to_string(&sidecar)?
        };
        Ok(Some(rendered))
    }

    /// Serialize an arbitrary `Document` to JSON (debugging/inspection).
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    #[must_use = "this function returns serialized JSON that should be used"]
    pub fn serialize_document(&self, doc: &Document) -> Result<String, serde_json::Error> {
        if self.options.pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        }
    }
}
