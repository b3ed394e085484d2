//! The fixed-order YAML frontmatter sections stage 7 writes ahead of the
//! Markdown body (§4.7): conversion, processing, classification,
//! entity_insights, normalization, in that order. Failed documents get only
//! the sections through their last successful stage.

use crate::document::Document;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ConversionSection {
    pub engine_id: String,
    pub timestamp: String,
    pub byte_size: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessingSection {
    pub word_count: usize,
    pub line_count: usize,
    pub char_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationSection {
    pub primary_domain: String,
    pub primary_domain_confidence: f64,
    pub primary_doc_type: String,
    pub primary_doc_type_confidence: f64,
    pub skip_entity_extraction: bool,
    pub deep_extraction: bool,
    pub specialization_route: String,
}

/// Raw per-kind mention counts from stage 4, before stage 5 reconciliation.
#[derive(Debug, Clone, Serialize)]
pub struct EntityInsightsSection {
    pub total_mentions: usize,
    pub mention_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CanonicalEntitySummary {
    pub canonical_form: String,
    pub kind: String,
    pub count: usize,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizationSection {
    pub canonical_count: usize,
    pub entity_reduction_percent: f64,
    pub entities: Vec<CanonicalEntitySummary>,
}

/// The frontmatter block, field order fixed by declaration order so
/// `serde_yaml` emits sections in the order §4.7 requires.
#[derive(Debug, Clone, Serialize)]
pub struct Frontmatter {
    pub source_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion: Option<ConversionSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing: Option<ProcessingSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_insights: Option<EntityInsightsSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalization: Option<NormalizationSection>,
}

impl Frontmatter {
    /// Build a frontmatter record from whatever stages a `Document` has
    /// reached. Never rewrites or reorders a populated section.
    #[must_use = "constructs Frontmatter from the document's current stage state"]
    pub fn from_document(doc: &Document) -> Self {
        let conversion = doc.conversion_meta.as_ref().map(|meta| ConversionSection {
            engine_id: meta.engine_id.clone(),
            timestamp: meta.timestamp.to_rfc3339(),
            byte_size: meta.byte_size,
            page_count: doc.page_count,
        });

        let processing = match (doc.word_count, doc.line_count, doc.char_count) {
            (Some(word_count), Some(line_count), Some(char_count)) => Some(ProcessingSection {
                word_count,
                line_count,
                char_count,
            }),
            _ => None,
        };

        let classification = doc.classification.as_ref().map(|c| ClassificationSection {
            primary_domain: c.primary_domain.to_string(),
            primary_domain_confidence: c.primary_domain_confidence,
            primary_doc_type: c.primary_doc_type.to_string(),
            primary_doc_type_confidence: c.primary_doc_type_confidence,
            skip_entity_extraction: c.routing.skip_entity_extraction,
            deep_extraction: c.routing.deep_extraction,
            specialization_route: c.routing.specialization_route.clone(),
        });

        let entity_insights = doc.raw_entities.as_ref().map(|by_kind| {
            let mut mention_counts = BTreeMap::new();
            let mut total_mentions = 0usize;
            for (kind, mentions) in by_kind {
                total_mentions += mentions.len();
                mention_counts.insert(kind.to_string(), mentions.len());
            }
            EntityInsightsSection {
                total_mentions,
                mention_counts,
            }
        });

        let normalization = doc.normalized_entities.as_ref().map(|canonicals| {
            let total_mentions: usize = doc
                .raw_entities
                .as_ref()
                .map(|by_kind| by_kind.values().map(Vec::len).sum())
                .unwrap_or(0);
            let reduction = if total_mentions == 0 {
                0.0
            } else {
                1.0 - (canonicals.len() as f64 / total_mentions as f64)
            };
            NormalizationSection {
                canonical_count: canonicals.len(),
                entity_reduction_percent: reduction,
                entities: canonicals
                    .iter()
                    .map(|e| CanonicalEntitySummary {
                        canonical_form: e.canonical_form.clone(),
                        kind: e.kind.to_string(),
                        count: e.count,
                        aliases: e.aliases.clone(),
                    })
                    .collect(),
            }
        });

        Self {
            source_name: doc.source_name.clone(),
            success: doc.success,
            error: doc.error.clone(),
            conversion,
            processing,
            classification,
            entity_insights,
            normalization,
        }
    }
}
