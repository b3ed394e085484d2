//! The seven pipeline stages (§4). Each function mutates only the keys
//! its stage owns and records its own timing — never rewrites an
//! earlier stage's attributes (§2's monotone-growth contract).

use crate::decode::select_decoder;
use crate::services::Services;
use docflow_core::document::{ClassificationRecord, ConversionMeta, RoutingDecision};
use docflow_core::kinds::{Domain, DocType};
use docflow_core::{Document, DocFlowError};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

/// Stage 1 (Convert). Delegates to whichever registered decoder
/// supports the file's extension; an unsupported extension is a `Skip`,
/// not a failure (§4.1).
pub fn convert(path: &Path, services: &Services) -> Document {
    let start = Instant::now();
    let mut doc = Document::new(path);

    let Some(decoder) = select_decoder(&services.decoders, path) else {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        doc.mark_failed(DocFlowError::Skip(format!("unsupported extension: {extension}")).to_string());
        doc.record_timing("convert", elapsed_ms(start));
        return doc;
    };

    match decoder.decode(path) {
        Ok((text, page_count)) => {
            let byte_size = std::fs::metadata(path).map(|m| m.len() as usize).unwrap_or(text.len());
            doc.markdown = text;
            doc.page_count = page_count;
            doc.conversion_meta = Some(ConversionMeta {
                engine_id: decoder.engine_id().to_string(),
                timestamp: chrono::Utc::now(),
                byte_size,
            });
        }
        Err(e) => doc.mark_failed(e.to_string()),
    }

    doc.record_timing("convert", elapsed_ms(start));
    doc
}

/// Stage 2 (Process). Counts words, lines, and characters. No-op when
/// stage 1 failed (§4.1: failed documents skip stages 2–6).
pub fn process(doc: &mut Document) {
    if !doc.success {
        return;
    }
    let start = Instant::now();
    doc.word_count = Some(doc.markdown.split_whitespace().count());
    doc.line_count = Some(doc.markdown.lines().count());
    doc.char_count = Some(doc.markdown.chars().count());
    doc.record_timing("process", elapsed_ms(start));
}

/// Stage 3 (Classify). Keyword-density scoring per §4.3's exact
/// formula and thresholds; `general` always scores 1 so the argmax is
/// never undefined.
pub fn classify(
    doc: &mut Document,
    domain_keywords: &[(Domain, Vec<String>)],
    doc_type_keywords: &[(DocType, Vec<String>)],
) {
    if !doc.success {
        return;
    }
    let start = Instant::now();
    let word_counts = tokenize(&doc.markdown);

    let mut domain_scores = score_keywords(&word_counts, domain_keywords);
    domain_scores.push((Domain::General, 1.0));
    let (primary_domain, primary_domain_confidence) = pick_argmax(&domain_scores);
    let domains: HashMap<Domain, f64> = domain_scores.into_iter().collect();

    let mut doc_type_scores = score_keywords(&word_counts, doc_type_keywords);
    doc_type_scores.push((DocType::General, 1.0));
    let (primary_doc_type, primary_doc_type_confidence) = pick_argmax(&doc_type_scores);
    let doc_types: HashMap<DocType, f64> = doc_type_scores.into_iter().collect();

    let routing = RoutingDecision {
        skip_entity_extraction: primary_domain_confidence < 5.0,
        deep_extraction: primary_domain_confidence >= 60.0,
        specialization_route: if primary_domain_confidence >= 40.0 {
            primary_domain.as_str().to_string()
        } else {
            "general".to_string()
        },
    };

    doc.classification = Some(ClassificationRecord {
        domains,
        doc_types,
        primary_domain,
        primary_domain_confidence,
        primary_doc_type,
        primary_doc_type_confidence,
        routing,
    });
    doc.record_timing("classify", elapsed_ms(start));
}

/// Stage 4 (Extract). Runs the three recognizers via
/// [`docflow_extract::EntityExtractor`] and records the merged mentions.
/// Skipped when stage 3 routed `skip_entity_extraction`.
pub fn extract(doc: &mut Document, extractor: &docflow_extract::EntityExtractor) {
    if !doc.success {
        return;
    }
    if let Some(classification) = &doc.classification {
        if classification.routing.skip_entity_extraction {
            doc.raw_entities = Some(HashMap::new());
            return;
        }
    }
    let start = Instant::now();
    doc.raw_entities = Some(extractor.extract(&doc.markdown));
    doc.record_timing("extract", elapsed_ms(start));
}

/// Stage 5 (Normalize). Delegates to [`docflow_normalize::normalize`].
pub fn normalize(doc: &mut Document) {
    if !doc.success {
        return;
    }
    let Some(raw_entities) = &doc.raw_entities else {
        return;
    };
    let start = Instant::now();
    doc.normalized_entities = Some(docflow_normalize::normalize(raw_entities));
    doc.record_timing("normalize", elapsed_ms(start));
}

/// Stage 6 (Semantic). Delegates to [`docflow_semantic::analyze`].
pub fn semantic(doc: &mut Document) {
    if !doc.success {
        return;
    }
    let normalized = doc.normalized_entities.clone().unwrap_or_default();
    let start = Instant::now();
    doc.semantic_facts = Some(docflow_semantic::analyze(&doc.markdown, &normalized));
    doc.record_timing("semantic", elapsed_ms(start));
}

/// Stage 7 (Write). Delegates to [`docflow_core::serializer::MarkdownSerializer`].
/// Writes nothing for a failed document (§4.1, §4.7).
pub fn write(doc: &Document, services: &Services) -> Result<Vec<std::path::PathBuf>, DocFlowError> {
    let serializer = docflow_core::serializer::MarkdownSerializer::default();
    serializer.write(doc, &services.output_dir)
}

fn tokenize(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for raw in text.split_whitespace() {
        let token = raw.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
        if token.is_empty() {
            continue;
        }
        *counts.entry(token).or_insert(0_usize) += 1;
    }
    counts
}

fn score_keywords<K: Clone>(word_counts: &HashMap<String, usize>, keyword_sets: &[(K, Vec<String>)]) -> Vec<(K, f64)> {
    keyword_sets
        .iter()
        .map(|(key, words)| {
            let score: usize = words.iter().filter_map(|w| word_counts.get(w)).sum();
            (key.clone(), score as f64)
        })
        .collect()
}

fn pick_argmax<K: Clone>(scored: &[(K, f64)]) -> (K, f64) {
    let mut best = scored[0].clone();
    for (k, s) in &scored[1..] {
        if *s > best.1 {
            best = (k.clone(), *s);
        }
    }
    best
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_convert_skips_unsupported_extension() {
        let services = Services::from_defaults("/tmp/out", crate::services::PipelineOptions::default()).unwrap();
        let doc = convert(Path::new("report.pdf"), &services);
        assert!(!doc.success);
    }

    #[test]
    fn test_convert_process_classify_happy_path() {
        let services = Services::from_defaults("/tmp/out", crate::services::PipelineOptions::default()).unwrap();
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        file.write_all(b"Workers must wear hard hats near the generator room.").unwrap();

        let mut doc = convert(file.path(), &services);
        assert!(doc.success);
        process(&mut doc);
        assert_eq!(doc.word_count, Some(9));

        classify(&mut doc, &services.domain_keywords, &services.doc_type_keywords);
        assert!(doc.classification.is_some());
    }

    #[test]
    fn test_classify_general_fallback_when_no_keywords_match() {
        let mut doc = Document::new("x.md");
        doc.markdown = "nothing relevant appears here at all".to_string();
        doc.success = true;
        classify(&mut doc, &[], &[]);
        let classification = doc.classification.unwrap();
        assert_eq!(classification.primary_domain, Domain::General);
        assert_eq!(classification.primary_domain_confidence, 1.0);
    }

    #[test]
    fn test_classify_routing_thresholds() {
        let mut doc = Document::new("x.md");
        doc.markdown = "hazard ".repeat(70);
        doc.success = true;
        let keywords = vec![(Domain::Safety, vec!["hazard".to_string()])];
        classify(&mut doc, &keywords, &[]);
        let classification = doc.classification.unwrap();
        assert_eq!(classification.primary_domain, Domain::Safety);
        assert!(classification.routing.deep_extraction);
    }
}
