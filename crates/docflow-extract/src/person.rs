//! Person recognizer (§4.4.3): walks the merged first/last-name dictionary
//! hits left to right, assembles name-token sequences, validates them by
//! position and local context, filters against blacklists and the
//! organization corpus, and accepts only candidates scoring at or above
//! `min_confidence`.

use docflow_core::kinds::EntityKind;
use docflow_core::{Mention, Span};
use docflow_corpus::{wordlist::parse_word_list, AutomatonCorpus};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// Internal-only kind tagging a dictionary hit from the first-name list.
/// Never appears in a document's `raw_entities` — the person recognizer
/// consumes these and emits `EntityKind::Person` mentions instead.
#[must_use = "returns the internal kind used to tag first-name dictionary hits"]
pub fn person_first_kind() -> EntityKind {
    EntityKind::Other("PERSON_FIRST".to_string())
}

/// Internal-only kind tagging a dictionary hit from the last-name list.
#[must_use = "returns the internal kind used to tag last-name dictionary hits"]
pub fn person_last_kind() -> EntityKind {
    EntityKind::Other("PERSON_LAST".to_string())
}

const CONNECTORS: [&str; 8] = ["and", "von", "van", "de", "la", "le", "del", "du"];
const TITLE_PREFIXES: [&str; 5] = ["mr", "mrs", "ms", "dr", "professor"];
const NAME_SUFFIXES: [&str; 7] = ["jr", "sr", "ii", "iii", "iv", "phd", "md"];
const ACTION_VERBS: [&str; 5] = ["said", "stated", "announced", "wrote", "testified"];
const BIO_MARKERS: [&str; 5] = ["was born", "died", "graduated", "founded", "invented"];
const DEFAULT_MIN_CONFIDENCE: f64 = 0.7;
const MAX_GAP_BYTES: usize = 20;
const CONTEXT_RADIUS: usize = 50;

static ROLE_SUFFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i),\s*(CEO|President|Chairman|Director|Manager|Founder)\b").unwrap()
});

static ORG_CONTEXT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(inc\.?|llc|corp\.?|corporation|company|ltd\.?)\b|\b(at|from)\s+[A-Z][a-zA-Z]+|announced its\b",
    )
    .unwrap()
});

/// The blacklists and overlap sets the person recognizer's filters consult.
#[derive(Debug, Clone, Default)]
pub struct PersonBlacklists {
    pub founders: HashSet<String>,
    pub tech_companies: HashSet<String>,
    pub common_word_names: HashSet<String>,
    pub geographic_overlap: HashSet<String>,
    pub publication_overlap: HashSet<String>,
}

impl PersonBlacklists {
    /// Build from the built-in embedded defaults in `docflow-corpus`.
    #[must_use = "constructs blacklists from embedded defaults, use it or bind it"]
    pub fn from_defaults() -> Self {
        Self {
            founders: parse_word_list(docflow_corpus::defaults::FOUNDER_BLACKLIST)
                .into_iter()
                .collect(),
            tech_companies: parse_word_list(docflow_corpus::defaults::TECH_COMPANY)
                .into_iter()
                .collect(),
            common_word_names: parse_word_list(docflow_corpus::defaults::COMMON_WORD_NAME)
                .into_iter()
                .collect(),
            geographic_overlap: parse_word_list(docflow_corpus::defaults::GEOGRAPHIC_OVERLAP)
                .into_iter()
                .collect(),
            publication_overlap: parse_word_list(docflow_corpus::defaults::PUBLICATION_OVERLAP)
                .into_iter()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    First,
    Last,
}

pub struct PersonRecognizer {
    corpus: Arc<AutomatonCorpus>,
    blacklists: PersonBlacklists,
    min_confidence: f64,
}

impl PersonRecognizer {
    #[must_use = "constructs a new PersonRecognizer, use it or bind it"]
    pub fn new(corpus: Arc<AutomatonCorpus>, blacklists: PersonBlacklists) -> Self {
        Self {
            corpus,
            blacklists,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }

    #[must_use = "returns a recognizer with the given threshold, use it or bind it"]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Run the full person-recognition algorithm over `text` (original
    /// case; the dictionary scan internally lowercases).
    #[must_use = "returns the accepted person mentions, does not mutate the document"]
    pub fn recognize(&self, text: &str) -> Vec<Mention> {
        let lowercased = text.to_lowercase();
        let mut hits: Vec<(Span, TokenKind)> = self
            .corpus
            .scan(&person_first_kind(), &lowercased, text)
            .into_iter()
            .map(|m| (m.span, TokenKind::First))
            .chain(
                self.corpus
                    .scan(&person_last_kind(), &lowercased, text)
                    .into_iter()
                    .map(|m| (m.span, TokenKind::Last)),
            )
            .collect();
        hits.sort_by_key(|(span, _)| span.start);

        assemble_sequences(text, &hits)
            .into_iter()
            .filter_map(|seq| self.evaluate(text, &seq))
            .filter(|candidate| candidate.confidence >= self.min_confidence)
            .map(|candidate| {
                let mut mention =
                    Mention::new(candidate.span, candidate.text, EntityKind::Person);
                mention.confidence = Some(candidate.confidence);
                mention
            })
            .collect()
    }

    fn evaluate(&self, text: &str, seq: &[(Span, TokenKind)]) -> Option<Candidate> {
        let first = seq.first()?;
        let last = seq.last()?;
        let multi = seq.len() >= 2;

        if multi && (first.1 != TokenKind::First || last.1 != TokenKind::Last) {
            return None;
        }
        if !multi && first.1 != TokenKind::First {
            return None;
        }

        let core_start = first.0.start;
        let core_end = last.0.end;
        let core_lower = text[core_start..core_end].to_lowercase();

        if self.blacklists.founders.contains(&core_lower)
            || self.blacklists.tech_companies.contains(&core_lower)
        {
            return None;
        }
        if !multi && self.blacklists.common_word_names.contains(&core_lower) {
            return None;
        }
        for token in core_lower.split_whitespace() {
            if self.blacklists.geographic_overlap.contains(token)
                || self.blacklists.publication_overlap.contains(token)
            {
                return None;
            }
        }

        if self
            .corpus
            .scan(&EntityKind::Org, &core_lower, &core_lower)
            .iter()
            .any(|m| m.span.start == 0 && m.span.end == core_lower.len())
        {
            return None;
        }
        let context = context_around(text, core_start, core_end, CONTEXT_RADIUS);
        if ORG_CONTEXT_PATTERN.is_match(&context) {
            return None;
        }

        let (span_start, has_title) = detect_title_prefix(text, core_start);
        let (span_end, has_suffix) = detect_name_suffix(text, core_end);

        if !multi {
            let strong_context =
                has_title || has_action_verb(&context) || has_bio_marker(&context);
            if !strong_context {
                return None;
            }
        }

        let mut confidence: f64 = if multi { 0.7 } else { 0.5 };
        if has_title {
            confidence += 0.3;
        }
        if has_action_verb(&context) {
            confidence += 0.2;
        }
        if has_bio_marker(&context) {
            confidence += 0.3;
        }
        if ROLE_SUFFIX_PATTERN.is_match(&context) {
            confidence += 0.2;
        }
        if has_suffix {
            confidence += 0.1;
        }
        if seq.len() >= 2 {
            confidence += 0.2;
        }
        confidence = confidence.min(1.0);

        Some(Candidate {
            span: Span::new(span_start, span_end),
            text: text[span_start..span_end].to_string(),
            confidence,
        })
    }
}

struct Candidate {
    span: Span,
    text: String,
    confidence: f64,
}

fn assemble_sequences(text: &str, hits: &[(Span, TokenKind)]) -> Vec<Vec<(Span, TokenKind)>> {
    let mut sequences = Vec::new();
    let mut current: Vec<(Span, TokenKind)> = Vec::new();

    for &(span, kind) in hits {
        match current.last() {
            Some(&(last_span, _)) => {
                let gap = &text[last_span.end..span.start];
                if gap_allows_merge(gap) {
                    current.push((span, kind));
                } else {
                    sequences.push(std::mem::replace(&mut current, vec![(span, kind)]));
                }
            }
            None => current.push((span, kind)),
        }
    }
    if !current.is_empty() {
        sequences.push(current);
    }
    sequences
}

fn gap_allows_merge(gap: &str) -> bool {
    if gap.len() > MAX_GAP_BYTES {
        return false;
    }
    let trimmed = gap.trim();
    if trimmed.is_empty() {
        return true;
    }
    let mut chars = trimmed.chars();
    if let Some(first) = chars.next() {
        let rest = chars.as_str();
        if first.is_alphabetic() && (rest.is_empty() || rest == ".") {
            return true;
        }
    }
    CONNECTORS.contains(&trimmed.to_lowercase().as_str())
}

fn detect_title_prefix(text: &str, core_start: usize) -> (usize, bool) {
    let before = &text[..core_start];
    let trimmed = before.trim_end();
    let word_start = trimmed
        .rfind(|c: char| c.is_whitespace())
        .map_or(0, |i| i + 1);
    let word = trimmed[word_start..].trim_end_matches('.').to_lowercase();
    if TITLE_PREFIXES.contains(&word.as_str()) {
        (word_start, true)
    } else {
        (core_start, false)
    }
}

fn detect_name_suffix(text: &str, core_end: usize) -> (usize, bool) {
    let after = &text[core_end..];
    let trimmed = after.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    let consumed = after.len() - trimmed.len();
    let word_end = trimmed
        .find(|c: char| !c.is_alphanumeric() && c != '.')
        .unwrap_or(trimmed.len());
    let word = trimmed[..word_end].trim_end_matches('.').to_lowercase();
    if NAME_SUFFIXES.contains(&word.as_str()) {
        (core_end + consumed + word_end, true)
    } else {
        (core_end, false)
    }
}

fn context_around(text: &str, start: usize, end: usize, radius: usize) -> String {
    let mut s = start.saturating_sub(radius);
    while s > 0 && !text.is_char_boundary(s) {
        s -= 1;
    }
    let mut e = (end + radius).min(text.len());
    while e < text.len() && !text.is_char_boundary(e) {
        e += 1;
    }
    text[s..e].to_string()
}

fn has_action_verb(context: &str) -> bool {
    let lower = context.to_lowercase();
    ACTION_VERBS.iter().any(|v| lower.contains(v))
}

fn has_bio_marker(context: &str) -> bool {
    let lower = context.to_lowercase();
    BIO_MARKERS.iter().any(|v| lower.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn recognizer() -> PersonRecognizer {
        let mut lists = HashMap::new();
        lists.insert(person_first_kind(), vec!["john".to_string()]);
        lists.insert(person_last_kind(), vec!["smith".to_string()]);
        lists.insert(EntityKind::Org, vec!["ford".to_string()]);
        let corpus = Arc::new(AutomatonCorpus::build(lists).unwrap());
        PersonRecognizer::new(corpus, PersonBlacklists::from_defaults())
    }

    #[test]
    fn test_accepts_full_name_with_title() {
        let recognizer = recognizer();
        let mentions = recognizer.recognize("Dr. John Smith said the results were conclusive.");
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].text, "Dr. John Smith");
        assert!(mentions[0].confidence.unwrap() >= 0.7);
    }

    #[test]
    fn test_rejects_org_blacklist_name() {
        let recognizer = recognizer();
        let mentions = recognizer.recognize("Ford announced its new plant today.");
        assert!(mentions.is_empty());
    }

    #[test]
    fn test_rejects_single_token_without_strong_context() {
        let recognizer = recognizer();
        let mentions = recognizer.recognize("John walked to the store.");
        assert!(mentions.is_empty());
    }

    #[test]
    fn test_accepts_single_token_with_bio_marker() {
        let recognizer = recognizer();
        let mentions = recognizer.recognize("John was born in 1980 in Ohio.");
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].text, "John");
    }

    #[test]
    fn test_middle_initial_gap_merges_sequence() {
        let recognizer = recognizer();
        let mentions = recognizer.recognize("Dr. John Q. Smith testified before the committee.");
        assert_eq!(mentions.len(), 1);
        assert!(mentions[0].text.contains("John"));
        assert!(mentions[0].text.contains("Smith"));
    }
}
