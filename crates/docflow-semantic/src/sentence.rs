//! Sentence splitting and the small text-window helpers the fact
//! generators share.

use docflow_core::{CanonicalEntity, Span};
use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+(?:\s+|$)").unwrap());
static MARKDOWN_ARTIFACTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#*_`]|\[([^\]]*)\]\([^)]*\)").unwrap());
static REGULATION_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bCFR\b|\bOSHA\b|\bregulation\b").unwrap());
static NUMERIC_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

/// Whether `text` names a regulatory citation by the shallow CFR/OSHA/
/// "regulation" heuristic every generator's confidence boost shares.
#[must_use = "returns whether a regulatory citation is present, does not mutate anything"]
pub fn mentions_regulation(text: &str) -> bool {
    REGULATION_HINT.is_match(text)
}

/// The uniform confidence formula every fact generator shares (§4.6): a
/// 0.6 base, +0.2 for a strong modal, +0.15 when the sentence names a
/// regulatory citation, +0.1 when the object carries a numeric token,
/// +0.1 when the object is at least 20 characters, +0.05 for the
/// generator's own category-specific signal. Capped at 1.0.
#[must_use = "returns the computed confidence, does not mutate anything"]
pub fn score_fact(sentence: &str, object: &str, strong_modal: bool, category_boost: bool) -> f64 {
    let mut confidence: f64 = 0.6;
    if strong_modal {
        confidence += 0.2;
    }
    if mentions_regulation(sentence) {
        confidence += 0.15;
    }
    if NUMERIC_TOKEN.is_match(object) {
        confidence += 0.1;
    }
    if object.trim().chars().count() >= 20 {
        confidence += 0.1;
    }
    if category_boost {
        confidence += 0.05;
    }
    confidence.min(1.0)
}

/// Split `text` into `(span, sentence)` pairs, spans in document byte
/// offsets with surrounding whitespace trimmed off both ends.
#[must_use = "returns the sentence spans, does not mutate anything"]
pub fn split_sentences(text: &str) -> Vec<(Span, String)> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BOUNDARY.find_iter(text) {
        push_trimmed(text, start, m.end(), &mut sentences);
        start = m.end();
    }
    if start < text.len() {
        push_trimmed(text, start, text.len(), &mut sentences);
    }
    sentences
}

fn push_trimmed(text: &str, start: usize, end: usize, out: &mut Vec<(Span, String)>) {
    let raw = &text[start..end];
    let leading_ws = raw.len() - raw.trim_start().len();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let seg_start = start + leading_ws;
    out.push((Span::new(seg_start, seg_start + trimmed.len()), trimmed.to_string()));
}

/// Canonical entities whose first span falls inside `span`.
#[must_use = "returns the matching entities, does not mutate anything"]
pub fn entities_in_span<'a>(entities: &'a [CanonicalEntity], span: Span) -> Vec<&'a CanonicalEntity> {
    entities
        .iter()
        .filter(|e| e.spans.iter().any(|s| span.contains(s)))
        .collect()
}

/// The leading capitalized run of `sentence` up to `rel_start` (a byte
/// offset local to `sentence`) — the sentence's own subject, in the
/// common "Subject verb ... object" shape — falling back to
/// `"Document"` when the sentence doesn't open with one.
#[must_use = "returns the inferred subject phrase, does not mutate anything"]
pub fn preceding_subject(sentence: &str, rel_start: usize) -> String {
    let cut = rel_start.min(sentence.len());
    let before = &sentence[..cut];
    let mut subject_words: Vec<&str> = Vec::new();
    for word in before.split_whitespace() {
        let trimmed = word.trim_matches(|c: char| !c.is_alphanumeric());
        if trimmed.chars().next().is_some_and(char::is_uppercase) {
            subject_words.push(trimmed);
        } else {
            break;
        }
    }
    if subject_words.is_empty() {
        "Document".to_string()
    } else {
        subject_words.join(" ")
    }
}

/// Strip common markdown syntax, collapse whitespace, and truncate at a
/// word boundary to at most `max_len` bytes, appending an ellipsis when
/// truncated.
#[must_use = "returns the cleaned context string, does not mutate anything"]
pub fn clean_context(sentence: &str, max_len: usize) -> String {
    let cleaned = MARKDOWN_ARTIFACTS.replace_all(sentence, "$1");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_at_word_boundary(&collapsed, max_len)
}

fn truncate_at_word_boundary(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }
    let mut cut = max_len;
    while cut > 0 && !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let mut truncated = &text[..cut];
    if let Some(last_space) = truncated.rfind(' ') {
        truncated = &truncated[..last_space];
    }
    format!("{}\u{2026}", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_basic() {
        let text = "Personnel must wear hard hats. Visitors shall sign in.";
        let sentences = split_sentences(text);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].1, "Visitors shall sign in.");
    }

    #[test]
    fn test_split_sentences_spans_point_back_into_text() {
        let text = "First sentence. Second sentence.";
        let sentences = split_sentences(text);
        let (span, content) = &sentences[1];
        assert_eq!(&text[span.start..span.end], content);
    }

    #[test]
    fn test_preceding_subject_falls_back_to_document() {
        assert_eq!(preceding_subject("the beam spans 12 ft", 20), "Document");
    }

    #[test]
    fn test_preceding_subject_captures_capitalized_run() {
        assert_eq!(
            preceding_subject("Beam Seven spans 12 ft", 11),
            "Beam Seven"
        );
    }

    #[test]
    fn test_score_fact_sums_all_boosts() {
        let confidence = score_fact(
            "OSHA regulation 29 CFR 1926.95 applies here.",
            "at least 6 feet above the working surface",
            true,
            true,
        );
        assert_eq!(confidence, 1.0);
    }

    #[test]
    fn test_score_fact_base_only() {
        let confidence = score_fact("Workers wear hats.", "hats", false, false);
        assert_eq!(confidence, 0.6);
    }

    #[test]
    fn test_clean_context_strips_markdown_and_truncates() {
        let sentence = "**Acme** [Corp](https://acme.test) reported a `10%` increase across its entire fiscal year operations today";
        let cleaned = clean_context(sentence, 40);
        assert!(!cleaned.contains('*'));
        assert!(!cleaned.contains('`'));
        assert!(cleaned.ends_with('\u{2026}'));
    }
}
