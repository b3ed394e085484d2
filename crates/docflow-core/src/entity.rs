//! Mentions and canonical entities produced by stages 4 and 5.

use crate::kinds::EntityKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A half-open byte-offset range `[start, end)` into the source markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use = "constructs a new Span, use it or bind it"]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use = "returns span length in bytes"]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use = "returns whether the span is empty"]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `self` fully contains `other`.
    #[must_use = "returns whether self contains other, does not mutate"]
    pub const fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two spans share any byte offset.
    #[must_use = "returns whether the spans overlap, does not mutate"]
    pub const fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A single raw entity occurrence found by a stage 4 recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub span: Span,
    pub text: String,
    pub kind: EntityKind,
    /// Recognizer confidence, when the recognizer scores its matches
    /// (the person recognizer always sets this; dictionary/pattern matches
    /// usually leave it `None`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Supporting context strings collected while scoring the mention
    /// (e.g. the trigger phrase that boosted a person candidate).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<String>,
}

impl Mention {
    #[must_use = "constructs a new Mention, use it or bind it"]
    pub fn new(span: Span, text: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            span,
            text: text.into(),
            kind,
            confidence: None,
            evidence: Vec::new(),
        }
    }
}

/// A reconciled, deduplicated entity produced by stage 5.
///
/// Every [`Mention`] survives normalization attached to exactly one
/// `CanonicalEntity` — that totality is enforced by the normalizer, not by
/// this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEntity {
    pub id: String,
    pub canonical_form: String,
    pub kind: EntityKind,
    pub aliases: Vec<String>,
    pub count: usize,
    pub spans: Vec<Span>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains() {
        let outer = Span::new(0, 10);
        let inner = Span::new(2, 5);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_span_overlaps() {
        let a = Span::new(0, 5);
        let b = Span::new(4, 8);
        let c = Span::new(5, 8);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_span_len_and_empty() {
        let s = Span::new(3, 3);
        assert_eq!(s.len(), 0);
        assert!(s.is_empty());
    }

    #[test]
    fn test_mention_new_has_no_confidence() {
        let m = Mention::new(Span::new(0, 4), "Ford", EntityKind::Org);
        assert!(m.confidence.is_none());
        assert!(m.evidence.is_empty());
    }

    #[test]
    fn test_canonical_entity_serde_roundtrip() {
        let entity = CanonicalEntity {
            id: "ent-1".to_string(),
            canonical_form: "Acme Inc.".to_string(),
            kind: EntityKind::Org,
            aliases: vec!["Acme".to_string(), "Acme Inc.".to_string()],
            count: 2,
            spans: vec![Span::new(0, 4), Span::new(20, 29)],
            metadata: HashMap::new(),
        };
        let json = serde_json::to_string(&entity).unwrap();
        let back: CanonicalEntity = serde_json::from_str(&json).unwrap();
        assert_eq!(entity, back);
    }
}
