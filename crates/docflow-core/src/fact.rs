//! Actionable facts produced by stage 6 (Semantic Analyze).

use crate::entity::Span;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The closed catalog of fact generators (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactKind {
    Requirement,
    Compliance,
    Measurement,
    OrganizationalAction,
    Quantitative,
}

impl FactKind {
    #[must_use = "returns the canonical name for this fact kind"]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requirement => "requirement",
            Self::Compliance => "compliance",
            Self::Measurement => "measurement",
            Self::OrganizationalAction => "organizational_action",
            Self::Quantitative => "quantitative",
        }
    }
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "requirement" => Ok(Self::Requirement),
            "compliance" => Ok(Self::Compliance),
            "measurement" => Ok(Self::Measurement),
            "organizational_action" => Ok(Self::OrganizationalAction),
            "quantitative" => Ok(Self::Quantitative),
            other => Err(format!("unknown fact kind: '{other}'")),
        }
    }
}

impl Serialize for FactKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FactKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A subject/predicate/object triple extracted by stage 6, with sourcing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub confidence: f64,
    pub kind: FactKind,
    pub span: Span,
    /// Up to 200 chars of surrounding text, sentence-boundary aligned where possible.
    pub context: String,
    pub actionable: bool,
}

impl Fact {
    /// Dedup key used by stage 6's suppression rule: facts sharing this key
    /// are collapsed to the highest-confidence one (§4.6).
    #[must_use = "returns the dedup key, does not mutate"]
    pub fn dedup_key(&self) -> (String, String, String) {
        let object_prefix: String = self.object.chars().take(50).collect();
        (self.subject.clone(), self.predicate.clone(), object_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_kind_roundtrip() {
        for kind in [
            FactKind::Requirement,
            FactKind::Compliance,
            FactKind::Measurement,
            FactKind::OrganizationalAction,
            FactKind::Quantitative,
        ] {
            let s = kind.to_string();
            assert_eq!(FactKind::from_str(&s).unwrap(), kind);
        }
    }

    #[test]
    fn test_fact_kind_unknown_errors() {
        assert!(FactKind::from_str("bogus").is_err());
    }

    #[test]
    fn test_dedup_key_truncates_object_to_50_chars() {
        let fact = Fact {
            subject: "Personnel".to_string(),
            predicate: "MUST_COMPLY_WITH".to_string(),
            object: "a".repeat(80),
            confidence: 0.9,
            kind: FactKind::Requirement,
            span: Span::new(0, 10),
            context: String::new(),
            actionable: true,
        };
        let (_, _, object_prefix) = fact.dedup_key();
        assert_eq!(object_prefix.len(), 50);
    }

    #[test]
    fn test_fact_serde_roundtrip() {
        let fact = Fact {
            subject: "workers".to_string(),
            predicate: "MUST_COMPLY_WITH".to_string(),
            object: "hard hats".to_string(),
            confidence: 0.85,
            kind: FactKind::Requirement,
            span: Span::new(10, 42),
            context: "All workers must wear hard hats on site.".to_string(),
            actionable: true,
        };
        let json = serde_json::to_string(&fact).unwrap();
        let back: Fact = serde_json::from_str(&json).unwrap();
        assert_eq!(fact, back);
    }
}
