//! Closed enumerations replacing the string-typed kinds, domains,
//! document-types and strategies of the source system.
//!
//! Parsing happens at the boundary only (corpus/config file loading, CLI
//! argument parsing); everywhere else these are matched exhaustively.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Entity kind tag attached to a [`crate::entity::Mention`] or
/// [`crate::entity::CanonicalEntity`].
///
/// The core kinds are closed; [`EntityKind::Other`] carries any
/// domain-specific tag supplied by a loaded word-list file that isn't one of
/// the named variants, so the corpus can grow without a code change while
/// recognizer dispatch logic still matches exhaustively on the common kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Org,
    Gpe,
    Date,
    Time,
    Money,
    Measurement,
    Location,
    Regulation,
    Email,
    Url,
    Phone,
    Chemical,
    Percentage,
    /// Domain-specific tag not covered by the closed set above.
    Other(String),
}

impl EntityKind {
    #[must_use = "returns the canonical lowercase name for this kind"]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Gpe => "GPE",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Money => "MONEY",
            Self::Measurement => "MEASUREMENT",
            Self::Location => "LOCATION",
            Self::Regulation => "REGULATION",
            Self::Email => "EMAIL",
            Self::Url => "URL",
            Self::Phone => "PHONE",
            Self::Chemical => "CHEMICAL",
            Self::Percentage => "PERCENTAGE",
            Self::Other(tag) => tag.as_str(),
        }
    }

    /// Cross-kind reconciliation priority used by stage 5 overlap handling
    /// (PERSON > ORG > LOCATION > other).
    #[must_use = "returns the reconciliation priority, higher wins ties"]
    pub const fn reconciliation_priority(&self) -> u8 {
        match self {
            Self::Person => 3,
            Self::Org => 2,
            Self::Location | Self::Gpe => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "PERSON" => Self::Person,
            "ORG" => Self::Org,
            "GPE" => Self::Gpe,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "MONEY" => Self::Money,
            "MEASUREMENT" => Self::Measurement,
            "LOCATION" => Self::Location,
            "REGULATION" => Self::Regulation,
            "EMAIL" => Self::Email,
            "URL" => Self::Url,
            "PHONE" => Self::Phone,
            "CHEMICAL" => Self::Chemical,
            "PERCENTAGE" => Self::Percentage,
            other => Self::Other(other.to_string()),
        })
    }
}

impl Serialize for EntityKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_str(&s).expect("EntityKind::from_str is infallible"))
    }
}

/// Document subject-area label assigned by keyword-density scoring.
///
/// `General` is always present with score 1.0 so the classifier's argmax is
/// never undefined (§4.3). `Other` carries any domain name loaded from a
/// custom keyword-set directory that doesn't match the built-in set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Domain {
    Safety,
    Regulatory,
    Financial,
    Engineering,
    General,
    Other(String),
}

impl Domain {
    #[must_use = "returns the canonical lowercase name for this domain"]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Safety => "safety",
            Self::Regulatory => "regulatory",
            Self::Financial => "financial",
            Self::Engineering => "engineering",
            Self::General => "general",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "safety" => Self::Safety,
            "regulatory" => Self::Regulatory,
            "financial" => Self::Financial,
            "engineering" => Self::Engineering,
            "general" => Self::General,
            other => Self::Other(other.to_string()),
        })
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Domain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_str(&s).expect("Domain::from_str is infallible"))
    }
}

/// Document purpose label, orthogonal to [`Domain`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocType {
    Technical,
    Legal,
    Safety,
    Financial,
    General,
    Other(String),
}

impl DocType {
    #[must_use = "returns the canonical lowercase name for this doc type"]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Technical => "technical",
            Self::Legal => "legal",
            Self::Safety => "safety",
            Self::Financial => "financial",
            Self::General => "general",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "technical" => Self::Technical,
            "legal" => Self::Legal,
            "safety" => Self::Safety,
            "financial" => Self::Financial,
            "general" => Self::General,
            other => Self::Other(other.to_string()),
        })
    }
}

impl Serialize for DocType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DocType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_str(&s).expect("DocType::from_str is infallible"))
    }
}

/// Conversion/extraction strategy selected via `--strategy` (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Fast,
    Vlm,
    Hybrid,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fast => "fast",
            Self::Vlm => "vlm",
            Self::Hybrid => "hybrid",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "vlm" => Ok(Self::Vlm),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(format!("unknown strategy: '{other}'")),
        }
    }
}
