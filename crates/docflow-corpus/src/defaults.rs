//! Built-in word lists, embedded at compile time so the pipeline has a
//! working corpus even when no external word-list directory is configured.
//! A configured directory's files take precedence per entity kind; these
//! are the fallback.

use crate::wordlist::parse_word_list;
use docflow_core::kinds::{Domain, DocType};

pub const PERSON_FIRST: &str = include_str!("../wordlists/person_first.txt");
pub const PERSON_LAST: &str = include_str!("../wordlists/person_last.txt");
pub const ORG: &str = include_str!("../wordlists/org.txt");
pub const GPE: &str = include_str!("../wordlists/gpe.txt");
pub const FOUNDER_BLACKLIST: &str = include_str!("../wordlists/founder_blacklist.txt");
pub const TECH_COMPANY: &str = include_str!("../wordlists/tech_company.txt");
pub const COMMON_WORD_NAME: &str = include_str!("../wordlists/common_word_name.txt");
pub const GEOGRAPHIC_OVERLAP: &str = include_str!("../wordlists/geographic_overlap.txt");
pub const PUBLICATION_OVERLAP: &str = include_str!("../wordlists/publication_overlap.txt");

const DOMAIN_SAFETY: &str = include_str!("../wordlists/domain_safety.txt");
const DOMAIN_REGULATORY: &str = include_str!("../wordlists/domain_regulatory.txt");
const DOMAIN_FINANCIAL: &str = include_str!("../wordlists/domain_financial.txt");
const DOMAIN_ENGINEERING: &str = include_str!("../wordlists/domain_engineering.txt");

const DOCTYPE_TECHNICAL: &str = include_str!("../wordlists/doctype_technical.txt");
const DOCTYPE_LEGAL: &str = include_str!("../wordlists/doctype_legal.txt");
const DOCTYPE_SAFETY: &str = include_str!("../wordlists/doctype_safety.txt");
const DOCTYPE_FINANCIAL: &str = include_str!("../wordlists/doctype_financial.txt");

/// Built-in `(domain, keywords)` pairs used by stage 3 (Classify). `General`
/// carries no keywords — its score of 1.0 is added unconditionally by the
/// classifier, never from keyword matches (§4.3).
#[must_use = "returns the default domain keyword table, does not mutate any corpus"]
pub fn default_domain_keywords() -> Vec<(Domain, Vec<String>)> {
    vec![
        (Domain::Safety, parse_word_list(DOMAIN_SAFETY)),
        (Domain::Regulatory, parse_word_list(DOMAIN_REGULATORY)),
        (Domain::Financial, parse_word_list(DOMAIN_FINANCIAL)),
        (Domain::Engineering, parse_word_list(DOMAIN_ENGINEERING)),
    ]
}

/// Built-in `(doc_type, keywords)` pairs used by stage 3 (Classify).
#[must_use = "returns the default doc-type keyword table, does not mutate any corpus"]
pub fn default_doc_type_keywords() -> Vec<(DocType, Vec<String>)> {
    vec![
        (DocType::Technical, parse_word_list(DOCTYPE_TECHNICAL)),
        (DocType::Legal, parse_word_list(DOCTYPE_LEGAL)),
        (DocType::Safety, parse_word_list(DOCTYPE_SAFETY)),
        (DocType::Financial, parse_word_list(DOCTYPE_FINANCIAL)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_domain_keywords_nonempty() {
        for (_, keywords) in default_domain_keywords() {
            assert!(!keywords.is_empty());
        }
    }

    #[test]
    fn test_default_doc_type_keywords_nonempty() {
        for (_, keywords) in default_doc_type_keywords() {
            assert!(!keywords.is_empty());
        }
    }

    #[test]
    fn test_person_first_parses() {
        let names = parse_word_list(PERSON_FIRST);
        assert!(names.contains(&"john".to_string()));
    }
}
