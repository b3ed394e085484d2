//! YAML serialization, used by stage 7 to render the frontmatter block.

use crate::document::Document;
use crate::serializer::frontmatter::Frontmatter;

/// Options for YAML serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct YamlOptions {
    _placeholder: (),
}

/// YAML serializer for the frontmatter block and, for debugging, a whole
/// `Document`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct YamlSerializer {
    #[allow(dead_code, reason = "reserved for future serde_yaml formatting options")]
    options: YamlOptions,
}

impl YamlSerializer {
    #[inline]
    #[must_use = "creates serializer with default options"]
    pub const fn new() -> Self {
        Self {
            options: YamlOptions { _placeholder: () },
        }
    }

    #[inline]
    #[must_use = "creates serializer with custom options"]
    pub const fn with_options(options: YamlOptions) -> Self {
        Self { options }
    }

    /// Render the fixed-order frontmatter block for a document, `---`-delimited.
    ///
    /// # Errors
    /// Returns an error if `serde_yaml` fails to serialize the frontmatter.
    #[must_use = "this function returns the frontmatter block that should be written"]
    pub fn serialize_frontmatter(&self, doc: &Document) -> Result<String, serde_yaml::Error> {
        let frontmatter = Frontmatter::from_document(doc);
        let body = serde_yaml::to_string(&frontmatter)?;
        Ok(format!("---\n{body}---\n"))
    }

    /// Serialize an arbitrary `Document` to plain YAML (debugging/inspection,
    /// not the frontmatter format stage 7 writes).
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    #[must_use = "this function returns serialized YAML that should be used"]
    pub fn serialize_document(&self, doc: &Document) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_frontmatter_is_delimited() {
        let doc = Document::new("report.txt");
        let serializer = YamlSerializer::new();
        let yaml = serializer.serialize_frontmatter(&doc).unwrap();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.ends_with("---\n"));
        assert!(yaml.contains("source_name:"));
        assert!(yaml.contains("report.txt"));
    }

    #[test]
    fn test_serialize_document_roundtrip() {
        let mut doc = Document::new("x.txt");
        doc.markdown = "hello world".to_string();
        let serializer = YamlSerializer::new();
        let yaml = serializer.serialize_document(&doc).unwrap();
        let back: Document = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.markdown, "hello world");
        assert_eq!(back.source_name, "x.txt");
    }

    #[test]
    fn test_yaml_serializer_default() {
        let default = YamlSerializer::default();
        let new = YamlSerializer::new();
        assert_eq!(default, new);
    }
}
