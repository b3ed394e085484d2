//! Markdown + frontmatter output for stage 7 (Write).
//!
//! Successful documents are written as `<stem>.md`: a YAML frontmatter
//! block (via [`crate::serializer::yaml::YamlSerializer`]) followed by the
//! document body. Writes are atomic — render to a tempfile in the target
//! directory, then rename over the destination — so a crash never leaves a
//! half-written file on disk (§7 user-visible guarantee).

use crate::document::Document;
use crate::error::{DocFlowError, Result};
use crate::serializer::json::JsonSerializer;
use crate::serializer::yaml::YamlSerializer;
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Options for Markdown rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkdownOptions {
    /// Minimum YAML block width before `serde_yaml` wraps scalar values.
    pub frontmatter_width: usize,
}

impl Default for MarkdownOptions {
    #[inline]
    fn default() -> Self {
        Self {
            frontmatter_width: 120,
        }
    }
}

/// Renders a `Document` to its final on-disk Markdown form and writes it,
/// plus the optional semantic sidecar, atomically.
#[derive(Debug, Clone, Default)]
pub struct MarkdownSerializer {
    options: MarkdownOptions,
    yaml: YamlSerializer,
    json: JsonSerializer,
}

impl MarkdownSerializer {
    #[inline]
    #[must_use = "creates serializer with default options"]
    pub fn new() -> Self {
        Self {
            options: MarkdownOptions::default(),
            yaml: YamlSerializer::new(),
            json: JsonSerializer::new(),
        }
    }

    #[inline]
    #[must_use = "creates serializer with custom options"]
    pub fn with_options(options: MarkdownOptions) -> Self {
        Self {
            options,
            ..Self::new()
        }
    }

    /// Render the frontmatter + body that would be written for `doc`.
    ///
    /// # Errors
    /// Returns an error if the frontmatter fails to serialize.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let _ = self.options.frontmatter_width;
        let frontmatter = self.yaml.serialize_frontmatter(doc)?;
        Ok(format!("{frontmatter}\n{}\n", doc.markdown))
    }

    /// Write `<stem>.md`, and `<stem>_semantic.json` if the document has
    /// semantic facts, under `output_dir`. Failed documents write nothing
    /// (§4.7, §7 Write-failure policy); callers record the failure in the
    /// batch report instead.
    ///
    /// # Errors
    /// Returns a [`DocFlowError::WriteFailure`] if either atomic write fails.
    pub fn write(&self, doc: &Document, output_dir: &Path) -> Result<Vec<PathBuf>> {
        if !doc.success {
            return Ok(Vec::new());
        }

        let mut written = Vec::new();

        let markdown_path = output_dir.join(format!("{}.md", doc.source_stem));
        let rendered = self.render(doc)?;
        atomic_write(&markdown_path, rendered.as_bytes())?;
        written.push(markdown_path);

        if let Some(sidecar) = self
            .json
            .serialize_sidecar(doc)
            .map_err(|e| DocFlowError::WriteFailure(e.to_string()))?
        {
            let sidecar_path = output_dir.join(format!("{}_semantic.json", doc.source_stem));
            atomic_write(&sidecar_path, sidecar.as_bytes())?;
            written.push(sidecar_path);
        }

        Ok(written)
    }
}

/// Write `contents` to `path` via a tempfile in the same directory followed
/// by a rename, so readers never observe a partial file.
fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| DocFlowError::WriteFailure(e.to_string()))?;
    tmp.write_all(contents)
        .map_err(|e| DocFlowError::WriteFailure(e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| DocFlowError::WriteFailure(e.error.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ConversionMeta;
    use chrono::Utc;
    use tempfile::tempdir;

    #[test]
    fn test_render_contains_frontmatter_and_body() {
        let mut doc = Document::new("notice.txt");
        doc.markdown = "All workers must wear hard hats.".to_string();
        doc.conversion_meta = Some(ConversionMeta {
            engine_id: "txt".to_string(),
            timestamp: Utc::now(),
            byte_size: 33,
        });

        let serializer = MarkdownSerializer::new();
        let rendered = serializer.render(&doc).unwrap();
        assert!(rendered.starts_with("---\n"));
        assert!(rendered.contains("hard hats"));
    }

    #[test]
    fn test_write_creates_markdown_file() {
        let dir = tempdir().unwrap();
        let mut doc = Document::new("notice.txt");
        doc.markdown = "content".to_string();

        let serializer = MarkdownSerializer::new();
        let written = serializer.write(&doc, dir.path()).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("notice.md"));
        assert!(written[0].exists());
    }

    #[test]
    fn test_write_skips_failed_document() {
        let dir = tempdir().unwrap();
        let mut doc = Document::new("broken.pdf");
        doc.mark_failed("decoder crashed");

        let serializer = MarkdownSerializer::new();
        let written = serializer.write(&doc, dir.path()).unwrap();
        assert!(written.is_empty());
        assert!(!dir.path().join("broken.md").exists());
    }

    #[test]
    fn test_write_emits_sidecar_when_facts_present() {
        use crate::entity::Span;
        use crate::fact::{Fact, FactKind};

        let dir = tempdir().unwrap();
        let mut doc = Document::new("osha.txt");
        doc.markdown = "text".to_string();
        doc.semantic_facts = Some(vec![Fact {
            subject: "workers".to_string(),
            predicate: "MUST_COMPLY_WITH".to_string(),
            object: "hard hats".to_string(),
            confidence: 0.9,
            kind: FactKind::Requirement,
            span: Span::new(0, 5),
            context: "ctx".to_string(),
            actionable: true,
        }]);

        let serializer = MarkdownSerializer::new();
        let written = serializer.write(&doc, dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("osha_semantic.json").exists());
    }
}
