//! Stage 1's `Decoder` capability (§4.1, §6). Source-format decoding
//! (PDF, DOCX, HTML) is an explicit non-goal of the core; this crate
//! ships only the plain-text fallback so the pipeline is runnable
//! end-to-end without an external decoder registered.

use docflow_core::DocFlowError;
use std::path::Path;

const CHARS_PER_PAGE: usize = 3000;

/// A collaborator that turns a source file into Markdown text plus a
/// page count. Looked up by lowercased extension (without the leading
/// dot); the pipeline tries decoders in registration order and uses the
/// first one whose `supports` returns true.
pub trait Decoder: Send + Sync {
    fn supports(&self, extension: &str) -> bool;
    fn decode(&self, path: &Path) -> Result<(String, usize), DocFlowError>;
    fn engine_id(&self) -> &str;
}

/// Reads the file as UTF-8 text unchanged; imputes a page count of
/// `max(1, len(text) / 3000)` characters per page since plain text
/// carries no page boundaries (§4.1).
pub struct PlainTextDecoder;

impl Decoder for PlainTextDecoder {
    fn supports(&self, extension: &str) -> bool {
        matches!(extension, "txt" | "md" | "markdown")
    }

    fn decode(&self, path: &Path) -> Result<(String, usize), DocFlowError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DocFlowError::DecodeFailure(format!("{}: {e}", path.display())))?;
        let page_count = (text.len() / CHARS_PER_PAGE).max(1);
        Ok((text, page_count))
    }

    fn engine_id(&self) -> &str {
        "plain-text"
    }
}

/// Picks the first decoder in `decoders` that supports `path`'s
/// extension. Returns `None` for an unsupported or missing extension —
/// the caller turns that into `DocFlowError::Skip` (§4.1, §7).
#[must_use = "returns the matching decoder, does not decode anything"]
pub fn select_decoder<'a>(decoders: &'a [Box<dyn Decoder>], path: &Path) -> Option<&'a dyn Decoder> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    decoders
        .iter()
        .find(|d| d.supports(&extension))
        .map(|d| d.as_ref())
}
