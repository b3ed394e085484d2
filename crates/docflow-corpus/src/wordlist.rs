//! Loads one UTF-8 word-list file per entity/domain/doc-type keyword set
//! (§6). One entry per line, lowercased, blank/whitespace-only lines
//! ignored. A missing file is not fatal — it yields an empty list and a
//! warning, since startup should still succeed with a partial corpus.

use std::path::Path;
use tracing::warn;

/// Read a word-list file into lowercased, trimmed, non-empty lines.
///
/// Returns an empty `Vec` (with a warning logged) if `path` doesn't exist or
/// can't be read, rather than failing — only corpus files explicitly
/// required at startup escalate to [`docflow_core::DocFlowError::Fatal`].
#[must_use = "returns the loaded word list, does not mutate any corpus"]
pub fn load_word_list(path: &Path) -> Vec<String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "word-list file missing, using empty list");
            return Vec::new();
        }
    };
    parse_word_list(&contents)
}

/// Parse word-list contents already read into memory (used for both
/// user-supplied directories and the built-in embedded defaults).
#[must_use = "returns the parsed word list, does not mutate any corpus"]
pub fn parse_word_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}
