//! The process-wide dictionary-recognizer corpus: one Aho-Corasick
//! automaton per entity kind, built once at pool startup and shared
//! read-only for the lifetime of the pool (§3 Automaton corpus, §4.4.1).

use aho_corasick::AhoCorasick;
use docflow_core::kinds::EntityKind;
use docflow_core::{DocFlowError, Mention, Span};
use std::collections::HashMap;

/// Immutable, process-wide mapping from entity kind to its compiled
/// dictionary automaton.
pub struct AutomatonCorpus {
    automatons: HashMap<EntityKind, AhoCorasick>,
    keywords: HashMap<EntityKind, Vec<String>>,
}

impl AutomatonCorpus {
    /// Build one automaton per non-empty word list. Kinds with an empty
    /// list are simply absent from the corpus — [`AutomatonCorpus::scan`]
    /// returns no mentions for them rather than erroring.
    ///
    /// # Errors
    /// Returns [`DocFlowError::Fatal`] if a pattern set fails to compile;
    /// per §7 this is a startup failure, never a per-document one.
    pub fn build(
        word_lists: HashMap<EntityKind, Vec<String>>,
    ) -> Result<Self, DocFlowError> {
        let mut automatons = HashMap::with_capacity(word_lists.len());
        let mut keywords = HashMap::with_capacity(word_lists.len());

        for (kind, words) in word_lists {
            if words.is_empty() {
                continue;
            }
            let automaton = AhoCorasick::new(&words).map_err(|e| {
                DocFlowError::Fatal(format!("automaton build failed for {kind}: {e}"))
            })?;
            automatons.insert(kind.clone(), automaton);
            keywords.insert(kind, words);
        }

        Ok(Self {
            automatons,
            keywords,
        })
    }

    /// Scan already-lowercased text once for the given kind, applying the
    /// word-boundary filter by direct character inspection (not regex).
    /// Matching runs entirely on `lowercased_text`, but each returned
    /// [`Mention`] is sliced out of `original_text` at the same byte
    /// offsets, so the mention's `text` preserves the document's actual
    /// casing rather than the folded copy used to find it. The two
    /// strings must agree byte-for-byte outside of case.
    #[must_use = "returns the mentions found, does not mutate the corpus"]
    pub fn scan(&self, kind: &EntityKind, lowercased_text: &str, original_text: &str) -> Vec<Mention> {
        let Some(automaton) = self.automatons.get(kind) else {
            return Vec::new();
        };
        let words = &self.keywords[kind];

        automaton
            .find_iter(lowercased_text)
            .filter(|m| is_word_boundary(lowercased_text, m.start(), m.end()))
            .map(|m| {
                let canonical = &words[m.pattern().as_usize()];
                let mut mention = Mention::new(
                    Span::new(m.start(), m.end()),
                    &original_text[m.start()..m.end()],
                    kind.clone(),
                );
                mention.evidence.push(canonical.clone());
                mention
            })
            .collect()
    }

    #[must_use = "returns whether this kind has a compiled automaton"]
    pub fn has_kind(&self, kind: &EntityKind) -> bool {
        self.automatons.contains_key(kind)
    }

    /// Every kind with a compiled automaton, in no particular order.
    #[must_use = "returns the compiled kinds, does not mutate the corpus"]
    pub fn kinds(&self) -> Vec<EntityKind> {
        self.automatons.keys().cloned().collect()
    }
}

/// A match is word-bounded when the character immediately before `start`
/// and the character at `end` (if present) are neither alphanumeric nor an
/// apostrophe — so `"ford"` doesn't match inside `"Fordham"`.
fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !(c.is_alphanumeric() || c == '\''));
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !(c.is_alphanumeric() || c == '\''));
    before_ok && after_ok
}
