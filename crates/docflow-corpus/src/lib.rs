//! Corpus loading and the compiled, read-only recognizer inputs shared
//! across worker threads: the dictionary automaton corpus, the regex
//! pattern catalog, and the built-in classification keyword sets.
//!
//! Everything this crate produces is built once at pool construction and
//! never mutated afterward (§5 shared resources).

pub mod automaton;
pub mod defaults;
pub mod pattern;
pub mod wordlist;

pub use automaton::AutomatonCorpus;
pub use pattern::{default_patterns, PatternCatalog, PatternSpec};
