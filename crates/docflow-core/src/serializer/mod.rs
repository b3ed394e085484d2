//! Stage 7 output: fixed-order YAML frontmatter, a Markdown body, and an
//! optional JSON sidecar for documents with semantic facts.

pub mod frontmatter;
pub mod json;
pub mod markdown;
pub mod yaml;

pub use frontmatter::Frontmatter;
pub use json::{JsonOptions, JsonSerializer, SemanticSidecar};
pub use markdown::{MarkdownOptions, MarkdownSerializer};
pub use yaml::{YamlOptions, YamlSerializer};
