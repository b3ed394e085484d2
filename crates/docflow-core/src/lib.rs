//! Core data model and error types for the document processing pipeline.
//!
//! This crate defines the [`Document`] record that flows through the seven
//! pipeline stages (Convert, Process, Classify, Extract Entities, Normalize,
//! Semantic Analyze, Write), the entity and fact types stages 4-6 produce,
//! and the frontmatter/JSON serializers stage 7 uses to write results.
//!
//! Recognition, normalization and semantic analysis themselves live in
//! `docflow-extract`, `docflow-normalize` and `docflow-semantic`; this crate
//! only defines the shapes they operate on and the errors they can raise.
//!
//! ## Quick Start
//!
//! ```
//! use docflow_core::Document;
//!
//! let mut doc = Document::new("report.txt");
//! doc.markdown = "All workers must wear hard hats.".to_string();
//! doc.record_timing("convert", 0.4);
//! assert!(doc.success);
//! ```
//!
//! ## Module Organization
//!
//! - [`document`] - The [`Document`] record and per-stage metadata
//! - [`entity`] - [`Span`], [`Mention`], [`CanonicalEntity`]
//! - [`fact`] - [`Fact`] and [`FactKind`]
//! - [`kinds`] - Closed enums: [`EntityKind`], [`Domain`], [`DocType`], [`Strategy`]
//! - [`serializer`] - Markdown frontmatter, YAML and JSON sidecar output
//! - [`error`] - [`DocFlowError`] and the pipeline's [`Result`] alias

pub mod document;
pub mod entity;
pub mod error;
pub mod fact;
pub mod kinds;
pub mod serializer;

pub use document::{ClassificationRecord, ConversionMeta, Document, RoutingDecision};
pub use entity::{CanonicalEntity, Mention, Span};
pub use error::{DocFlowError, Result};
pub use fact::{Fact, FactKind};
pub use kinds::{Domain, DocType, EntityKind, Strategy};
