//! Skripsi Restructurer - Analyze and repair the chapter structure of thesis documents.
//!
//! This crate discovers the chapter/subsection hierarchy of a thesis
//! document from its ordered paragraph blocks, diagnoses whether the
//! physical chapter order matches the canonical (numeric) order, and
//! rebuilds the document in correct order without losing content or
//! formatting, renumbering subsections consistently.
//!
//! # Example
//!
//! ```
//! use skripsi_restructurer::{analyze_structure, Block, GrammarConfig};
//!
//! let blocks = vec![
//!     Block::paragraph("BAB II TINJAUAN PUSTAKA"),
//!     Block::paragraph("BAB I PENDAHULUAN"),
//! ];
//!
//! let analysis = analyze_structure(&blocks, &GrammarConfig::default()).unwrap();
//! assert!(analysis.reordering_needed);
//! ```
//!
//! All operations are synchronous, pure projections of an immutable
//! document snapshot; nothing mutates the source. Callers that share a
//! mutable document store must serialize operations per document
//! themselves.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`]: Grammar and style configuration
//! - [`types`]: Core data types (Block, Run, ChapterRecord, etc.)
//! - [`error`]: Error types and Result alias
//! - [`numeral`]: Roman numeral conversion over {I, V, X}
//! - [`structure`]: Chapter extraction, boundaries and order diagnosis
//! - [`rebuild`]: Canonical-order rebuild and subsection renumbering
//! - [`preview`]: Before/after projection for caller confirmation
//! - [`restructurer`]: Main restructuring service
//! - [`document`]: Document snapshot adapter (JSON)
//! - [`report`]: YAML analysis report writer
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod numeral;
pub mod preview;
pub mod rebuild;
pub mod report;
pub mod restructurer;
pub mod structure;
pub mod types;

// Re-export main operations
pub use preview::preview;
pub use restructurer::{restructure, restructure_confirmed, ConfirmationChannel};
pub use structure::analyze_structure;

// Re-export commonly used items
pub use config::{GrammarConfig, StyleConfig, TextStyle};
pub use error::{RestructureError, Result};
pub use preview::{PreviewEntry, PreviewProjection};
pub use types::{
    Block, ChapterRecord, RestructureOptions, RestructureResult, Run, StructureAnalysis,
    StructuralViolation,
};
