//! Error types for the restructurer.
//!
//! Fatal conditions (bad configuration, storage failures) are errors here.
//! Per-chapter findings the caller can act on are not: they are reported as
//! [`crate::types::StructuralViolation`] entries inside the analysis. A
//! failed Roman-numeral parse during extraction is recovered locally and
//! never surfaces as an error.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the restructurer library.
#[derive(Debug, Error)]
pub enum RestructureError {
    /// Roman numeral contains characters outside the supported alphabet.
    #[error("Invalid Roman numeral '{0}': only the characters I, V and X are allowed")]
    InvalidNumeral(String),

    /// Grammar configuration cannot be compiled into matchers.
    #[error("Invalid grammar configuration: {0}")]
    InvalidGrammar(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document snapshot could not be read or written as JSON.
    #[error("Document serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Report serialization failed.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Reading or writing a stored file failed. Writes are staged through a
    /// temp file, so a previously stored version survives any failure.
    #[error("Storage failure for {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for restructurer operations.
pub type Result<T> = std::result::Result<T, RestructureError>;
