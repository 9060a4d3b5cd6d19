//! YAML report writer for structure analyses.
//!
//! Produces a machine-readable summary the outer document service attaches
//! to its validation run. The report is a projection of the analysis; it
//! carries no document content.

use std::path::Path;

use serde::Serialize;

use crate::document::write_atomic;
use crate::error::Result;
use crate::types::{StructureAnalysis, StructuralViolation};

/// Chapter summary line in a report.
#[derive(Debug, Serialize)]
struct ReportChapter {
    position: usize,
    roman_numeral: String,
    chapter_number: u32,
    title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    subsections: Vec<String>,
}

/// Full report document.
#[derive(Debug, Serialize)]
struct StructureReport {
    generated_at: String,
    block_count: usize,
    chapter_count: usize,
    reordering_needed: bool,
    chapters: Vec<ReportChapter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    violations: Vec<StructuralViolation>,
}

/// Generate the YAML report string for an analysis.
///
/// # Errors
/// Fails only when YAML serialization fails.
pub fn generate_report(analysis: &StructureAnalysis, block_count: usize) -> Result<String> {
    let chapters = analysis
        .chapters_by_position
        .iter()
        .map(|c| ReportChapter {
            position: c.position,
            roman_numeral: c.roman_numeral.clone(),
            chapter_number: c.chapter_number,
            title: c.title.clone(),
            subsections: c
                .subsections
                .iter()
                .map(|s| format!("{} {}", s.label, s.title))
                .collect(),
        })
        .collect();

    let report = StructureReport {
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        block_count,
        chapter_count: analysis.chapters_by_position.len(),
        reordering_needed: analysis.reordering_needed,
        chapters,
        violations: analysis.violations.clone(),
    };

    let yaml = serde_yaml_ng::to_string(&report)?;
    Ok(format!("---\n{yaml}"))
}

/// Save the YAML report next to the caller's other outputs.
///
/// Uses the same atomic write pattern as document snapshots.
///
/// # Errors
/// Serialization or storage failure; an existing file at `path` survives
/// any failure untouched.
pub fn save_report(analysis: &StructureAnalysis, block_count: usize, path: &Path) -> Result<()> {
    let content = generate_report(analysis, block_count)?;
    write_atomic(path, &content)
}
