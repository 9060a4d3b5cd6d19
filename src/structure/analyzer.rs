//! Order diagnosis over extracted chapters.

use std::collections::HashSet;

use crate::config::GrammarConfig;
use crate::error::Result;
use crate::structure::boundary::resolve_boundaries;
use crate::structure::extractor::{attach_subsections, extract_chapters};
use crate::types::{Block, Severity, StructureAnalysis, StructuralViolation, ViolationKind};

/// Analyze the chapter structure of a document snapshot.
///
/// Pure function of the block sequence and grammar: extracts chapters,
/// resolves content boundaries, attributes subsections, and diagnoses the
/// physical order against the canonical (ascending numeric) order. A
/// document without any chapter heading is not an error; it yields an empty
/// chapter list with `reordering_needed = false`.
///
/// # Errors
/// Only grammar compilation can fail; all structural findings are reported
/// in `violations` instead.
pub fn analyze_structure(blocks: &[Block], grammar: &GrammarConfig) -> Result<StructureAnalysis> {
    let compiled = grammar.compile()?;

    let (mut chapters, mut violations) = extract_chapters(blocks, &compiled);
    let boundaries = resolve_boundaries(&chapters, blocks.len());
    attach_subsections(&mut chapters, &boundaries, blocks, &compiled);

    // Stable sort keeps source order for chapters sharing a number
    let mut canonical_order = chapters.clone();
    canonical_order.sort_by_key(|c| c.chapter_number);

    let current: Vec<u32> = chapters.iter().map(|c| c.chapter_number).collect();
    let sorted: Vec<u32> = canonical_order.iter().map(|c| c.chapter_number).collect();
    let reordering_needed = current != sorted;

    if reordering_needed {
        violations.push(StructuralViolation::new(
            ViolationKind::ChapterOrder,
            Severity::Error,
            format!("Chapters are not in correct order: found {current:?}, should be {sorted:?}"),
        ));
    }

    let mut seen = HashSet::new();
    for chapter in &chapters {
        if !seen.insert(chapter.chapter_number) {
            violations.push(
                StructuralViolation::new(
                    ViolationKind::DuplicateChapterNumber,
                    Severity::Warning,
                    format!(
                        "Chapter number {} ({}) appears more than once",
                        chapter.chapter_number, chapter.roman_numeral
                    ),
                )
                .at_chapter(chapter.position),
            );
        }
    }

    for required in &compiled.required_titles {
        let required_upper = required.to_uppercase();
        let found = chapters
            .iter()
            .any(|c| c.title.to_uppercase().contains(&required_upper));
        if !found {
            violations.push(StructuralViolation::new(
                ViolationKind::MissingChapter,
                Severity::Error,
                format!("Missing required chapter: {required}"),
            ));
        }
    }

    tracing::info!(
        chapters = chapters.len(),
        violations = violations.len(),
        reordering_needed,
        "document structure analysis complete"
    );

    Ok(StructureAnalysis {
        chapters_by_position: chapters,
        canonical_order,
        boundaries,
        reordering_needed,
        violations,
    })
}
