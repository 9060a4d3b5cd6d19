//! Before/after chapter listing for caller confirmation.

use serde::{Deserialize, Serialize};

use crate::config::GrammarConfig;
use crate::error::Result;
use crate::numeral::int_to_roman;
use crate::structure::analyze_structure;
use crate::types::{Block, StructureAnalysis};

/// Wrap width for rendered chapter titles.
const PREVIEW_WRAP_WIDTH: usize = 80;

/// One chapter line in a preview listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewEntry {
    /// Roman numeral shown for the chapter.
    pub roman: String,

    /// Chapter title in original casing.
    pub title: String,
}

/// Display-only projection of a structure analysis.
///
/// Built for the caller confirmation step before a restructuring is
/// committed; producing it never mutates anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewProjection {
    /// Chapters as they physically appear in the source.
    pub current_order: Vec<PreviewEntry>,

    /// Chapters as the rebuild would emit them.
    pub corrected_order: Vec<PreviewEntry>,
}

impl PreviewProjection {
    /// Project an existing analysis into a before/after listing.
    ///
    /// Current entries show the numeral as written in the source; corrected
    /// entries show the normalized numeral the rebuild would generate.
    #[must_use]
    pub fn from_analysis(analysis: &StructureAnalysis) -> Self {
        let current_order = analysis
            .chapters_by_position
            .iter()
            .map(|c| PreviewEntry {
                roman: c.roman_numeral.clone(),
                title: c.title.clone(),
            })
            .collect();

        let corrected_order = analysis
            .canonical_order
            .iter()
            .map(|c| PreviewEntry {
                roman: int_to_roman(c.chapter_number),
                title: c.title.clone(),
            })
            .collect();

        Self {
            current_order,
            corrected_order,
        }
    }
}

/// Analyze a document and project the before/after chapter listing.
///
/// # Errors
/// Fails only when the grammar cannot be compiled.
pub fn preview(blocks: &[Block], grammar: &GrammarConfig) -> Result<PreviewProjection> {
    let analysis = analyze_structure(blocks, grammar)?;
    Ok(PreviewProjection::from_analysis(&analysis))
}

/// Render a projection as plain text for terminal display.
#[must_use]
pub fn render(projection: &PreviewProjection) -> String {
    let mut out = String::new();
    out.push_str("Current order:\n");
    render_entries(&mut out, &projection.current_order);
    out.push_str("Corrected order:\n");
    render_entries(&mut out, &projection.corrected_order);
    out
}

fn render_entries(out: &mut String, entries: &[PreviewEntry]) {
    if entries.is_empty() {
        out.push_str("  (no chapters found)\n");
        return;
    }

    let width = entries.iter().map(|e| e.roman.len()).max().unwrap_or(1);
    for entry in entries {
        let initial = format!("  {:width$}  ", entry.roman);
        let subsequent = " ".repeat(initial.len());
        let options = textwrap::Options::new(PREVIEW_WRAP_WIDTH)
            .initial_indent(&initial)
            .subsequent_indent(&subsequent);
        out.push_str(&textwrap::fill(&entry.title, options));
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blocks() -> Vec<Block> {
        vec![
            Block::paragraph("BAB III METODE PENELITIAN"),
            Block::paragraph("BAB I PENDAHULUAN"),
            Block::paragraph("BAB II TINJAUAN PUSTAKA"),
        ]
    }

    #[test]
    fn test_projection_orders() {
        let projection = preview(&blocks(), &GrammarConfig::default()).unwrap();

        let current: Vec<&str> = projection
            .current_order
            .iter()
            .map(|e| e.roman.as_str())
            .collect();
        let corrected: Vec<&str> = projection
            .corrected_order
            .iter()
            .map(|e| e.roman.as_str())
            .collect();

        assert_eq!(current, vec!["III", "I", "II"]);
        assert_eq!(corrected, vec!["I", "II", "III"]);
        assert_eq!(projection.corrected_order[0].title, "PENDAHULUAN");
    }

    #[test]
    fn test_corrected_numeral_is_normalized() {
        let doc = vec![Block::paragraph("BAB IIII HASIL"), Block::paragraph("BAB I A")];
        let projection = preview(&doc, &GrammarConfig::default()).unwrap();

        // As written in the source on the left, normalized on the right
        assert_eq!(projection.current_order[0].roman, "IIII");
        assert_eq!(projection.corrected_order[1].roman, "IV");
    }

    #[test]
    fn test_render_lists_both_orders() {
        let projection = preview(&blocks(), &GrammarConfig::default()).unwrap();
        let rendered = render(&projection);

        assert!(rendered.contains("Current order:\n"));
        assert!(rendered.contains("Corrected order:\n"));
        assert!(rendered.contains("III  METODE PENELITIAN"));
        // Numerals are padded to a common width
        assert!(rendered.contains("I    PENDAHULUAN"));
    }

    #[test]
    fn test_render_empty_projection() {
        let projection = preview(&[], &GrammarConfig::default()).unwrap();
        let rendered = render(&projection);
        assert!(rendered.contains("(no chapters found)"));
    }

    #[test]
    fn test_long_titles_wrap_with_hanging_indent() {
        let long_title = "ANALISIS DAN PERANCANGAN SISTEM INFORMASI MANAJEMEN \
                          PERPUSTAKAAN BERBASIS WEB PADA UNIVERSITAS";
        let doc = vec![Block::paragraph(format!("BAB I {long_title}"))];
        let projection = preview(&doc, &GrammarConfig::default()).unwrap();
        let rendered = render(&projection);

        let continuation = rendered
            .lines()
            .find(|l| l.contains("UNIVERSITAS"))
            .unwrap();
        assert!(continuation.starts_with("     "));
    }
}
