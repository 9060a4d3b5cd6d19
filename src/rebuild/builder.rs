//! Rebuilds the block sequence in canonical chapter order.

use crate::config::{CompiledGrammar, StyleConfig};
use crate::numeral::int_to_roman;
use crate::rebuild::renumber::renumber_subsections;
use crate::types::{Alignment, Block, Run, StructureAnalysis};

/// Build a new block sequence with chapters in canonical order.
///
/// The preamble (everything before the first chapter heading) is copied
/// verbatim at the front. For each chapter in canonical order: a fresh
/// heading block is generated from the chapter's numeral and title using the
/// injected heading style, the chapter's content range is copied verbatim
/// (every run and its formatting attributes unchanged), and subsection
/// labels inside just that copied content are renumbered to the chapter's
/// number.
///
/// Returns the new sequence plus one entry per change applied. The source
/// slice is never modified; the output shares no data with it.
#[must_use]
pub fn rebuild_document(
    blocks: &[Block],
    analysis: &StructureAnalysis,
    grammar: &CompiledGrammar,
    styles: &StyleConfig,
) -> (Vec<Block>, Vec<String>) {
    let mut output: Vec<Block> = Vec::with_capacity(blocks.len());
    let mut changes: Vec<String> = Vec::new();

    // Preamble is owned by no chapter; keep it so nothing is lost
    if let Some(first) = analysis.chapters_by_position.first() {
        output.extend_from_slice(&blocks[..first.position]);
    }

    for (canonical_rank, chapter) in analysis.canonical_order.iter().enumerate() {
        // Positions are unique, so this maps back to the physical index
        // that the boundary list is parallel to
        let Some(physical_rank) = analysis
            .chapters_by_position
            .iter()
            .position(|c| c.position == chapter.position)
        else {
            continue;
        };

        let roman = int_to_roman(chapter.chapter_number);
        let title = if styles.heading_uppercase {
            chapter.title.to_uppercase()
        } else {
            chapter.title.clone()
        };
        let alignment = if styles.heading_centered {
            Alignment::Center
        } else {
            Alignment::Left
        };
        output.push(Block::new(
            vec![Run::styled(
                format!("{} {roman} {title}", grammar.keyword()),
                &styles.heading,
            )],
            alignment,
        ));

        let range = analysis.boundaries[physical_rank];
        let mut content: Vec<Block> = blocks[range.start..range.end].to_vec();
        let renumbered = renumber_subsections(
            &mut content,
            chapter.chapter_number,
            grammar,
            &styles.body,
        );

        tracing::debug!(
            chapter = chapter.chapter_number,
            from = physical_rank,
            to = canonical_rank,
            blocks = content.len(),
            "chapter rebuilt"
        );

        if physical_rank != canonical_rank {
            changes.push(format!("Reordered chapter: {}", chapter.title));
        }
        let label_changes = renumbered
            .iter()
            .filter(|c| c.old_label != c.new_label)
            .count();
        if label_changes > 0 {
            changes.push(format!(
                "Renumbered {label_changes} subsections in {} {roman}",
                grammar.keyword()
            ));
        }

        output.extend(content);
    }

    (output, changes)
}
