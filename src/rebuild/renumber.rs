//! Subsection renumbering within a chapter's copied content.

use crate::config::{CompiledGrammar, TextStyle};
use crate::types::{Block, Run};

/// A single subsection label rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenumberChange {
    /// Label as found in the source (e.g., "3.1").
    pub old_label: String,

    /// Label after renumbering (e.g., "1.1").
    pub new_label: String,
}

/// Rewrite subsection labels in a chapter's blocks to match its final
/// chapter number.
///
/// Every block whose trimmed text matches the subsection grammar is
/// re-emitted as `<chapter_number>.<counter> <title>`, where the counter
/// starts at 1 and increments on every match. Gaps and duplicates in the
/// source numbering are therefore closed: 3.1, 3.3 becomes 1.1, 1.2.
///
/// A rewritten block carries a single run in the given body style; whatever
/// per-run styling the source block had inside the heading is collapsed.
/// The block's alignment is kept. Numbering deeper than `<n>.<m>` falls
/// outside the grammar and is left untouched.
pub fn renumber_subsections(
    blocks: &mut [Block],
    chapter_number: u32,
    grammar: &CompiledGrammar,
    body: &TextStyle,
) -> Vec<RenumberChange> {
    let mut changes = Vec::new();
    let mut counter: u32 = 0;

    for block in blocks.iter_mut() {
        let trimmed = block.trimmed_text();
        let Some(caps) = grammar.subsection.captures(&trimmed) else {
            continue;
        };

        counter += 1;
        let old_label = format!("{}.{}", &caps[1], &caps[2]);
        let new_label = format!("{chapter_number}.{counter}");
        let text = format!("{new_label} {}", &caps[3]);

        *block = Block::new(vec![Run::styled(text, body)], block.alignment);
        changes.push(RenumberChange {
            old_label,
            new_label,
        });
    }

    changes
}
