//! Content boundary resolution.

use crate::types::{ChapterRecord, ContentRange};

/// Compute the half-open block range each chapter owns.
///
/// For every chapter in physical order: `start` is the block after the
/// heading, `end` is the next chapter's heading position, or the document
/// length for the last chapter. Together the ranges partition everything
/// from the first heading to the end of the document, heading blocks
/// excluded; content before the first heading (the preamble) belongs to no
/// chapter.
///
/// Boundaries are computed before any reordering, so "next chapter" always
/// means physical adjacency in the source.
#[must_use]
pub fn resolve_boundaries(chapters: &[ChapterRecord], document_len: usize) -> Vec<ContentRange> {
    chapters
        .iter()
        .enumerate()
        .map(|(idx, chapter)| {
            let end = chapters
                .get(idx + 1)
                .map_or(document_len, |next| next.position);
            ContentRange {
                start: chapter.position + 1,
                end,
            }
        })
        .collect()
}
