//! Restructuring service tying analysis, preview and rebuild together.

use crate::config::{GrammarConfig, StyleConfig};
use crate::error::Result;
use crate::preview::PreviewProjection;
use crate::rebuild::rebuild_document;
use crate::structure::analyze_structure;
use crate::types::{Block, RestructureOptions, RestructureResult};

/// Receives the preview projection and decides whether a restructuring may
/// be committed.
///
/// The CLI implements this with a terminal prompt; services wire it to their
/// own confirmation flow. Options with `assume_confirmed` set skip the
/// channel entirely.
pub trait ConfirmationChannel {
    /// Return `true` to apply the restructuring shown in the projection.
    fn confirm(&mut self, projection: &PreviewProjection) -> bool;
}

/// A channel that accepts every restructuring without asking.
#[derive(Debug, Default)]
pub struct AcceptAll;

impl ConfirmationChannel for AcceptAll {
    fn confirm(&mut self, _projection: &PreviewProjection) -> bool {
        true
    }
}

/// Restructure a document snapshot into canonical chapter order.
///
/// Pure function of the inputs: the source slice is never touched and the
/// result owns a fully independent block sequence. When no reordering is
/// needed (or reordering is disabled by options) the result carries an
/// unchanged copy of the source and an empty change list, so repeated runs
/// are idempotent.
///
/// # Errors
/// Fails on grammar compilation problems only; structural findings are part
/// of the analysis, not errors.
pub fn restructure(
    blocks: &[Block],
    grammar: &GrammarConfig,
    styles: &StyleConfig,
    options: &RestructureOptions,
) -> Result<RestructureResult> {
    let analysis = analyze_structure(blocks, grammar)?;

    let original_order: Vec<String> = analysis
        .chapters_by_position
        .iter()
        .map(|c| c.title.clone())
        .collect();
    let corrected_order: Vec<String> = analysis
        .canonical_order
        .iter()
        .map(|c| c.title.clone())
        .collect();

    if !options.reorder_chapters {
        return Ok(RestructureResult {
            success: true,
            message: "Chapter reordering disabled; document left unchanged".to_string(),
            new_blocks: blocks.to_vec(),
            original_order,
            corrected_order,
            changes_applied: Vec::new(),
        });
    }

    if !analysis.reordering_needed {
        return Ok(RestructureResult {
            success: true,
            message: "Document structure is already correct".to_string(),
            new_blocks: blocks.to_vec(),
            original_order,
            corrected_order,
            changes_applied: Vec::new(),
        });
    }

    let compiled = grammar.compile()?;
    let (new_blocks, changes_applied) = rebuild_document(blocks, &analysis, &compiled, styles);

    tracing::info!(
        changes = changes_applied.len(),
        blocks = new_blocks.len(),
        "document restructured"
    );

    Ok(RestructureResult {
        success: true,
        message: format!(
            "Document successfully restructured with {} changes",
            changes_applied.len()
        ),
        new_blocks,
        original_order,
        corrected_order,
        changes_applied,
    })
}

/// Restructure after clearing the caller confirmation channel.
///
/// Builds the preview projection, asks the channel (unless the options are
/// already decided), and either runs [`restructure`] or returns a rejected
/// result with no blocks, leaving the source untouched.
///
/// # Errors
/// Same failure modes as [`restructure`].
pub fn restructure_confirmed(
    blocks: &[Block],
    grammar: &GrammarConfig,
    styles: &StyleConfig,
    options: &RestructureOptions,
    channel: &mut dyn ConfirmationChannel,
) -> Result<RestructureResult> {
    if !options.assume_confirmed {
        let projection = crate::preview::preview(blocks, grammar)?;
        if !channel.confirm(&projection) {
            tracing::info!("restructuring rejected by caller");
            return Ok(RestructureResult {
                success: false,
                message: "Restructuring rejected by caller".to_string(),
                new_blocks: Vec::new(),
                original_order: projection
                    .current_order
                    .into_iter()
                    .map(|e| e.title)
                    .collect(),
                corrected_order: projection
                    .corrected_order
                    .into_iter()
                    .map(|e| e.title)
                    .collect(),
                changes_applied: Vec::new(),
            });
        }
    }

    restructure(blocks, grammar, styles, options)
}
