//! Reversible highlight injection
//!
//! Wrapping a located range mutates the document: text nodes at the range
//! edges are split and the covered pieces are moved into wrapper elements.
//! The returned [`HighlightHandle`] records every split and wrapper, and
//! [`unhighlight`] replays them backwards so the original text nodes come back
//! with their original text.

use crate::dom::{Document, NodeId};
use crate::locate::{locate_in_dom, DomRange};
use crate::style::VerdictStyle;
use crate::{HighlightConfig, HighlightError};
use tracing::{debug, info};
use trustlens_domain::{Claim, ClaimId};

/// Attribute carrying the claim id on injected wrappers
pub const CLAIM_ID_ATTR: &str = "data-claim-id";

/// Ownership of one injected highlight
///
/// Not `Clone`: exactly one owner is responsible for passing it back to
/// [`unhighlight`].
#[derive(Debug, PartialEq)]
#[must_use = "an injected highlight stays in the document until passed to unhighlight"]
pub struct HighlightHandle {
    claim_id: ClaimId,
    /// Wrapper elements in document order
    wrappers: Vec<NodeId>,
    /// `(original, split-off)` text node pairs in the order they were split
    splits: Vec<(NodeId, NodeId)>,
}

impl HighlightHandle {
    /// Claim the highlight represents
    pub fn claim_id(&self) -> &ClaimId {
        &self.claim_id
    }

    /// Injected wrapper elements, in document order
    pub fn wrappers(&self) -> &[NodeId] {
        &self.wrappers
    }

    /// First wrapper (the scroll target)
    pub fn primary(&self) -> NodeId {
        self.wrappers[0]
    }
}

/// Locate `claim.text` under `root` and wrap it
///
/// # Errors
///
/// [`HighlightError::NoDomMatch`] when the text does not occur under `root`.
pub fn highlight(
    doc: &mut Document,
    root: NodeId,
    claim: &Claim,
    style: &VerdictStyle,
    config: &HighlightConfig,
) -> Result<HighlightHandle, HighlightError> {
    let range = locate_in_dom(doc, root, &claim.text, config)
        .ok_or_else(|| HighlightError::NoDomMatch(claim.id.to_string()))?;
    wrap_range(doc, root, range, claim, style, config)
}

/// Wrap a range located under `root`
///
/// The range is validated against the current text under `root` before
/// anything is mutated; a range computed before the page changed fails with
/// [`HighlightError::StaleRange`] and leaves the document untouched.
pub fn wrap_range(
    doc: &mut Document,
    root: NodeId,
    range: DomRange,
    claim: &Claim,
    style: &VerdictStyle,
    config: &HighlightConfig,
) -> Result<HighlightHandle, HighlightError> {
    let covered_nodes = covered_text_nodes(doc, root, &range, config)?;

    let mut splits = Vec::new();
    let mut covered = Vec::with_capacity(covered_nodes.len());
    let last = covered_nodes.len() - 1;

    for (i, node) in covered_nodes.into_iter().enumerate() {
        let len = doc.text(node).map_or(0, str::len);
        let start = if i == 0 { range.start.offset } else { 0 };
        let end = if i == last { range.end.offset } else { len };
        if start >= end {
            continue;
        }
        // Split the tail off first so `start` stays valid
        if end < len {
            let tail = doc
                .split_text(node, end)
                .ok_or_else(|| stale(format!("cannot split text at byte {}", end)))?;
            splits.push((node, tail));
        }
        let piece = if start > 0 {
            let piece = doc
                .split_text(node, start)
                .ok_or_else(|| stale(format!("cannot split text at byte {}", start)))?;
            splits.push((node, piece));
            piece
        } else {
            node
        };
        covered.push(piece);
    }
    if covered.is_empty() {
        return Err(stale("range covers no text".to_string()));
    }

    let wrappers = group_sibling_runs(doc, &covered)
        .into_iter()
        .map(|run| wrap_run(doc, &run, claim, style, config))
        .collect::<Vec<_>>();

    info!(
        claim_id = %claim.id,
        wrappers = wrappers.len(),
        splits = splits.len(),
        "Injected page highlight"
    );

    Ok(HighlightHandle {
        claim_id: claim.id.clone(),
        wrappers,
        splits,
    })
}

/// Remove an injected highlight, restoring the original text nodes
///
/// Wrappers the host page already removed are skipped along with their text
/// splits, so removed text never comes back.
pub fn unhighlight(doc: &mut Document, handle: HighlightHandle) {
    for wrapper in handle.wrappers.iter().rev() {
        let Some(parent) = doc.parent(*wrapper) else {
            debug!(claim_id = %handle.claim_id, "Wrapper already detached by host page");
            continue;
        };
        for child in doc.children(*wrapper).to_vec() {
            doc.insert_before(parent, child, *wrapper);
        }
        doc.detach(*wrapper);
    }
    for (original, piece) in handle.splits.iter().rev() {
        if doc.is_attached(*original) && doc.is_attached(*piece) {
            doc.merge_text(*original, *piece);
        }
    }
    info!(claim_id = %handle.claim_id, "Removed page highlight");
}

/// Tooltip text for a claim: verdict label plus reasoning
pub fn tooltip(claim: &Claim, style: &VerdictStyle, max_chars: usize) -> String {
    let full = if claim.reasoning.is_empty() {
        style.label.to_string()
    } else {
        format!("{}: {}", style.label, claim.reasoning)
    };
    if full.chars().count() <= max_chars {
        return full;
    }
    let mut truncated: String = full.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

/// CSS class list for a verdict wrapper
pub fn verdict_class(config: &HighlightConfig, claim: &Claim) -> String {
    format!(
        "{prefix}-highlight {prefix}-{verdict}",
        prefix = config.class_prefix,
        verdict = claim.verdict.as_str().replace('_', "-")
    )
}

fn stale(reason: String) -> HighlightError {
    HighlightError::StaleRange(reason)
}

/// Text nodes from the start boundary to the end boundary, in document order
fn covered_text_nodes(
    doc: &Document,
    root: NodeId,
    range: &DomRange,
    config: &HighlightConfig,
) -> Result<Vec<NodeId>, HighlightError> {
    for boundary in [range.start, range.end] {
        let text = doc
            .text(boundary.node)
            .ok_or_else(|| stale("boundary is not a text node".to_string()))?;
        if !doc.is_attached(boundary.node) {
            return Err(stale("boundary node was removed".to_string()));
        }
        if boundary.offset > text.len() || !text.is_char_boundary(boundary.offset) {
            return Err(stale(format!("offset {} no longer fits its node", boundary.offset)));
        }
    }

    let leaves = doc.text_leaves(root, |tag| config.skips(tag));
    let position = |node: NodeId| leaves.iter().position(|n| *n == node);
    let (Some(first), Some(last)) = (position(range.start.node), position(range.end.node)) else {
        return Err(stale("boundary node is no longer rendered".to_string()));
    };
    if first > last || (first == last && range.start.offset >= range.end.offset) {
        return Err(stale("range is empty or inverted".to_string()));
    }
    Ok(leaves[first..=last].to_vec())
}

/// Split covered pieces into runs of adjacent siblings
fn group_sibling_runs(doc: &Document, covered: &[NodeId]) -> Vec<Vec<NodeId>> {
    let mut runs: Vec<Vec<NodeId>> = Vec::new();
    for node in covered {
        let extends = runs.last().and_then(|run| run.last()).is_some_and(|prev| {
            doc.parent(*prev) == doc.parent(*node)
                && doc.index_in_parent(*prev).map(|i| i + 1) == doc.index_in_parent(*node)
        });
        match runs.last_mut() {
            Some(run) if extends => run.push(*node),
            _ => runs.push(vec![*node]),
        }
    }
    runs
}

fn wrap_run(
    doc: &mut Document,
    run: &[NodeId],
    claim: &Claim,
    style: &VerdictStyle,
    config: &HighlightConfig,
) -> NodeId {
    let wrapper = doc.create_element(&config.wrapper_tag);
    doc.set_attribute(wrapper, "class", &verdict_class(config, claim));
    doc.set_attribute(wrapper, CLAIM_ID_ATTR, claim.id.as_str());
    doc.set_attribute(wrapper, "data-verdict", claim.verdict.as_str());
    doc.set_attribute(wrapper, "style", &style.inline_css());
    doc.set_attribute(wrapper, "title", &tooltip(claim, style, config.tooltip_max_chars));

    if let Some(parent) = doc.parent(run[0]) {
        doc.insert_before(parent, wrapper, run[0]);
    }
    for node in run {
        doc.append_child(wrapper, *node);
    }
    wrapper
}
