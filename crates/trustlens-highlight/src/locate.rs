//! Live-DOM span locator
//!
//! Finds a claim's literal text inside a document subtree without trusting
//! the claim's numeric span. The text of every rendered text node under the
//! root is concatenated, the first exact occurrence of the needle is found,
//! and its offsets are mapped back to (text node, byte offset) boundaries.
//! Later occurrences of the same text are never considered.

use crate::dom::{Document, NodeId};
use crate::HighlightConfig;
use tracing::debug;

/// A position inside a text node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Text node
    pub node: NodeId,
    /// Byte offset into the node's text (always a char boundary)
    pub offset: usize,
}

/// A highlightable range between two text boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomRange {
    /// Inclusive start
    pub start: Boundary,
    /// Exclusive end
    pub end: Boundary,
}

impl DomRange {
    /// Whether start and end sit in the same text node
    pub fn is_single_node(&self) -> bool {
        self.start.node == self.end.node
    }
}

/// Flattened text of a subtree with the node boundaries it came from
#[derive(Debug, Clone)]
pub struct TextIndex {
    text: String,
    /// `(node, byte offset of the node's first byte in text)`, in document order
    leaves: Vec<(NodeId, usize)>,
}

impl TextIndex {
    /// Index the rendered text under `root`
    pub fn build(doc: &Document, root: NodeId, config: &HighlightConfig) -> Self {
        let mut text = String::new();
        let mut leaves = Vec::new();
        for node in doc.text_leaves(root, |tag| config.skips(tag)) {
            if let Some(leaf) = doc.text(node) {
                leaves.push((node, text.len()));
                text.push_str(leaf);
            }
        }
        Self { text, leaves }
    }

    /// Concatenated text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text nodes in document order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.leaves.iter().map(|(node, _)| *node)
    }

    /// Range of the first occurrence of `needle`
    pub fn find(&self, needle: &str) -> Option<DomRange> {
        if needle.is_empty() {
            return None;
        }
        let start = self.text.find(needle)?;
        let end = start + needle.len();
        Some(DomRange {
            start: self.boundary_from_start(start),
            end: self.boundary_from_end(end),
        })
    }

    /// Boundary for a match starting at `pos` (lands at the start of a node
    /// rather than the end of the previous one)
    fn boundary_from_start(&self, pos: usize) -> Boundary {
        let index = self.leaves.partition_point(|(_, offset)| *offset <= pos) - 1;
        let (node, offset) = self.leaves[index];
        Boundary { node, offset: pos - offset }
    }

    /// Boundary for a match ending at `pos` (lands at the end of a node
    /// rather than the start of the next one)
    fn boundary_from_end(&self, pos: usize) -> Boundary {
        let index = self.leaves.partition_point(|(_, offset)| *offset < pos) - 1;
        let (node, offset) = self.leaves[index];
        Boundary { node, offset: pos - offset }
    }
}

/// Locate the first occurrence of `claim_text` under `root`
///
/// Returns `None` when the text does not occur verbatim (whitespace and case
/// included) or is empty. Never fails otherwise.
pub fn locate_in_dom(
    doc: &Document,
    root: NodeId,
    claim_text: &str,
    config: &HighlightConfig,
) -> Option<DomRange> {
    let range = TextIndex::build(doc, root, config).find(claim_text);
    if range.is_none() {
        debug!(root = ?root, needle_len = claim_text.len(), "Claim text not found under root");
    }
    range
}
