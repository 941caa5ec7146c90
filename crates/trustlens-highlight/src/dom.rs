//! Owned document tree for live-page highlighting
//!
//! An arena of element and text nodes standing in for the host page's DOM.
//! [`NodeId`]s are only meaningful for the [`Document`] that minted them.
//! Detached nodes stay in the arena so ids never dangle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Node payload
#[derive(Debug, Clone, PartialEq)]
enum NodeKind {
    /// Element with ordered attributes
    Element {
        /// Lowercase tag name
        tag: String,
        /// Attributes in insertion order
        attributes: Vec<(String, String)>,
    },

    /// Text leaf
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Serializable page tree used to load a document
///
/// A JSON string is a text node; an object is an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageNode {
    /// Text leaf
    Text(String),

    /// Element
    Element {
        /// Tag name
        tag: String,
        /// Attributes
        #[serde(default)]
        attributes: BTreeMap<String, String>,
        /// Child nodes
        #[serde(default)]
        children: Vec<PageNode>,
    },
}

/// A mutable document tree
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "wbr"];

impl Document {
    /// Create a document whose root is an empty `root_tag` element
    pub fn new(root_tag: &str) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.create_element(root_tag);
        doc
    }

    /// Build a document from a page tree
    ///
    /// A bare text tree is wrapped in a `body` element.
    pub fn from_tree(tree: &PageNode) -> Self {
        match tree {
            PageNode::Text(_) => {
                let mut doc = Self::new("body");
                let root = doc.root;
                doc.build_into(root, tree);
                doc
            }
            PageNode::Element { tag, attributes, children } => {
                let mut doc = Self::new(tag);
                let root = doc.root;
                for (name, value) in attributes {
                    doc.set_attribute(root, name, value);
                }
                for child in children {
                    doc.build_into(root, child);
                }
                doc
            }
        }
    }

    fn build_into(&mut self, parent: NodeId, tree: &PageNode) {
        match tree {
            PageNode::Text(text) => {
                let node = self.create_text(text);
                self.append_child(parent, node);
            }
            PageNode::Element { tag, attributes, children } => {
                let node = self.create_element(tag);
                for (name, value) in attributes {
                    self.set_attribute(node, name, value);
                }
                self.append_child(parent, node);
                for child in children {
                    self.build_into(node, child);
                }
            }
        }
    }

    /// Root element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Tag name, for elements
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Text, for text nodes
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    /// Parent node, if attached
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Child nodes in order
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Position of `node` among its parent's children
    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|c| *c == node)
    }

    /// Whether `node` is reachable from the document root
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Attribute value, for elements
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Set an attribute (no-op on text nodes)
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            match attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    /// Replace the text of a text node (no-op on elements)
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let NodeKind::Text(current) = &mut self.nodes[node.0].kind {
            *current = text.to_string();
        }
    }

    /// Remove `node` from its parent
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Insert `child` before `reference` under `parent`
    ///
    /// Appends when `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        match children.iter().position(|c| *c == reference) {
            Some(index) => children.insert(index, child),
            None => children.push(child),
        }
        self.nodes[child.0].parent = Some(parent);
    }

    /// Split a text node at a byte offset
    ///
    /// The node keeps `[..offset]`; a new sibling holding `[offset..]` is
    /// inserted right after it and returned. Returns `None` for elements and
    /// for offsets that are not char boundaries.
    pub fn split_text(&mut self, node: NodeId, offset: usize) -> Option<NodeId> {
        let tail = {
            let text = self.text(node)?;
            if !text.is_char_boundary(offset) {
                return None;
            }
            text[offset..].to_string()
        };
        if let NodeKind::Text(text) = &mut self.nodes[node.0].kind {
            text.truncate(offset);
        }
        let new_node = self.create_text(&tail);
        if let Some(parent) = self.parent(node) {
            let index = self.index_in_parent(node).map_or(0, |i| i + 1);
            self.nodes[parent.0].children.insert(index, new_node);
            self.nodes[new_node.0].parent = Some(parent);
        }
        Some(new_node)
    }

    /// Append the text of `other` to `node` and detach `other`
    pub fn merge_text(&mut self, node: NodeId, other: NodeId) {
        let Some(extra) = self.text(other).map(str::to_string) else {
            return;
        };
        if let NodeKind::Text(text) = &mut self.nodes[node.0].kind {
            text.push_str(&extra);
            self.detach(other);
        }
    }

    /// Concatenated text of every descendant text node
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for child in self.children(node) {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Non-empty text nodes under `root` in document order
    ///
    /// Elements for which `skip(tag)` is true are not descended into.
    pub fn text_leaves(&self, root: NodeId, skip: impl Fn(&str) -> bool) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match &self.nodes[node.0].kind {
                NodeKind::Text(text) => {
                    if !text.is_empty() {
                        leaves.push(node);
                    }
                }
                NodeKind::Element { tag, .. } => {
                    if node != root && skip(tag) {
                        continue;
                    }
                    stack.extend(self.children(node).iter().rev());
                }
            }
        }
        leaves
    }

    /// Serialize `node` and its subtree as HTML
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
                }
                out.push('>');
                if VOID_TAGS.contains(&tag.as_str()) && self.children(node).is_empty() {
                    return;
                }
                for child in self.children(node) {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }
}

/// Escape text content for HTML output
pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape an attribute value for HTML output
pub(crate) fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
