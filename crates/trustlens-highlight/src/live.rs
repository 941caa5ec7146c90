//! Live page view
//!
//! Owns the page document and at most one injected highlight. Showing a claim
//! removes the previous highlight before injecting the new one, so repeated
//! selections never accumulate wrappers.

use crate::dom::{Document, NodeId};
use crate::inject::{highlight, unhighlight, HighlightHandle, CLAIM_ID_ATTR};
use crate::selection::SelectionObserver;
use crate::style::style_of;
use crate::{HighlightConfig, HighlightError, ScrollBehavior};
use tracing::debug;
use trustlens_domain::{Claim, ClaimId};

/// Scroll seam between the core and the host page
pub trait Viewport {
    /// Bring `node` into view
    fn scroll_into_view(&mut self, doc: &Document, node: NodeId, behavior: ScrollBehavior);
}

/// Viewport that never scrolls (headless rendering)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScroll;

impl Viewport for NoScroll {
    fn scroll_into_view(&mut self, _doc: &Document, _node: NodeId, _behavior: ScrollBehavior) {}
}

/// What [`LivePageView::show`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    /// A new highlight was injected
    Highlighted,
    /// The claim was already highlighted
    AlreadyShown,
    /// The claim text does not occur in the page; nothing is highlighted
    NotFound,
}

/// Page document with its single active highlight
#[derive(Debug)]
pub struct LivePageView<V> {
    document: Document,
    root: NodeId,
    viewport: V,
    config: HighlightConfig,
    active: Option<HighlightHandle>,
}

impl<V: Viewport> LivePageView<V> {
    /// View over the whole document
    pub fn new(document: Document, viewport: V, config: HighlightConfig) -> Self {
        let root = document.root();
        Self {
            document,
            root,
            viewport,
            config,
            active: None,
        }
    }

    /// Restrict claim search to the subtree under `root`
    pub fn with_root(mut self, root: NodeId) -> Self {
        self.root = root;
        self
    }

    /// Highlight `claim`, replacing any previous highlight
    ///
    /// A claim whose text is not in the page yields [`ShowOutcome::NotFound`],
    /// not an error.
    pub fn show(&mut self, claim: &Claim) -> Result<ShowOutcome, HighlightError> {
        if let Some(active) = &self.active {
            if active.claim_id() == &claim.id && self.document.is_attached(active.primary()) {
                return Ok(ShowOutcome::AlreadyShown);
            }
        }
        self.hide();

        let style = style_of(claim.verdict);
        match highlight(&mut self.document, self.root, claim, style, &self.config) {
            Ok(handle) => {
                if self.config.scroll_behavior != ScrollBehavior::None {
                    self.viewport.scroll_into_view(
                        &self.document,
                        handle.primary(),
                        self.config.scroll_behavior,
                    );
                }
                self.active = Some(handle);
                Ok(ShowOutcome::Highlighted)
            }
            Err(HighlightError::NoDomMatch(id)) => {
                debug!(claim_id = %id, "Claim stays list-only, no page match");
                Ok(ShowOutcome::NotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove the active highlight; returns whether there was one
    pub fn hide(&mut self) -> bool {
        match self.active.take() {
            Some(handle) => {
                unhighlight(&mut self.document, handle);
                true
            }
            None => false,
        }
    }

    /// Whether a highlight is injected
    pub fn is_highlighted(&self) -> bool {
        self.active.is_some()
    }

    /// Claim of the injected highlight
    pub fn active_claim(&self) -> Option<&ClaimId> {
        self.active.as_ref().map(HighlightHandle::claim_id)
    }

    /// Injected wrapper elements
    pub fn active_wrappers(&self) -> &[NodeId] {
        self.active
            .as_ref()
            .map(HighlightHandle::wrappers)
            .unwrap_or_default()
    }

    /// Claim whose wrapper contains `node`
    pub fn claim_at(&self, node: NodeId) -> Option<ClaimId> {
        self.wrapper_at(node)
            .and_then(|wrapper| self.document.attribute(wrapper, CLAIM_ID_ATTR))
            .map(ClaimId::from)
    }

    /// Tooltip of the wrapper containing `node`
    pub fn tooltip_at(&self, node: NodeId) -> Option<&str> {
        self.wrapper_at(node)
            .and_then(|wrapper| self.document.attribute(wrapper, "title"))
    }

    fn wrapper_at(&self, node: NodeId) -> Option<NodeId> {
        let marker = format!("{}-highlight", self.config.class_prefix);
        let mut current = Some(node);
        while let Some(n) = current {
            let is_wrapper = self.document.attribute(n, CLAIM_ID_ATTR).is_some()
                && self
                    .document
                    .attribute(n, "class")
                    .is_some_and(|class| class.split_whitespace().any(|c| c == marker));
            if is_wrapper {
                return Some(n);
            }
            current = self.document.parent(n);
        }
        None
    }

    /// The page document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for host-page edits
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Search root
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The viewport
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Active configuration
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Remove any highlight and hand the document back
    pub fn into_document(mut self) -> Document {
        self.hide();
        self.document
    }
}

impl<V: Viewport> SelectionObserver for LivePageView<V> {
    fn selection_changed(&mut self, selected: Option<&Claim>) -> Result<(), HighlightError> {
        match selected {
            Some(claim) => self.show(claim).map(|_| ()),
            None => {
                self.hide();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::PageNode;
    use trustlens_domain::{Span, Verdict};

    #[derive(Default)]
    struct RecordingViewport {
        scrolls: Vec<(NodeId, ScrollBehavior)>,
    }

    impl Viewport for RecordingViewport {
        fn scroll_into_view(&mut self, _doc: &Document, node: NodeId, behavior: ScrollBehavior) {
            self.scrolls.push((node, behavior));
        }
    }

    fn page() -> Document {
        let tree: PageNode = serde_json::from_str(
            r#"{"tag": "article", "children": [
                {"tag": "p", "children": ["The sky is blue."]},
                {"tag": "p", "children": ["Water is wet."]}
            ]}"#,
        )
        .unwrap();
        Document::from_tree(&tree)
    }

    fn claim(id: &str, text: &str) -> Claim {
        Claim::new(id, Span::new(0, 1), text, Verdict::Supported, 0.9).with_reasoning("Widely observed.")
    }

    #[test]
    fn test_show_injects_and_scrolls_smoothly() {
        let mut view = LivePageView::new(page(), RecordingViewport::default(), HighlightConfig::default());
        let outcome = view.show(&claim("a", "sky is blue")).unwrap();

        assert_eq!(outcome, ShowOutcome::Highlighted);
        assert_eq!(view.active_claim(), Some(&ClaimId::from("a")));
        let wrapper = view.active_wrappers()[0];
        assert_eq!(view.viewport().scrolls, [(wrapper, ScrollBehavior::Smooth)]);
        assert_eq!(view.claim_at(wrapper), Some(ClaimId::from("a")));
        assert_eq!(view.tooltip_at(view.document().children(wrapper)[0]), Some("Supported: Widely observed."));
    }

    #[test]
    fn test_showing_another_claim_replaces_highlight() {
        let mut view = LivePageView::new(page(), NoScroll, HighlightConfig::default());
        view.show(&claim("a", "sky is blue")).unwrap();
        view.show(&claim("b", "Water")).unwrap();

        assert_eq!(view.active_wrappers().len(), 1);
        assert_eq!(view.active_claim(), Some(&ClaimId::from("b")));
        let html = view.document().to_html(view.root());
        assert_eq!(html.matches("<mark").count(), 1);
        assert!(html.contains("<p>The sky is blue.</p>"));
    }

    #[test]
    fn test_show_same_claim_is_idempotent() {
        let mut view = LivePageView::new(page(), RecordingViewport::default(), HighlightConfig::default());
        view.show(&claim("a", "sky")).unwrap();
        assert_eq!(view.show(&claim("a", "sky")).unwrap(), ShowOutcome::AlreadyShown);
        assert_eq!(view.viewport().scrolls.len(), 1);
    }

    #[test]
    fn test_missing_text_degrades_to_not_found() {
        let mut view = LivePageView::new(page(), NoScroll, HighlightConfig::default());
        view.show(&claim("a", "sky")).unwrap();
        let outcome = view.show(&claim("z", "not on this page")).unwrap();

        assert_eq!(outcome, ShowOutcome::NotFound);
        assert!(!view.is_highlighted());
        assert!(!view.document().to_html(view.root()).contains("<mark"));
    }

    #[test]
    fn test_scroll_none_skips_viewport() {
        let config = HighlightConfig {
            scroll_behavior: ScrollBehavior::None,
            ..HighlightConfig::default()
        };
        let mut view = LivePageView::new(page(), RecordingViewport::default(), config);
        view.show(&claim("a", "sky")).unwrap();
        assert!(view.viewport().scrolls.is_empty());
    }

    #[test]
    fn test_claim_at_outside_highlight_is_none() {
        let view = LivePageView::new(page(), NoScroll, HighlightConfig::default());
        let root = view.root();
        assert_eq!(view.claim_at(root), None);
        assert_eq!(view.tooltip_at(root), None);
    }

    #[test]
    fn test_hide_restores_page() {
        let original = page().to_html(page().root());
        let mut view = LivePageView::new(page(), NoScroll, HighlightConfig::default());
        view.show(&claim("a", "blue.")).unwrap();
        assert!(view.hide());
        assert!(!view.hide());
        let doc = view.into_document();
        assert_eq!(doc.to_html(doc.root()), original);
    }
}
