//! Overlay session
//!
//! Ties one verification result to the selection coordinator and both views.
//! Every selection event goes through [`Overlay::select`], which applies the
//! transition once and pushes the new state to the structured view and the
//! live page before returning. A transition either view rejects is undone.

use crate::dom::NodeId;
use crate::live::{LivePageView, NoScroll, Viewport};
use crate::selection::{Selection, SelectionCoordinator, SelectionObserver};
use crate::structured::{StructuredRender, StructuredView};
use crate::HighlightError;
use tracing::{info, warn};
use trustlens_domain::{ClaimId, VerificationResult};

/// The displayed result with its two synchronized views
#[derive(Debug)]
pub struct Overlay<V> {
    analyzed_text: String,
    result: VerificationResult,
    selection: SelectionCoordinator,
    structured: StructuredView,
    live: Option<LivePageView<V>>,
}

impl Overlay<NoScroll> {
    /// Overlay with a structured view only
    pub fn headless(analyzed_text: impl Into<String>, result: VerificationResult) -> Self {
        Self::new(analyzed_text, result, None)
    }
}

impl<V: Viewport> Overlay<V> {
    /// Display `result` over `analyzed_text`, optionally with a live page
    pub fn new(
        analyzed_text: impl Into<String>,
        result: VerificationResult,
        live: Option<LivePageView<V>>,
    ) -> Self {
        info!(claims = result.claims.len(), page_score = result.page_score, "Overlay opened");
        Self {
            analyzed_text: analyzed_text.into(),
            result,
            selection: SelectionCoordinator::new(),
            structured: StructuredView::new(),
            live,
        }
    }

    /// Toggle selection of a claim and update both views
    ///
    /// # Errors
    ///
    /// [`HighlightError::UnknownClaim`] when `id` is not in the displayed
    /// result, or any fatal error from a view. The selection is left
    /// unchanged in both cases.
    pub fn select(&mut self, id: &ClaimId) -> Result<&Selection, HighlightError> {
        if self.result.claim(id).is_none() {
            return Err(HighlightError::UnknownClaim(id.to_string()));
        }
        let change = self.selection.select(id.clone());
        if let Err(e) = self.propagate() {
            warn!(claim_id = %id, error = %e, "Selection rejected by a view, rolling back");
            self.selection.restore(change.previous);
            if let Err(resync) = self.propagate() {
                warn!(error = %resync, "Views could not return to the previous selection");
            }
            return Err(e);
        }
        Ok(self.selection.current())
    }

    /// Handle a click on the live page
    ///
    /// Clicking inside a highlight toggles its claim; clicking elsewhere does
    /// nothing and returns `None`.
    pub fn click_page(&mut self, node: NodeId) -> Result<Option<&Selection>, HighlightError> {
        let Some(id) = self.live.as_ref().and_then(|live| live.claim_at(node)) else {
            return Ok(None);
        };
        self.select(&id).map(Some)
    }

    /// Swap in a new result; the selection is cleared first
    pub fn replace_result(
        &mut self,
        analyzed_text: impl Into<String>,
        result: VerificationResult,
    ) -> Result<(), HighlightError> {
        self.selection.reset();
        self.propagate()?;
        self.analyzed_text = analyzed_text.into();
        self.result = result;
        info!(claims = self.result.claims.len(), "Overlay result replaced");
        Ok(())
    }

    /// Clear the selection and remove any page highlight
    pub fn dismiss(&mut self) -> Result<(), HighlightError> {
        self.selection.reset();
        self.propagate()?;
        info!("Overlay dismissed");
        Ok(())
    }

    /// Render the structured view for the current state
    pub fn render(&self) -> StructuredRender<'_> {
        self.structured.render(&self.analyzed_text, &self.result)
    }

    /// Current selection
    pub fn selection(&self) -> &Selection {
        self.selection.current()
    }

    /// Displayed result
    pub fn result(&self) -> &VerificationResult {
        &self.result
    }

    /// Analyzed text the spans refer to
    pub fn analyzed_text(&self) -> &str {
        &self.analyzed_text
    }

    /// Live page view, if attached
    pub fn live(&self) -> Option<&LivePageView<V>> {
        self.live.as_ref()
    }

    /// Mutable live page view, for host-page edits
    pub fn live_mut(&mut self) -> Option<&mut LivePageView<V>> {
        self.live.as_mut()
    }

    fn propagate(&mut self) -> Result<(), HighlightError> {
        let selected = self
            .selection
            .current()
            .claim_id()
            .and_then(|id| self.result.claim(id));
        self.structured.selection_changed(selected)?;
        if let Some(live) = self.live.as_mut() {
            live.selection_changed(selected)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::HighlightConfig;
    use trustlens_domain::{Claim, Span, Verdict};

    fn result() -> VerificationResult {
        VerificationResult::new(
            vec![
                Claim::new("a", Span::new(0, 3), "The", Verdict::Supported, 0.8),
                Claim::new("b", Span::new(4, 8), "sky ", Verdict::Weak, 0.4),
            ],
            60.0,
        )
    }

    #[test]
    fn test_select_toggles_structured_view() {
        let mut overlay = Overlay::headless("The sky is blue.", result());
        let a = ClaimId::from("a");

        assert_eq!(overlay.select(&a).unwrap(), &Selection::Selected(a.clone()));
        assert_eq!(overlay.render().selected_ids(), [&a]);

        assert_eq!(overlay.select(&a).unwrap(), &Selection::NoneSelected);
        assert!(overlay.render().selected_ids().is_empty());
    }

    #[test]
    fn test_unknown_claim_is_rejected() {
        let mut overlay = Overlay::headless("The sky is blue.", result());
        overlay.select(&ClaimId::from("a")).unwrap();
        let err = overlay.select(&ClaimId::from("zz")).unwrap_err();
        assert_eq!(err, HighlightError::UnknownClaim("zz".to_string()));
        assert_eq!(overlay.selection(), &Selection::Selected(ClaimId::from("a")));
    }

    #[test]
    fn test_replace_result_resets_selection() {
        let mut overlay = Overlay::headless("The sky is blue.", result());
        overlay.select(&ClaimId::from("b")).unwrap();
        overlay
            .replace_result("Water is wet.", VerificationResult::new(Vec::new(), 0.0))
            .unwrap();

        assert_eq!(overlay.selection(), &Selection::NoneSelected);
        assert_eq!(overlay.analyzed_text(), "Water is wet.");
        assert_eq!(overlay.render().segments.len(), 1);
    }

    #[test]
    fn test_failed_propagation_rolls_back_selection() {
        let mut doc = Document::new("body");
        let p = doc.create_element("p");
        let text = doc.create_text("The sky is blue.");
        doc.append_child(p, text);
        doc.append_child(doc.root(), p);
        let live = LivePageView::new(doc, NoScroll, HighlightConfig::default()).with_root(p);
        let mut overlay = Overlay::new("The sky is blue.", result(), Some(live));

        // Host page drops the search root out of the document
        if let Some(live) = overlay.live_mut() {
            live.document_mut().detach(p);
        }

        let err = overlay.select(&ClaimId::from("a")).unwrap_err();
        assert!(matches!(err, HighlightError::StaleRange(_)));
        assert_eq!(overlay.selection(), &Selection::NoneSelected);
        assert!(overlay.render().selected_ids().is_empty());
        assert!(!overlay.live().unwrap().is_highlighted());
    }

    #[test]
    fn test_click_without_live_page_is_ignored() {
        let mut overlay = Overlay::headless("The sky is blue.", result());
        let node = crate::dom::Document::new("body").root();
        assert_eq!(overlay.click_page(node).unwrap(), None);
    }
}
