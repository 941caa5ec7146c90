//! Structured text view
//!
//! Renders the analyzed text with claim segments colored by verdict, plus a
//! claim card list. Every claim gets a card, including claims whose span was
//! invalid or overlapped another claim; those cards carry the skip reason and
//! are simply not linked to an inline segment.

use crate::dom::{escape_attr, escape_text};
use crate::segment::{segment_claims, SkipReason};
use crate::selection::SelectionObserver;
use crate::style::{style_of, VerdictStyle};
use crate::{HighlightConfig, HighlightError};
use std::collections::HashMap;
use trustlens_domain::{Claim, ClaimId, VerificationResult};

/// One slice of the analyzed text, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSegment<'a> {
    /// Slice of the analyzed text
    pub text: &'a str,
    /// Claim covering the slice
    pub claim: Option<&'a Claim>,
    /// Style of that claim's verdict
    pub style: Option<&'static VerdictStyle>,
    /// Whether the covering claim is the selected one
    pub selected: bool,
}

/// One entry in the claim list
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimCard<'a> {
    /// The claim
    pub claim: &'a Claim,
    /// Style of its verdict
    pub style: &'static VerdictStyle,
    /// Selected cards show reasoning and sources
    pub expanded: bool,
    /// Whether the claim has an inline segment
    pub inline: bool,
    /// Why the claim has no inline segment
    pub skip: Option<SkipReason<'a>>,
}

/// Output of one render pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredRender<'a> {
    /// Text segments in order
    pub segments: Vec<RenderedSegment<'a>>,
    /// Claim cards in result order
    pub cards: Vec<ClaimCard<'a>>,
}

impl<'a> StructuredRender<'a> {
    /// Card for a claim
    pub fn card(&self, id: &ClaimId) -> Option<&ClaimCard<'a>> {
        self.cards.iter().find(|card| &card.claim.id == id)
    }

    /// Ids of the claims drawn as selected
    pub fn selected_ids(&self) -> Vec<&'a ClaimId> {
        let mut ids: Vec<&'a ClaimId> = self
            .segments
            .iter()
            .filter(|s| s.selected)
            .filter_map(|s| s.claim.map(|c| &c.id))
            .chain(self.cards.iter().filter(|c| c.expanded).map(|c| &c.claim.id))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Render as HTML markup
    pub fn to_html(&self, config: &HighlightConfig) -> String {
        let prefix = &config.class_prefix;
        let mut out = format!("<div class=\"{}-text\">", prefix);
        for segment in &self.segments {
            match (segment.claim, segment.style) {
                (Some(claim), Some(style)) => {
                    let (extra, css) = if segment.selected {
                        (format!(" {}-selected", prefix), style.selected_css())
                    } else {
                        (String::new(), style.inline_css())
                    };
                    out.push_str(&format!(
                        "<span class=\"{p}-claim {p}-{v}{extra}\" data-claim-id=\"{id}\" style=\"{css}\">{text}</span>",
                        p = prefix,
                        v = claim.verdict.as_str().replace('_', "-"),
                        extra = extra,
                        id = escape_attr(claim.id.as_str()),
                        css = escape_attr(&css),
                        text = escape_text(segment.text),
                    ));
                }
                _ => out.push_str(&escape_text(segment.text)),
            }
        }
        out.push_str("</div>");

        out.push_str(&format!("<ol class=\"{}-claims\">", prefix));
        for card in &self.cards {
            out.push_str(&format!(
                "<li data-claim-id=\"{}\" data-verdict=\"{}\"><strong>{}</strong> {:.0}% <q>{}</q>",
                escape_attr(card.claim.id.as_str()),
                card.claim.verdict.as_str(),
                escape_text(card.style.label),
                card.claim.confidence * 100.0,
                escape_text(&card.claim.text),
            ));
            if card.expanded {
                if !card.claim.reasoning.is_empty() {
                    out.push_str(&format!("<p>{}</p>", escape_text(&card.claim.reasoning)));
                }
                if !card.claim.sources.is_empty() {
                    out.push_str("<ul>");
                    for source in card.claim.sources.iter() {
                        out.push_str(&format!(
                            "<li><a href=\"{}\">{}</a></li>",
                            escape_attr(&source.url),
                            escape_text(&source.domain),
                        ));
                    }
                    out.push_str("</ul>");
                }
            }
            out.push_str("</li>");
        }
        out.push_str("</ol>");
        out
    }
}

/// Structured view state
#[derive(Debug, Default)]
pub struct StructuredView {
    selected: Option<ClaimId>,
}

impl StructuredView {
    /// View with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the view currently shows as selected
    pub fn selected(&self) -> Option<&ClaimId> {
        self.selected.as_ref()
    }

    /// Render `text` against the claims of `result`
    pub fn render<'a>(&self, text: &'a str, result: &'a VerificationResult) -> StructuredRender<'a> {
        let by_id: HashMap<&ClaimId, &'a Claim> =
            result.claims.iter().map(|c| (&c.id, c)).collect();
        let segmentation = segment_claims(text, &result.claims);
        let is_selected = |id: &ClaimId| self.selected.as_ref() == Some(id);

        let segments = segmentation
            .segments
            .iter()
            .map(|segment| {
                let claim = segment.claim_id().and_then(|id| by_id.get(id).copied());
                RenderedSegment {
                    text: segment.text(),
                    claim,
                    style: claim.map(|c| style_of(c.verdict)),
                    selected: claim.is_some_and(|c| is_selected(&c.id)),
                }
            })
            .collect();

        let mut skipped: HashMap<&ClaimId, SkipReason<'a>> = segmentation
            .skipped
            .into_iter()
            .map(|s| (&s.claim.id, s.reason))
            .collect();

        let cards = result
            .claims
            .iter()
            .map(|claim| {
                let skip = skipped.remove(&claim.id);
                ClaimCard {
                    claim,
                    style: style_of(claim.verdict),
                    expanded: is_selected(&claim.id),
                    inline: skip.is_none(),
                    skip,
                }
            })
            .collect();

        StructuredRender { segments, cards }
    }
}

impl SelectionObserver for StructuredView {
    fn selection_changed(&mut self, selected: Option<&Claim>) -> Result<(), HighlightError> {
        self.selected = selected.map(|claim| claim.id.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustlens_domain::{Span, Verdict};

    const TEXT: &str = "The sky is blue.";

    fn result() -> VerificationResult {
        VerificationResult::new(
            vec![
                Claim::new("a", Span::new(0, 3), "The", Verdict::Supported, 0.8),
                Claim::new("b", Span::new(4, 8), "sky ", Verdict::Contradicted, 0.7)
                    .with_reasoning("Overcast today."),
                Claim::new("c", Span::new(5, 9), "ky i", Verdict::Weak, 0.3),
                Claim::new("d", Span::new(20, 10), "bad", Verdict::Mixed, 0.5),
            ],
            55.0,
        )
    }

    #[test]
    fn test_render_segments_and_cards() {
        let result = result();
        let view = StructuredView::new();
        let render = view.render(TEXT, &result);

        let texts: Vec<_> = render.segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, ["The", " ", "sky ", "is blue."]);
        assert_eq!(render.segments[2].style.map(|s| s.label), Some("Contradicted"));
        assert_eq!(render.cards.len(), 4);
        assert!(render.card(&ClaimId::from("a")).unwrap().inline);
        assert!(matches!(
            render.card(&ClaimId::from("c")).unwrap().skip,
            Some(SkipReason::Overlaps(_))
        ));
        assert!(matches!(
            render.card(&ClaimId::from("d")).unwrap().skip,
            Some(SkipReason::Invalid(HighlightError::InvalidSpan { .. }))
        ));
        assert!(render.selected_ids().is_empty());
    }

    #[test]
    fn test_selection_marks_segment_and_card() {
        let result = result();
        let mut view = StructuredView::new();
        view.selection_changed(result.claim(&ClaimId::from("b"))).unwrap();
        let render = view.render(TEXT, &result);

        assert!(render.segments[2].selected);
        assert!(!render.segments[0].selected);
        assert!(render.card(&ClaimId::from("b")).unwrap().expanded);
        assert_eq!(render.selected_ids(), [&ClaimId::from("b")]);

        let html = render.to_html(&HighlightConfig::default());
        assert!(html.contains("trustlens-selected"));
        assert!(html.contains("<p>Overcast today.</p>"));
    }

    #[test]
    fn test_selecting_skipped_claim_expands_card_only() {
        let result = result();
        let mut view = StructuredView::new();
        view.selection_changed(result.claim(&ClaimId::from("c"))).unwrap();
        let render = view.render(TEXT, &result);

        assert!(render.segments.iter().all(|s| !s.selected));
        assert!(render.card(&ClaimId::from("c")).unwrap().expanded);
    }

    #[test]
    fn test_html_escapes_text() {
        let result = VerificationResult::new(
            vec![Claim::new("x", Span::new(0, 5), "a < b", Verdict::Mixed, 0.5)],
            50.0,
        );
        let render = StructuredView::new().render("a < b & c", &result);
        let html = render.to_html(&HighlightConfig::default());
        assert!(html.contains(">a &lt; b</span> &amp; c</div>"));
        assert!(html.contains("data-verdict=\"mixed\""));
    }
}
