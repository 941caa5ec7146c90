//! Integration tests for the overlay: selection kept in sync across views

use proptest::prelude::*;
use trustlens_domain::{Claim, ClaimId, Span, Verdict, VerificationResult};
use trustlens_highlight::{
    Document, HighlightConfig, LivePageView, NodeId, Overlay, PageNode, ScrollBehavior, Selection,
    Viewport,
};

const ANALYZED: &str = "Our product increases productivity by 300%. Customers love it.";

const PAGE: &str = r#"{"tag": "body", "children": [
    {"tag": "script", "children": ["track('Our product increases productivity by 300%');"]},
    {"tag": "p", "children": ["Our product ", "increases productivity ", "by 300%."]},
    {"tag": "p", "children": ["Customers ", {"tag": "em", "children": ["love"]}, " it."]}
]}"#;

/// Viewport that records every scroll request
#[derive(Debug, Default)]
struct RecordingViewport {
    scrolls: Vec<(NodeId, ScrollBehavior)>,
}

impl Viewport for RecordingViewport {
    fn scroll_into_view(&mut self, _doc: &Document, node: NodeId, behavior: ScrollBehavior) {
        self.scrolls.push((node, behavior));
    }
}

/// Helper to build the displayed result
fn create_result() -> VerificationResult {
    VerificationResult::new(
        vec![
            Claim::new(
                "clm_001",
                Span::new(0, 42),
                "Our product increases productivity by 300%",
                Verdict::Contradicted,
                0.82,
            )
            .with_reasoning("Independent studies report 20-30%."),
            Claim::new("clm_002", Span::new(44, 61), "Customers love it", Verdict::Supported, 0.7),
            Claim::new("clm_003", Span::new(20, 10), "Founded in 1999", Verdict::NotVerifiable, 0.5),
        ],
        41.0,
    )
}

fn create_overlay() -> Overlay<RecordingViewport> {
    let tree: PageNode = serde_json::from_str(PAGE).unwrap();
    let live = LivePageView::new(
        Document::from_tree(&tree),
        RecordingViewport::default(),
        HighlightConfig::default(),
    );
    Overlay::new(ANALYZED, create_result(), Some(live))
}

fn page_html(overlay: &Overlay<RecordingViewport>) -> String {
    let live = overlay.live().unwrap();
    live.document().to_html(live.document().root())
}

fn id(s: &str) -> ClaimId {
    ClaimId::from(s)
}

#[test]
fn test_selection_reaches_both_views() {
    let mut overlay = create_overlay();
    overlay.select(&id("clm_001")).unwrap();

    let render = overlay.render();
    assert_eq!(render.selected_ids(), [&id("clm_001")]);

    let live = overlay.live().unwrap();
    assert_eq!(live.active_claim(), Some(&id("clm_001")));
    let wrapper = live.active_wrappers()[0];
    assert_eq!(
        live.document().text_content(wrapper),
        "Our product increases productivity by 300%"
    );
    assert_eq!(
        live.tooltip_at(wrapper),
        Some("Contradicted: Independent studies report 20-30%.")
    );
    assert_eq!(live.viewport().scrolls, [(wrapper, ScrollBehavior::Smooth)]);

    // Script text is never wrapped
    assert!(page_html(&overlay).contains("<script>track('Our product"));
}

#[test]
fn test_switch_then_toggle_off_restores_page() {
    let mut overlay = create_overlay();
    let original = page_html(&overlay);

    overlay.select(&id("clm_001")).unwrap();
    overlay.select(&id("clm_002")).unwrap();

    let live = overlay.live().unwrap();
    assert_eq!(live.active_claim(), Some(&id("clm_002")));
    let texts: Vec<_> = live
        .active_wrappers()
        .iter()
        .map(|w| live.document().text_content(*w))
        .collect();
    assert_eq!(texts, ["Customers ", "love", " it"]);
    assert!(!page_html(&overlay).contains("data-claim-id=\"clm_001\""));

    assert_eq!(overlay.select(&id("clm_002")).unwrap(), &Selection::NoneSelected);
    assert!(!overlay.live().unwrap().is_highlighted());
    assert_eq!(page_html(&overlay), original);
}

#[test]
fn test_click_on_highlight_toggles_claim() {
    let mut overlay = create_overlay();
    overlay.select(&id("clm_002")).unwrap();

    let live = overlay.live().unwrap();
    let em_wrapper = live.active_wrappers()[1];
    let text_inside = live.document().children(em_wrapper)[0];

    let selection = overlay.click_page(text_inside).unwrap();
    assert_eq!(selection, Some(&Selection::NoneSelected));
    assert!(overlay.render().selected_ids().is_empty());

    let root = overlay.live().unwrap().root();
    assert_eq!(overlay.click_page(root).unwrap(), None);
}

#[test]
fn test_claim_with_bad_span_and_no_page_match_stays_selectable() {
    let mut overlay = create_overlay();
    let original = page_html(&overlay);
    overlay.select(&id("clm_001")).unwrap();
    overlay.select(&id("clm_003")).unwrap();

    let render = overlay.render();
    let card = render.card(&id("clm_003")).unwrap();
    assert!(card.expanded);
    assert!(!card.inline);
    assert!(render.segments.iter().all(|s| !s.selected));

    // Previous highlight is gone and nothing replaced it
    assert!(!overlay.live().unwrap().is_highlighted());
    assert_eq!(page_html(&overlay), original);
}

#[test]
fn test_replace_result_and_dismiss_remove_highlight() {
    let mut overlay = create_overlay();
    let original = page_html(&overlay);

    overlay.select(&id("clm_001")).unwrap();
    overlay
        .replace_result(ANALYZED, VerificationResult::new(Vec::new(), 0.0))
        .unwrap();
    assert_eq!(overlay.selection(), &Selection::NoneSelected);
    assert_eq!(page_html(&overlay), original);

    overlay.replace_result(ANALYZED, create_result()).unwrap();
    overlay.select(&id("clm_002")).unwrap();
    overlay.dismiss().unwrap();
    assert_eq!(page_html(&overlay), original);
}

#[test]
fn test_host_removing_highlight_does_not_break_dismiss() {
    let mut overlay = create_overlay();
    overlay.select(&id("clm_001")).unwrap();

    let live = overlay.live_mut().unwrap();
    let wrapper = live.active_wrappers()[0];
    live.document_mut().detach(wrapper);

    overlay.dismiss().unwrap();
    assert!(!overlay.live().unwrap().is_highlighted());
    assert!(page_html(&overlay).contains("Customers "));
}

proptest! {
    #[test]
    fn prop_views_agree_after_every_event(events in prop::collection::vec(0usize..4, 1..30)) {
        let ids = ["clm_001", "clm_002", "clm_003"];
        let mut overlay = create_overlay();
        let original = page_html(&overlay);

        for event in events {
            match ids.get(event) {
                Some(claim) => {
                    overlay.select(&id(claim)).unwrap();
                }
                None => overlay.dismiss().unwrap(),
            }

            let selected = overlay.selection().claim_id().cloned();
            let structured = overlay.render().selected_ids().into_iter().cloned().collect::<Vec<_>>();
            prop_assert_eq!(structured, selected.iter().cloned().collect::<Vec<_>>());

            let live = overlay.live().unwrap();
            let expected_live = selected.filter(|c| c.as_str() != "clm_003");
            prop_assert_eq!(live.active_claim().cloned(), expected_live);
        }

        overlay.dismiss().unwrap();
        prop_assert_eq!(page_html(&overlay), original);
    }
}
