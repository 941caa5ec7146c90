//! Highlight command implementation.

use crate::cli::HighlightArgs;
use crate::commands::{load_result, read_input};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use trustlens_domain::ClaimId;
use trustlens_highlight::{
    Document, HighlightError, LivePageView, NoScroll, PageNode, ShowOutcome,
};

/// Execute the highlight command.
///
/// A claim whose text is not on the page is reported on stderr and the page
/// is printed unchanged.
pub fn execute_highlight(args: HighlightArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let result = load_result(&args.result)?;
    let id = ClaimId::from(args.claim.as_str());
    let claim = result
        .claim(&id)
        .ok_or_else(|| HighlightError::UnknownClaim(args.claim.clone()))?;

    let tree: PageNode = serde_json::from_str(&read_input(&args.page)?)?;
    let mut view = LivePageView::new(Document::from_tree(&tree), NoScroll, config.highlight.clone());

    let outcome = view.show(claim)?;
    if outcome == ShowOutcome::NotFound {
        eprintln!(
            "{}",
            formatter.warning(&format!("Claim {} does not occur in the page", id))
        );
    }

    let html = view.document().to_html(view.document().root());
    formatter.format_highlight(claim, outcome, &html)
}
