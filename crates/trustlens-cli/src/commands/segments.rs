//! Segments command implementation.

use crate::cli::InputArgs;
use crate::commands::{load_result, load_text};
use crate::error::Result;
use crate::output::Formatter;
use trustlens_highlight::StructuredView;

/// Execute the segments command.
pub fn execute_segments(args: InputArgs, formatter: &Formatter) -> Result<String> {
    let result = load_result(&args.result)?;
    let text = load_text(&args.text)?;
    let render = StructuredView::new().render(&text, &result);
    formatter.format_segments(&render)
}
