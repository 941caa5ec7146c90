//! Render command implementation.

use crate::cli::RenderArgs;
use crate::commands::{load_result, load_text};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use trustlens_domain::ClaimId;
use trustlens_highlight::Overlay;

/// Execute the render command.
///
/// Each `--select` is applied as one click, so repeating an id toggles it off.
pub fn execute_render(args: RenderArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let result = load_result(&args.input.result)?;
    let text = load_text(&args.input.text)?;

    let mut overlay = Overlay::headless(text, result);
    for id in &args.select {
        overlay.select(&ClaimId::from(id.as_str()))?;
    }

    let render = overlay.render();
    if args.html {
        return Ok(render.to_html(&config.highlight));
    }
    formatter.format_render(&render, overlay.result())
}
