//! Command implementations.
//!
//! Each command returns the text to print so `main` owns stdout.

pub mod claims;
pub mod config;
pub mod highlight;
pub mod render;
pub mod segments;

pub use self::claims::execute_claims;
pub use self::config::execute_config;
pub use self::highlight::execute_highlight;
pub use self::render::execute_render;
pub use self::segments::execute_segments;

use crate::error::Result;
use std::io::Read;
use std::path::Path;
use trustlens_domain::VerificationResult;

/// Read a file, or stdin when the path is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Load and validate a provider result.
pub(crate) fn load_result(path: &Path) -> Result<VerificationResult> {
    let result = VerificationResult::from_json(&read_input(path)?)?;
    tracing::debug!(
        path = %path.display(),
        claims = result.claims.len(),
        "Loaded verification result"
    );
    Ok(result)
}

/// Load the analyzed text, dropping one trailing newline added by editors.
pub(crate) fn load_text(path: &Path) -> Result<String> {
    let mut text = read_input(path)?;
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}
