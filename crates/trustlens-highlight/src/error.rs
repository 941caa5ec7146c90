//! Error types for the highlighting engine

use thiserror::Error;

/// Errors that can occur while aligning and highlighting claims
///
/// `InvalidSpan` and `NoDomMatch` are recoverable per claim: the views log them
/// and carry on. `UnknownVerdict` is a provider contract violation and is never
/// swallowed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HighlightError {
    /// Span is negative, inverted, empty or past the end of the text
    #[error("Invalid span for claim {claim_id}: [{start}, {end}) over {text_len} chars")]
    InvalidSpan {
        /// Claim carrying the span
        claim_id: String,
        /// Reported start
        start: i64,
        /// Reported end
        end: i64,
        /// Length of the analyzed text in chars
        text_len: usize,
    },

    /// Claim text does not occur under the highlight root
    #[error("No match in page for claim {0}")]
    NoDomMatch(String),

    /// Verdict name outside the closed set
    #[error("Unknown verdict: {0}")]
    UnknownVerdict(String),

    /// Range no longer fits the document (nodes removed or text shortened)
    #[error("Stale range: {0}")]
    StaleRange(String),

    /// Claim id is not part of the displayed result
    #[error("Unknown claim: {0}")]
    UnknownClaim(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HighlightError {
    /// Whether the error only affects one claim and rendering may continue
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HighlightError::InvalidSpan { .. } | HighlightError::NoDomMatch(_)
        )
    }
}

impl From<toml::de::Error> for HighlightError {
    fn from(e: toml::de::Error) -> Self {
        HighlightError::Config(format!("Failed to parse TOML: {}", e))
    }
}
