//! Error types for result validation

use thiserror::Error;

/// Errors raised when a verification result has the wrong overall shape
///
/// These are hard stops: a result that fails here is not rendered at all.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Payload could not be deserialized (missing field, unknown enum value)
    #[error("JSON parse error: {0}")]
    Json(String),

    /// Verdict name outside the closed set
    #[error("Unknown verdict: {0}")]
    UnknownVerdict(String),

    /// Two claims share an id
    #[error("Duplicate claim id: {0}")]
    DuplicateClaimId(String),

    /// Claim confidence outside [0, 1]
    #[error("Claim {claim_id} confidence {value} out of range [0.0, 1.0]")]
    ConfidenceOutOfRange {
        /// Offending claim
        claim_id: String,
        /// Reported confidence
        value: f64,
    },

    /// Source reputation outside [0, 1]
    #[error("Source {url} domain score {value} out of range [0.0, 1.0]")]
    DomainScoreOutOfRange {
        /// Source URL
        url: String,
        /// Reported score
        value: f64,
    },

    /// Page score outside [0, 100]
    #[error("Page score {0} out of range [0, 100]")]
    PageScoreOutOfRange(f64),

    /// Summary counts disagree with the claim list
    #[error("Summary count for {verdict} is {reported}, but {actual} claim(s) carry it")]
    SummaryMismatch {
        /// Verdict wire name
        verdict: String,
        /// Count reported by the provider
        reported: usize,
        /// Count tallied over claims
        actual: usize,
    },
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Json(e.to_string())
    }
}
