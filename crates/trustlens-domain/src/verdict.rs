//! Verdict module - the closed set of verification outcomes

use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of verifying a single claim against retrieved evidence
///
/// The set is closed. Serde and [`std::str::FromStr`] both reject any other
/// name, so a provider that starts emitting a new verdict fails loudly instead
/// of being styled as something it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Multiple independent, reputable sources agree
    StronglySupported,

    /// Evidence supports the claim
    Supported,

    /// Evidence both supports and contradicts
    Mixed,

    /// Evidence is thin or only loosely related
    Weak,

    /// Evidence contradicts the claim
    Contradicted,

    /// Claim was once true but newer evidence supersedes it
    Outdated,

    /// No usable evidence either way
    NotVerifiable,
}

impl Verdict {
    /// Every verdict, in display order (best to worst, then unverifiable)
    pub const ALL: [Verdict; 7] = [
        Verdict::StronglySupported,
        Verdict::Supported,
        Verdict::Mixed,
        Verdict::Weak,
        Verdict::Contradicted,
        Verdict::Outdated,
        Verdict::NotVerifiable,
    ];

    /// Get the wire name of the verdict
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::StronglySupported => "strongly_supported",
            Verdict::Supported => "supported",
            Verdict::Mixed => "mixed",
            Verdict::Weak => "weak",
            Verdict::Contradicted => "contradicted",
            Verdict::Outdated => "outdated",
            Verdict::NotVerifiable => "not_verifiable",
        }
    }

    /// Parse a verdict from its wire name
    ///
    /// Matching is exact: the provider emits lowercase snake_case names.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl std::str::FromStr for Verdict {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownVerdict(s.to_string()))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
