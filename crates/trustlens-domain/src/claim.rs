//! Claim module - a verified statement anchored in the analyzed text

use crate::{ClaimSources, Verdict};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Provider-assigned claim identifier (e.g. `clm_001`)
///
/// Unique within one [`crate::VerificationResult`]; carries no structure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Create a claim id from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClaimId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClaimId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Half-open `[start, end)` range of char offsets into the analyzed text
///
/// Offsets are signed so that a provider emitting a negative start still
/// deserializes; such spans are rejected by [`Span::char_range`] rather than
/// by the parser. On the wire a span is a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Span {
    /// First char covered
    pub start: i64,
    /// One past the last char covered
    pub end: i64,
}

impl Span {
    /// Create a new span (not validated)
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Check `0 <= start < end`
    pub fn is_well_formed(&self) -> bool {
        self.start >= 0 && self.start < self.end
    }

    /// Resolve the span against a text of `text_chars` chars
    ///
    /// Returns `None` when the span is inverted, empty, negative, or runs past
    /// the end of the text.
    pub fn char_range(&self, text_chars: usize) -> Option<Range<usize>> {
        if !self.is_well_formed() {
            return None;
        }
        let start = usize::try_from(self.start).ok()?;
        let end = usize::try_from(self.end).ok()?;
        (end <= text_chars).then_some(start..end)
    }
}

impl From<[i64; 2]> for Span {
    fn from([start, end]: [i64; 2]) -> Self {
        Self { start, end }
    }
}

impl From<Span> for [i64; 2] {
    fn from(span: Span) -> Self {
        [span.start, span.end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Kind of factual statement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    /// Numbers, statistics
    Numeric,
    /// About a specific entity or product
    Entity,
    /// Time-related facts
    Temporal,
    /// Comparisons
    Comparative,
    /// Cause and effect
    Causal,
    /// Anything else
    #[default]
    General,
}

/// Content vertical the claim belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Online retail
    Ecommerce,
    /// Software as a service
    Saas,
    /// Technology
    Tech,
    /// Finance
    Finance,
    /// Health
    Health,
    /// Education
    Education,
    /// Professional services
    Professional,
    /// Uncategorized
    #[default]
    General,
}

/// How quickly the claim is likely to go stale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSensitivity {
    /// Figures that change frequently
    High,
    /// Facts that may become outdated
    Medium,
    /// Timeless facts
    #[default]
    Low,
}

/// A single verified claim
///
/// `text` is what the provider says the span covers. It is not guaranteed to
/// equal the span's slice of the analyzed text, and it is the only thing used
/// when locating the claim on a surface other than the analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier within the result
    pub id: ClaimId,

    /// Char offsets into the analyzed text
    pub span: Span,

    /// Literal claim text
    pub text: String,

    /// Kind of statement
    #[serde(default)]
    pub claim_type: ClaimType,

    /// Content vertical
    #[serde(default)]
    pub topic: Topic,

    /// Staleness risk
    #[serde(default)]
    pub time_sensitivity: TimeSensitivity,

    /// Verification outcome
    pub verdict: Verdict,

    /// Confidence in the verdict, [0, 1]
    pub confidence: f64,

    /// Free-text explanation of the verdict
    #[serde(default)]
    pub reasoning: String,

    /// Evidence grouped by role
    #[serde(default)]
    pub sources: ClaimSources,
}

impl Claim {
    /// Create a claim with empty reasoning and no sources
    pub fn new(
        id: impl Into<ClaimId>,
        span: Span,
        text: impl Into<String>,
        verdict: Verdict,
        confidence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            span,
            text: text.into(),
            claim_type: ClaimType::default(),
            topic: Topic::default(),
            time_sensitivity: TimeSensitivity::default(),
            verdict,
            confidence,
            reasoning: String::new(),
            sources: ClaimSources::default(),
        }
    }

    /// Set the reasoning text
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }
}
