//! Verification result - the immutable payload a display session renders

use crate::{Claim, ClaimId, DomainError, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-verdict claim counts reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationSummary {
    /// Claims judged strongly supported
    pub strongly_supported: usize,
    /// Claims judged supported
    pub supported: usize,
    /// Claims with mixed evidence
    pub mixed: usize,
    /// Claims with weak evidence
    pub weak: usize,
    /// Claims contradicted by evidence
    pub contradicted: usize,
    /// Claims superseded by newer evidence
    pub outdated: usize,
    /// Claims with no usable evidence
    pub not_verifiable: usize,
}

impl VerificationSummary {
    /// Tally verdicts over a claim list
    pub fn tally<'a>(claims: impl IntoIterator<Item = &'a Claim>) -> Self {
        let mut summary = Self::default();
        for claim in claims {
            *summary.slot_mut(claim.verdict) += 1;
        }
        summary
    }

    /// Count for one verdict
    pub fn count(&self, verdict: Verdict) -> usize {
        match verdict {
            Verdict::StronglySupported => self.strongly_supported,
            Verdict::Supported => self.supported,
            Verdict::Mixed => self.mixed,
            Verdict::Weak => self.weak,
            Verdict::Contradicted => self.contradicted,
            Verdict::Outdated => self.outdated,
            Verdict::NotVerifiable => self.not_verifiable,
        }
    }

    /// Sum over all verdicts
    pub fn total(&self) -> usize {
        Verdict::ALL.iter().map(|v| self.count(*v)).sum()
    }

    fn slot_mut(&mut self, verdict: Verdict) -> &mut usize {
        match verdict {
            Verdict::StronglySupported => &mut self.strongly_supported,
            Verdict::Supported => &mut self.supported,
            Verdict::Mixed => &mut self.mixed,
            Verdict::Weak => &mut self.weak,
            Verdict::Contradicted => &mut self.contradicted,
            Verdict::Outdated => &mut self.outdated,
            Verdict::NotVerifiable => &mut self.not_verifiable,
        }
    }
}

/// Provider-side processing metadata, display only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationMetadata {
    /// Wall time the provider spent
    pub processing_time_ms: u64,

    /// Models that produced verdicts
    #[serde(default)]
    pub models_used: Vec<String>,

    /// Number of sources consulted
    #[serde(default)]
    pub sources_checked: usize,

    /// Whether the provider served a cached result
    #[serde(default)]
    pub cached: bool,
}

/// A complete verification result
///
/// Claims keep the order the provider sent them in; nothing here sorts or
/// mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Provider job identifier
    #[serde(default)]
    pub verification_id: String,

    /// Job status as reported by the provider
    #[serde(default = "default_status")]
    pub status: String,

    /// Overall page score, [0, 100]
    pub page_score: f64,

    /// Per-verdict counts
    pub summary: VerificationSummary,

    /// Claims in provider order
    pub claims: Vec<Claim>,

    /// Processing metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VerificationMetadata>,

    /// Hash of the verified content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

impl VerificationResult {
    /// Build a result whose summary is tallied from `claims`
    pub fn new(claims: Vec<Claim>, page_score: f64) -> Self {
        Self {
            verification_id: String::new(),
            status: default_status(),
            page_score,
            summary: VerificationSummary::tally(&claims),
            claims,
            metadata: None,
            content_hash: None,
        }
    }

    /// Parse and validate a provider payload
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, on any verdict outside the closed set, and on
    /// every shape violation [`Self::validate`] checks.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let result: Self = serde_json::from_str(json)?;
        result.validate()?;
        Ok(result)
    }

    /// Check the overall shape of the result
    ///
    /// Span validity is not a shape property; renderers skip bad spans one
    /// claim at a time.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=100.0).contains(&self.page_score) {
            return Err(DomainError::PageScoreOutOfRange(self.page_score));
        }

        let mut seen = HashSet::with_capacity(self.claims.len());
        for claim in &self.claims {
            if !seen.insert(&claim.id) {
                return Err(DomainError::DuplicateClaimId(claim.id.to_string()));
            }
            if !(0.0..=1.0).contains(&claim.confidence) {
                return Err(DomainError::ConfidenceOutOfRange {
                    claim_id: claim.id.to_string(),
                    value: claim.confidence,
                });
            }
            if let Some(source) = claim
                .sources
                .iter()
                .find(|s| !(0.0..=1.0).contains(&s.domain_score))
            {
                return Err(DomainError::DomainScoreOutOfRange {
                    url: source.url.clone(),
                    value: source.domain_score,
                });
            }
        }

        self.check_summary()
    }

    /// Check that the reported summary matches the claim list
    pub fn check_summary(&self) -> Result<(), DomainError> {
        let actual = VerificationSummary::tally(&self.claims);
        for verdict in Verdict::ALL {
            let (reported, tallied) = (self.summary.count(verdict), actual.count(verdict));
            if reported != tallied {
                return Err(DomainError::SummaryMismatch {
                    verdict: verdict.to_string(),
                    reported,
                    actual: tallied,
                });
            }
        }
        Ok(())
    }

    /// Look up a claim by id
    pub fn claim(&self, id: &ClaimId) -> Option<&Claim> {
        self.claims.iter().find(|c| &c.id == id)
    }
}

fn default_status() -> String {
    "completed".to_string()
}
