//! TrustLens Domain Layer
//!
//! This crate defines the data model the verification provider hands to the
//! overlay: a [`VerificationResult`] holding ordered [`Claim`]s, each tied to a
//! character span of the analyzed text and carrying a [`Verdict`].
//!
//! ## Key Concepts
//!
//! - **Claim**: a factual statement with a verdict, a confidence and evidence
//! - **Span**: a half-open `[start, end)` char range into the analyzed text
//! - **Verdict**: the closed set of evidentiary outcomes
//! - **Summary**: per-verdict counts that must match the claim list
//!
//! ## Trust boundary
//!
//! Results are treated as read-only input. [`VerificationResult::validate`]
//! rejects a result whose overall shape is wrong (duplicate ids, counts that
//! do not match, scores out of range). Individual span problems are *not* a
//! shape error; they are left for the renderers to skip.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod error;
pub mod result;
pub mod source;
pub mod verdict;

// Re-exports for convenience
pub use claim::{Claim, ClaimId, ClaimType, Span, TimeSensitivity, Topic};
pub use error::DomainError;
pub use result::{VerificationMetadata, VerificationResult, VerificationSummary};
pub use source::{ClaimSources, SourceInfo, SourceRole};
pub use verdict::Verdict;
