//! TrustLens Highlighting Engine
//!
//! Aligns verified claims with the text they were extracted from and keeps
//! two views of that alignment in sync.
//!
//! # Overview
//!
//! The verification provider returns claims whose spans index into an
//! analyzed copy of the page text. This crate renders those claims twice:
//!
//! - a **structured view** that segments the analyzed text by span and lists
//!   every claim as a card
//! - a **live page view** that finds the claim's literal text in the page
//!   document and wraps it in a styled, reversible highlight
//!
//! A single [`SelectionCoordinator`] drives both through the [`Overlay`].
//!
//! # Architecture
//!
//! ```text
//! VerificationResult ─┬─> segment ──────────────> StructuredView
//!                     │                                ^
//!                     │   SelectionCoordinator ────────┤
//!                     │                                v
//!                     └─> locate_in_dom ─> highlight ─> LivePageView
//! ```
//!
//! # Degradation
//!
//! A claim with a malformed span, or one that overlaps an earlier claim, keeps
//! its card but gets no inline segment. A claim whose text is not in the page
//! stays selectable but is not highlighted there. An unknown verdict is never
//! degraded: it fails with [`HighlightError::UnknownVerdict`].
//!
//! # Example Usage
//!
//! ```
//! use trustlens_domain::{Claim, Span, Verdict};
//! use trustlens_highlight::{segment, Segment};
//!
//! let text = "The sky is blue.";
//! let claims = vec![
//!     Claim::new("a", Span::new(0, 3), "The", Verdict::Supported, 0.9),
//!     Claim::new("b", Span::new(4, 8), "sky ", Verdict::Weak, 0.4),
//! ];
//!
//! let segments = segment(text, &claims);
//! assert_eq!(segments.len(), 4);
//! assert_eq!(segments[1], Segment::Plain(" "));
//! assert_eq!(segments.iter().map(Segment::text).collect::<String>(), text);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dom;
pub mod error;
pub mod inject;
pub mod live;
pub mod locate;
pub mod overlay;
pub mod segment;
pub mod selection;
pub mod structured;
pub mod style;

// Re-exports for convenience
pub use config::{HighlightConfig, ScrollBehavior};
pub use dom::{Document, NodeId, PageNode};
pub use error::HighlightError;
pub use inject::{highlight, tooltip, unhighlight, wrap_range, HighlightHandle};
pub use live::{LivePageView, NoScroll, ShowOutcome, Viewport};
pub use locate::{locate_in_dom, Boundary, DomRange, TextIndex};
pub use overlay::Overlay;
pub use segment::{segment, segment_claims, Segment, Segmentation, SkipReason, SkippedClaim};
pub use selection::{Selection, SelectionChange, SelectionCoordinator, SelectionObserver};
pub use structured::{ClaimCard, RenderedSegment, StructuredRender, StructuredView};
pub use style::{style_of, style_of_name, Rgb, VerdictStyle};
