//! Span segmenter
//!
//! Splits analyzed text into an ordered run of plain and claim-tagged slices
//! that concatenate back to the input exactly. Spans are char offsets; the
//! segments borrow from the input text and claims.

use crate::HighlightError;
use std::ops::Range;
use tracing::{debug, warn};
use trustlens_domain::{Claim, ClaimId};

/// A contiguous slice of the analyzed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text not covered by any rendered claim
    Plain(&'a str),

    /// Text covered by exactly one claim
    ClaimText {
        /// Claim the slice belongs to
        claim_id: &'a ClaimId,
        /// Slice of the analyzed text
        text: &'a str,
    },
}

impl<'a> Segment<'a> {
    /// Text of the segment
    pub fn text(&self) -> &'a str {
        match *self {
            Segment::Plain(text) => text,
            Segment::ClaimText { text, .. } => text,
        }
    }

    /// Claim the segment is tagged with, if any
    pub fn claim_id(&self) -> Option<&'a ClaimId> {
        match *self {
            Segment::Plain(_) => None,
            Segment::ClaimText { claim_id, .. } => Some(claim_id),
        }
    }
}

/// Why a claim produced no segment
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason<'a> {
    /// The span does not fit the analyzed text
    Invalid(HighlightError),

    /// The span starts inside an earlier rendered claim
    Overlaps(&'a ClaimId),
}

/// A claim that stays in the claim list but has no visual span
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedClaim<'a> {
    /// The claim, unchanged
    pub claim: &'a Claim,
    /// Why it was skipped
    pub reason: SkipReason<'a>,
}

/// Segments plus the claims that could not be rendered inline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segmentation<'a> {
    /// Ordered, gap-free, non-overlapping segments
    pub segments: Vec<Segment<'a>>,
    /// Claims left out of `segments`, in the order they were rejected
    pub skipped: Vec<SkippedClaim<'a>>,
}

impl<'a> Segmentation<'a> {
    /// Concatenate every segment (always equals the analyzed text)
    pub fn text(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    /// Whether the claim has a rendered segment
    pub fn is_rendered(&self, id: &ClaimId) -> bool {
        self.segments.iter().any(|s| s.claim_id() == Some(id))
    }
}

/// Segment `text` by `claims`
///
/// Convenience wrapper over [`segment_claims`] that drops the skip report.
pub fn segment<'a>(text: &'a str, claims: &'a [Claim]) -> Vec<Segment<'a>> {
    segment_claims(text, claims).segments
}

/// Segment `text` by `claims`, reporting claims that were left out
///
/// Claims are ordered by span start, then span end (shorter first), then id,
/// so the output does not depend on the order claims arrive in. A claim whose
/// span is invalid, or which starts before the end of the previous rendered
/// claim, is skipped and reported; it never aborts segmentation.
pub fn segment_claims<'a, I>(text: &'a str, claims: I) -> Segmentation<'a>
where
    I: IntoIterator<Item = &'a Claim>,
{
    // Byte offset of every char boundary, including the end of the text
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = boundaries.len() - 1;

    let mut skipped = Vec::new();
    let mut placed: Vec<(&'a Claim, Range<usize>)> = Vec::new();

    for claim in claims {
        match claim.span.char_range(char_len) {
            Some(range) => placed.push((claim, range)),
            None => {
                warn!(
                    claim_id = %claim.id,
                    span = %claim.span,
                    text_chars = char_len,
                    "Skipping claim with invalid span"
                );
                skipped.push(SkippedClaim {
                    claim,
                    reason: SkipReason::Invalid(HighlightError::InvalidSpan {
                        claim_id: claim.id.to_string(),
                        start: claim.span.start,
                        end: claim.span.end,
                        text_len: char_len,
                    }),
                });
            }
        }
    }

    placed.sort_by(|(a, ra), (b, rb)| {
        ra.start
            .cmp(&rb.start)
            .then(ra.end.cmp(&rb.end))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut segments = Vec::with_capacity(placed.len() * 2 + 1);
    let mut cursor = 0;
    let mut last_rendered: Option<&'a ClaimId> = None;

    for (claim, range) in placed {
        if range.start < cursor {
            // Nested or crossing spans cannot be expressed as flat segments
            let previous = last_rendered.unwrap_or(&claim.id);
            debug!(claim_id = %claim.id, overlaps = %previous, "Skipping overlapping claim");
            skipped.push(SkippedClaim {
                claim,
                reason: SkipReason::Overlaps(previous),
            });
            continue;
        }
        if range.start > cursor {
            segments.push(Segment::Plain(&text[boundaries[cursor]..boundaries[range.start]]));
        }
        segments.push(Segment::ClaimText {
            claim_id: &claim.id,
            text: &text[boundaries[range.start]..boundaries[range.end]],
        });
        cursor = cursor.max(range.end);
        last_rendered = Some(&claim.id);
    }

    if cursor < char_len || segments.is_empty() {
        segments.push(Segment::Plain(&text[boundaries[cursor]..]));
    }

    Segmentation { segments, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustlens_domain::{Span, Verdict};

    fn claim(id: &str, start: i64, end: i64, text: &str) -> Claim {
        Claim::new(id, Span::new(start, end), text, Verdict::Supported, 0.9)
    }

    fn id(s: &str) -> ClaimId {
        ClaimId::from(s)
    }

    #[test]
    fn test_two_claims_with_gap() {
        let claims = vec![claim("a", 0, 3, "The"), claim("b", 4, 8, "sky ")];
        let (a, b) = (id("a"), id("b"));
        assert_eq!(
            segment("The sky is blue.", &claims),
            vec![
                Segment::ClaimText { claim_id: &a, text: "The" },
                Segment::Plain(" "),
                Segment::ClaimText { claim_id: &b, text: "sky " },
                Segment::Plain("is blue."),
            ]
        );
    }

    #[test]
    fn test_no_claims_yields_whole_text() {
        assert_eq!(segment("The sky is blue.", &[]), vec![Segment::Plain("The sky is blue.")]);
        assert_eq!(segment("", &[]), vec![Segment::Plain("")]);
    }

    #[test]
    fn test_overlapping_claim_is_skipped() {
        let text = "0123456789abcdefghij";
        let claims = vec![claim("a", 0, 10, ""), claim("b", 5, 15, "")];
        let result = segment_claims(text, &claims);

        let claim_segments: Vec<_> = result.segments.iter().filter_map(Segment::claim_id).collect();
        assert_eq!(claim_segments, vec![&id("a")]);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].claim, &claims[1]);
        assert_eq!(result.skipped[0].reason, SkipReason::Overlaps(&claims[0].id));
        assert_eq!(result.text(), text);

        // Input is untouched
        assert_eq!(claims[1].span, Span::new(5, 15));
    }

    #[test]
    fn test_inverted_span_is_skipped() {
        let text = "The sky is blue";
        assert_eq!(text.chars().count(), 15);
        let claims = vec![claim("bad", 20, 10, ""), claim("a", 4, 7, "sky")];
        let result = segment_claims(text, &claims);

        assert_eq!(result.text(), text);
        assert!(result.is_rendered(&id("a")));
        assert!(!result.is_rendered(&id("bad")));
        match &result.skipped[0].reason {
            SkipReason::Invalid(err) => {
                assert!(err.is_recoverable());
                assert!(matches!(err, HighlightError::InvalidSpan { start: 20, end: 10, .. }));
            }
            other => panic!("Expected invalid span, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_and_negative_spans_are_skipped() {
        let claims = vec![claim("neg", -2, 3, ""), claim("long", 2, 99, ""), claim("empty", 3, 3, "")];
        let result = segment_claims("short", &claims);
        assert_eq!(result.segments, vec![Segment::Plain("short")]);
        assert_eq!(result.skipped.len(), 3);
    }

    #[test]
    fn test_same_start_renders_shorter_span() {
        let claims = vec![claim("long", 0, 7, ""), claim("short", 0, 3, "")];
        let result = segment_claims("The sky is blue.", &claims);
        let short = id("short");
        assert_eq!(result.segments[0], Segment::ClaimText { claim_id: &short, text: "The" });
        assert_eq!(result.skipped[0].claim.id, id("long"));
    }

    #[test]
    fn test_adjacent_spans_both_render() {
        let claims = vec![claim("b", 3, 6, ""), claim("a", 0, 3, "")];
        let result = segment_claims("abcdef", &claims);
        assert!(result.skipped.is_empty());
        assert_eq!(result.segments.len(), 2);
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        let text = "Καλημέρα κόσμε, 你好 world";
        let claims = vec![claim("greek", 9, 14, "κόσμε"), claim("cjk", 16, 18, "你好")];
        let result = segment_claims(text, &claims);
        let (greek, cjk) = (id("greek"), id("cjk"));
        assert!(result.segments.contains(&Segment::ClaimText { claim_id: &greek, text: "κόσμε" }));
        assert!(result.segments.contains(&Segment::ClaimText { claim_id: &cjk, text: "你好" }));
        assert_eq!(result.text(), text);
    }

    #[test]
    fn test_claim_covering_whole_text() {
        let claims = vec![claim("all", 0, 4, "abcd")];
        let all = id("all");
        assert_eq!(
            segment("abcd", &claims),
            vec![Segment::ClaimText { claim_id: &all, text: "abcd" }]
        );
    }
}
