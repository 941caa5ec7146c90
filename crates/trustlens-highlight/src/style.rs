//! Verdict style registry
//!
//! Both views color claims through this module, so a verdict looks the same
//! in the claims list, the structured text and the live page. Dispatch is an
//! exhaustive `match` with no fallback arm: adding a verdict to the domain
//! model does not compile until it has a style here.

use crate::HighlightError;
use trustlens_domain::Verdict;

/// Display attributes for one verdict
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerdictStyle {
    /// Human-readable verdict name
    pub label: &'static str,
    /// Text color token (`#rrggbb`)
    pub foreground: &'static str,
    /// Fill color token (`#rrggbb`)
    pub background: &'static str,
    /// Underline/border color token (`#rrggbb`)
    pub border: &'static str,
    /// Relative weight of the verdict in the page score, [0, 1]
    pub score: f64,
}

/// An sRGB color decoded from a `#rrggbb` token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Decode a `#rrggbb` token
    pub fn parse_hex(token: &str) -> Option<Self> {
        let hex = token.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

const STRONGLY_SUPPORTED: VerdictStyle = VerdictStyle {
    label: "Strongly Supported",
    foreground: "#065f46",
    background: "#d1fae5",
    border: "#10b981",
    score: 1.0,
};

const SUPPORTED: VerdictStyle = VerdictStyle {
    label: "Supported",
    foreground: "#166534",
    background: "#dcfce7",
    border: "#22c55e",
    score: 0.85,
};

const MIXED: VerdictStyle = VerdictStyle {
    label: "Mixed",
    foreground: "#92400e",
    background: "#fef3c7",
    border: "#f59e0b",
    score: 0.50,
};

const WEAK: VerdictStyle = VerdictStyle {
    label: "Weak",
    foreground: "#9a3412",
    background: "#ffedd5",
    border: "#f97316",
    score: 0.35,
};

const CONTRADICTED: VerdictStyle = VerdictStyle {
    label: "Contradicted",
    foreground: "#991b1b",
    background: "#fee2e2",
    border: "#ef4444",
    score: 0.10,
};

const OUTDATED: VerdictStyle = VerdictStyle {
    label: "Outdated",
    foreground: "#5b21b6",
    background: "#ede9fe",
    border: "#8b5cf6",
    score: 0.40,
};

const NOT_VERIFIABLE: VerdictStyle = VerdictStyle {
    label: "Not Verifiable",
    foreground: "#374151",
    background: "#f3f4f6",
    border: "#9ca3af",
    score: 0.50,
};

/// Style for a verdict
pub fn style_of(verdict: Verdict) -> &'static VerdictStyle {
    match verdict {
        Verdict::StronglySupported => &STRONGLY_SUPPORTED,
        Verdict::Supported => &SUPPORTED,
        Verdict::Mixed => &MIXED,
        Verdict::Weak => &WEAK,
        Verdict::Contradicted => &CONTRADICTED,
        Verdict::Outdated => &OUTDATED,
        Verdict::NotVerifiable => &NOT_VERIFIABLE,
    }
}

/// Style for a verdict given by wire name
///
/// # Errors
///
/// Returns [`HighlightError::UnknownVerdict`] for any name outside the closed
/// set. Callers must propagate it; there is no default style.
pub fn style_of_name(name: &str) -> Result<&'static VerdictStyle, HighlightError> {
    Verdict::parse(name)
        .map(style_of)
        .ok_or_else(|| HighlightError::UnknownVerdict(name.to_string()))
}

impl VerdictStyle {
    /// CSS declarations for an unselected highlight
    pub fn inline_css(&self) -> String {
        format!(
            "background-color: {}; color: {}; border-bottom: 2px solid {}; border-radius: 2px; cursor: pointer",
            self.background, self.foreground, self.border
        )
    }

    /// CSS declarations for the selected highlight
    pub fn selected_css(&self) -> String {
        format!("{}; outline: 2px solid {}", self.inline_css(), self.border)
    }

    /// Decoded colors as `(foreground, background, border)`
    pub fn rgb(&self) -> (Option<Rgb>, Option<Rgb>, Option<Rgb>) {
        (
            Rgb::parse_hex(self.foreground),
            Rgb::parse_hex(self.background),
            Rgb::parse_hex(self.border),
        )
    }
}
