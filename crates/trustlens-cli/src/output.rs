//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use trustlens_domain::{Claim, Verdict, VerificationResult};
use trustlens_highlight::{
    style_of, ClaimCard, Rgb, ShowOutcome, SkipReason, StructuredRender, VerdictStyle,
};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest claim text shown in a table cell
const CELL_CHARS: usize = 48;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the claims of a result.
    pub fn format_claims(&self, result: &VerificationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.claims)?),
            OutputFormat::Table => Ok(self.format_claims_table(result)),
            OutputFormat::Quiet => Ok(result
                .claims
                .iter()
                .map(|c| c.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_claims_table(&self, result: &VerificationResult) -> String {
        if result.claims.is_empty() {
            return self.colorize("No claims found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Verdict", "Confidence", "Span", "Sources", "Text"]);

        for claim in &result.claims {
            builder.push_record([
                claim.id.to_string(),
                self.verdict_label(claim.verdict),
                format!("{:.0}%", claim.confidence * 100.0),
                claim.span.to_string(),
                format!("+{} / -{}", claim.sources.supporting.len(), claim.sources.contradicting.len()),
                truncate(&claim.text, CELL_CHARS),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", table, self.summary_line(result))
    }

    /// One-line verdict summary with the page score.
    pub fn summary_line(&self, result: &VerificationResult) -> String {
        let counts: Vec<String> = Verdict::ALL
            .iter()
            .filter(|v| result.summary.count(**v) > 0)
            .map(|v| format!("{} {}", result.summary.count(*v), style_of(*v).label.to_lowercase()))
            .collect();
        let counts = if counts.is_empty() {
            "no claims".to_string()
        } else {
            counts.join(", ")
        };
        format!(
            "Page score: {:.0}/100 ({} claims: {})",
            result.page_score,
            result.summary.total(),
            counts
        )
    }

    /// Format the segments of a structured render.
    pub fn format_segments(&self, render: &StructuredRender<'_>) -> Result<String> {
        let rows = segment_rows(render);
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = rows
                    .iter()
                    .map(|row| {
                        serde_json::json!({
                            "start": row.start,
                            "end": row.end,
                            "claim_id": row.claim.map(|c| c.id.as_str()),
                            "verdict": row.claim.map(|c| c.verdict),
                            "text": row.text,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(rows
                .iter()
                .filter_map(|row| row.claim.map(|c| c.id.to_string()))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["#", "Start", "End", "Claim", "Verdict", "Text"]);
                for (i, row) in rows.iter().enumerate() {
                    builder.push_record([
                        i.to_string(),
                        row.start.to_string(),
                        row.end.to_string(),
                        row.claim.map(|c| c.id.to_string()).unwrap_or_default(),
                        row.claim.map(|c| self.verdict_label(c.verdict)).unwrap_or_default(),
                        format!("{:?}", truncate(row.text, CELL_CHARS)),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let mut out = table.to_string();
                for card in render.cards.iter().filter(|c| !c.inline) {
                    out.push('\n');
                    out.push_str(&self.warning(&format!(
                        "{} not shown inline: {}",
                        card.claim.id,
                        skip_reason(card)
                    )));
                }
                Ok(out)
            }
        }
    }

    /// Format the structured view: colored text followed by claim cards.
    pub fn format_render(
        &self,
        render: &StructuredRender<'_>,
        result: &VerificationResult,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "page_score": result.page_score,
                    "segments": render.segments.iter().map(|s| serde_json::json!({
                        "text": s.text,
                        "claim_id": s.claim.map(|c| c.id.as_str()),
                        "selected": s.selected,
                    })).collect::<Vec<_>>(),
                    "claims": render.cards.iter().map(|card| serde_json::json!({
                        "id": card.claim.id.as_str(),
                        "verdict": card.claim.verdict,
                        "label": card.style.label,
                        "confidence": card.claim.confidence,
                        "inline": card.inline,
                        "expanded": card.expanded,
                        "skip_reason": card.skip.as_ref().map(|_| skip_reason(card)),
                    })).collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(render
                .selected_ids()
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut out = self.summary_line(result);
                out.push_str("\n\n");
                for segment in &render.segments {
                    match segment.style {
                        Some(style) => out.push_str(&self.paint_claim(segment.text, style, segment.selected)),
                        None => out.push_str(segment.text),
                    }
                }
                out.push_str("\n\nClaims:");
                for card in &render.cards {
                    out.push('\n');
                    out.push_str(&self.format_card(card));
                }
                Ok(out)
            }
        }
    }

    fn format_card(&self, card: &ClaimCard<'_>) -> String {
        let marker = if card.expanded { "▶" } else { "●" };
        let mut out = format!(
            "  {} {}  {:.0}%  {}  \"{}\"",
            marker,
            self.verdict_label(card.claim.verdict),
            card.claim.confidence * 100.0,
            card.claim.id,
            truncate(&card.claim.text, CELL_CHARS)
        );
        if !card.inline {
            out.push_str(&format!("  ({})", skip_reason(card)));
        }
        if card.expanded {
            if !card.claim.reasoning.is_empty() {
                out.push_str(&format!("\n      {}", card.claim.reasoning));
            }
            for source in card.claim.sources.iter() {
                out.push_str(&format!("\n      - {} ({})", source.domain, source.url));
            }
        }
        out
    }

    /// Format the outcome of a live-page highlight.
    pub fn format_highlight(&self, claim: &Claim, outcome: ShowOutcome, html: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "claim_id": claim.id.as_str(),
                "found": outcome != ShowOutcome::NotFound,
                "html": html,
            }))?),
            OutputFormat::Quiet | OutputFormat::Table => Ok(html.to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Verdict label, tinted with the verdict's border color.
    fn verdict_label(&self, verdict: Verdict) -> String {
        let style = style_of(verdict);
        match (self.color_enabled, Rgb::parse_hex(style.border)) {
            (true, Some(rgb)) => style.label.truecolor(rgb.r, rgb.g, rgb.b).to_string(),
            _ => style.label.to_string(),
        }
    }

    /// Claim text in the verdict's colors; brackets when color is off.
    fn paint_claim(&self, text: &str, style: &VerdictStyle, selected: bool) -> String {
        if !self.color_enabled {
            return if selected {
                format!("[[{}]]", text)
            } else {
                format!("[{}]", text)
            };
        }
        let (fg, bg, _) = style.rgb();
        let mut painted = text.normal();
        if let Some(fg) = fg {
            painted = painted.truecolor(fg.r, fg.g, fg.b);
        }
        if let Some(bg) = bg {
            painted = painted.on_truecolor(bg.r, bg.g, bg.b);
        }
        if selected {
            painted = painted.bold().underline();
        }
        painted.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// A segment with its char offsets into the analyzed text
struct SegmentRow<'a> {
    start: usize,
    end: usize,
    claim: Option<&'a Claim>,
    text: &'a str,
}

fn segment_rows<'a>(render: &StructuredRender<'a>) -> Vec<SegmentRow<'a>> {
    let mut cursor = 0;
    render
        .segments
        .iter()
        .map(|segment| {
            let start = cursor;
            cursor += segment.text.chars().count();
            SegmentRow {
                start,
                end: cursor,
                claim: segment.claim,
                text: segment.text,
            }
        })
        .collect()
}

fn skip_reason(card: &ClaimCard<'_>) -> String {
    match &card.skip {
        Some(SkipReason::Invalid(e)) => e.to_string(),
        Some(SkipReason::Overlaps(id)) => format!("overlaps {}", id),
        None => String::new(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
