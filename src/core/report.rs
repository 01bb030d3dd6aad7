// NewsSleuth - core/report.rs
//
// Plain-text rendering of analysis results and history listings for the
// terminal. Core layer: builds strings, never writes to stdout itself.

use crate::core::model::{truncate_chars, AnalysisResult, HistoryItem};
use crate::util::constants::LIST_PREVIEW_CHARS;
use std::fmt::Write;

/// Render a full result: verdict banner, summary, rationale, red flags,
/// recommendations and (for URLs) fact-checking sources.
pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_result(&mut out, result);
    out
}

fn write_result(out: &mut String, r: &AnalysisResult) -> std::fmt::Result {
    writeln!(out, "{}  ({}% confidence)", r.verdict, r.confidence)?;
    writeln!(out)?;
    writeln!(out, "Summary")?;
    writeln!(out, "  {}", r.summary)?;
    writeln!(out)?;
    writeln!(out, "Detailed Analysis")?;
    let a = &r.analysis;
    for (label, text) in [
        ("Source Credibility", &a.source_credibility),
        ("Language Quality", &a.language_quality),
        ("Factual Consistency", &a.factual_consistency),
        ("Bias Indicators", &a.bias_indicators),
        ("Verification Status", &a.verification_status),
    ] {
        writeln!(out, "  {label}: {text}")?;
    }

    if !r.red_flags.is_empty() {
        writeln!(out)?;
        writeln!(out, "Red Flags")?;
        for flag in &r.red_flags {
            writeln!(out, "  ! {flag}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Recommendations")?;
    for (i, rec) in r.recommendations.iter().enumerate() {
        writeln!(out, "  {}. {rec}", i + 1)?;
    }

    if let Some(sources) = r.sources.as_ref().filter(|s| !s.is_empty()) {
        writeln!(out)?;
        writeln!(out, "Fact-Checking Sources")?;
        for s in sources {
            writeln!(out, "  {s}")?;
        }
    }

    writeln!(out)?;
    write!(out, "Analysed at {}", r.timestamp.to_rfc3339())
}

/// Header for a stored item: its kind, when it was analysed and what was
/// submitted. Media entries are labelled as references, since only the
/// path or URI was checked.
pub fn render_item_header(item: &HistoryItem) -> String {
    let kind = item.input_type.as_str().to_uppercase();
    let subject = if item.input_type.is_media() {
        format!("{kind} reference")
    } else {
        kind
    };
    format!(
        "{subject} analysis from {}\n  {}",
        item.timestamp.to_rfc3339(),
        item.content
    )
}

/// Render the history list, newest first, one line per item.
pub fn render_history(items: &[HistoryItem]) -> String {
    if items.is_empty() {
        return "No history yet. Analyses you run will appear here.".to_string();
    }

    let mut out = String::new();
    let noun = if items.len() == 1 { "Analysis" } else { "Analyses" };
    let _ = writeln!(out, "{} {noun}", items.len());
    for item in items {
        let preview = truncate_chars(&item.content.replace('\n', " "), LIST_PREVIEW_CHARS);
        let ellipsis = if item.content.chars().count() > LIST_PREVIEW_CHARS {
            "…"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{id}  {date}  {ty:<8}  {verdict:<9} {conf:>3}%  {preview}{ellipsis}",
            id = item.id,
            date = item.timestamp.format("%Y-%m-%d"),
            ty = item.input_type.as_str().to_uppercase(),
            verdict = item.result.verdict.label(),
            conf = item.result.confidence,
        );
    }
    out.truncate(out.trim_end().len());
    out
}
