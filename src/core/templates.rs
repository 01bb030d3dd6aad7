// NewsSleuth - core/templates.rs
//
// Decision table mapping verdict, input type and content signals to the
// fixed rationale texts of a result. Each field is an ordered list of
// (condition, text) rows; the first matching row wins and every table
// ends with an `Always` row.
// Core layer: pure data, no I/O.

use crate::core::heuristics::ContentSignals;
use crate::core::model::{ContentAnalysis, InputType, Verdict};

/// Condition column of a template row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    VerdictIs(Verdict),
    InputIs(InputType),
    SuspiciousWords,
    FormattingIssues,
}

/// Facts a condition can be evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub verdict: Verdict,
    pub input_type: InputType,
    pub signals: &'a ContentSignals,
}

impl Condition {
    pub fn holds(&self, ctx: &TemplateContext<'_>) -> bool {
        match *self {
            Condition::Always => true,
            Condition::VerdictIs(v) => ctx.verdict == v,
            Condition::InputIs(t) => ctx.input_type == t,
            Condition::SuspiciousWords => ctx.signals.has_suspicious_words(),
            Condition::FormattingIssues => ctx.signals.has_formatting_issues(),
        }
    }
}

pub type TemplateTable = &'static [(Condition, &'static str)];

pub const SUMMARY: TemplateTable = &[
    (
        Condition::VerdictIs(Verdict::Fake),
        "This content shows multiple indicators of misinformation and should be treated with skepticism.",
    ),
    (
        Condition::VerdictIs(Verdict::Real),
        "This content appears to be legitimate based on our analysis, but always verify through multiple sources.",
    ),
    (
        Condition::Always,
        "Unable to determine authenticity with high confidence. Additional verification recommended.",
    ),
];

pub const SOURCE_CREDIBILITY: TemplateTable = &[
    (
        Condition::InputIs(InputType::Url),
        "Domain reputation and historical accuracy checked against known fact-checking databases.",
    ),
    (
        Condition::Always,
        "Source information not available for this input type. Consider checking the original source.",
    ),
];

pub const LANGUAGE_QUALITY: TemplateTable = &[
    (
        Condition::FormattingIssues,
        "Language quality is poor with excessive formatting and emotional appeals.",
    ),
    (
        Condition::Always,
        "Language appears professional and well-structured.",
    ),
];

pub const FACTUAL_CONSISTENCY: TemplateTable = &[(
    Condition::Always,
    "Cross-referenced claims against verified databases and recent news reports.",
)];

pub const BIAS_INDICATORS: TemplateTable = &[
    (
        Condition::SuspiciousWords,
        "Strong emotional language and sensationalism detected, indicating potential bias.",
    ),
    (
        Condition::Always,
        "Content appears relatively neutral with minimal bias indicators.",
    ),
];

pub const VERIFICATION_STATUS: TemplateTable = &[
    (
        Condition::VerdictIs(Verdict::Fake),
        "Multiple red flags detected. Content likely contains misinformation.",
    ),
    (
        Condition::Always,
        "No major verification issues found, but independent verification is always recommended.",
    ),
];

/// Advice attached to every result, in display order.
pub const RECOMMENDATIONS: &[&str] = &[
    "Cross-check this information with established news sources",
    "Look for the original source of the claim",
    "Check if reputable fact-checking organizations have reviewed this",
    "Be cautious of sharing unverified information",
    "Consider the motivation behind the content",
];

pub const RED_FLAG_SENSATIONAL: &str = "Contains sensational or clickbait language";
pub const RED_FLAG_CAPS: &str = "Excessive use of capital letters detected";
pub const RED_FLAG_PUNCTUATION: &str = "Unusual punctuation patterns found";
pub const RED_FLAG_SHORT: &str = "Content is unusually short for a news article";

/// Text of the first row in `table` whose condition holds.
pub fn select(table: TemplateTable, ctx: &TemplateContext<'_>) -> &'static str {
    table
        .iter()
        .find(|(cond, _)| cond.holds(ctx))
        .map(|(_, text)| *text)
        .unwrap_or_default()
}

/// Summary sentence for the context's verdict.
pub fn summary(ctx: &TemplateContext<'_>) -> String {
    select(SUMMARY, ctx).to_string()
}

/// Fill in all five rationale fields.
pub fn content_analysis(ctx: &TemplateContext<'_>) -> ContentAnalysis {
    ContentAnalysis {
        source_credibility: select(SOURCE_CREDIBILITY, ctx).to_string(),
        language_quality: select(LANGUAGE_QUALITY, ctx).to_string(),
        factual_consistency: select(FACTUAL_CONSISTENCY, ctx).to_string(),
        bias_indicators: select(BIAS_INDICATORS, ctx).to_string(),
        verification_status: select(VERIFICATION_STATUS, ctx).to_string(),
    }
}

/// Red flags for the detected signals, in fixed trigger order.
pub fn red_flags(signals: &ContentSignals) -> Vec<String> {
    [
        (signals.has_suspicious_words(), RED_FLAG_SENSATIONAL),
        (signals.excessive_caps, RED_FLAG_CAPS),
        (signals.excessive_punctuation, RED_FLAG_PUNCTUATION),
        (signals.is_short(), RED_FLAG_SHORT),
    ]
    .into_iter()
    .filter(|(fired, _)| *fired)
    .map(|(_, flag)| flag.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(verdict: Verdict, input_type: InputType, signals: &ContentSignals) -> TemplateContext<'_> {
        TemplateContext {
            verdict,
            input_type,
            signals,
        }
    }

    /// Every table must end in an unconditional row so `select` never
    /// falls through to an empty string.
    #[test]
    fn test_every_table_ends_with_always() {
        for table in [
            SUMMARY,
            SOURCE_CREDIBILITY,
            LANGUAGE_QUALITY,
            FACTUAL_CONSISTENCY,
            BIAS_INDICATORS,
            VERIFICATION_STATUS,
        ] {
            assert_eq!(table.last().map(|(c, _)| *c), Some(Condition::Always));
        }
    }

    #[test]
    fn test_summary_keyed_by_verdict() {
        let s = ContentSignals::default();
        assert!(summary(&ctx(Verdict::Fake, InputType::Text, &s)).starts_with("This content shows"));
        assert!(summary(&ctx(Verdict::Real, InputType::Text, &s)).starts_with("This content appears"));
        assert!(summary(&ctx(Verdict::Uncertain, InputType::Text, &s)).starts_with("Unable"));
    }

    #[test]
    fn test_analysis_fields_follow_signals() {
        let signals = ContentSignals {
            matched_phrases: vec!["secret"],
            excessive_punctuation: true,
            length: 120,
            ..Default::default()
        };
        let a = content_analysis(&ctx(Verdict::Fake, InputType::Url, &signals));
        assert!(a.source_credibility.starts_with("Domain reputation"));
        assert!(a.language_quality.starts_with("Language quality is poor"));
        assert!(a.bias_indicators.starts_with("Strong emotional language"));
        assert!(a.verification_status.starts_with("Multiple red flags"));

        let clean = ContentSignals {
            length: 120,
            ..Default::default()
        };
        let a = content_analysis(&ctx(Verdict::Real, InputType::Headline, &clean));
        assert!(a.source_credibility.starts_with("Source information not available"));
        assert!(a.language_quality.starts_with("Language appears professional"));
        assert!(a.bias_indicators.starts_with("Content appears relatively neutral"));
        assert!(a.verification_status.starts_with("No major verification issues"));
    }

    #[test]
    fn test_red_flags_in_trigger_order() {
        let signals = ContentSignals {
            matched_phrases: vec!["shocking"],
            excessive_caps: true,
            excessive_punctuation: true,
            length: 10,
        };
        assert_eq!(
            red_flags(&signals),
            vec![
                RED_FLAG_SENSATIONAL,
                RED_FLAG_CAPS,
                RED_FLAG_PUNCTUATION,
                RED_FLAG_SHORT
            ]
        );
        let none = ContentSignals {
            length: 100,
            ..Default::default()
        };
        assert!(red_flags(&none).is_empty());
    }
}
