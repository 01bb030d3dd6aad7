// NewsSleuth - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// The serialised field names (camelCase, `type`, uppercase verdicts) are the
// on-disk history format and must stay stable across releases.

use crate::util::error::InputError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Input type
// =============================================================================

/// Kind of content submitted for analysis.
///
/// Media types (`Image`, `Video`) carry a local path or URI as their content;
/// the reference string itself is what gets scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Url,
    Image,
    Video,
    Headline,
}

impl InputType {
    /// Returns all variants in menu order.
    pub fn all() -> &'static [InputType] {
        &[
            InputType::Text,
            InputType::Url,
            InputType::Image,
            InputType::Video,
            InputType::Headline,
        ]
    }

    /// Lowercase identifier, identical to the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Url => "url",
            InputType::Image => "image",
            InputType::Video => "video",
            InputType::Headline => "headline",
        }
    }

    /// Whether the content is a reference to a media file rather than prose.
    pub fn is_media(&self) -> bool {
        matches!(self, InputType::Image | InputType::Video)
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        InputType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| InputError::UnknownInputType {
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Verdict
// =============================================================================

/// Three-way classification of analysed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Real,
    Fake,
    Uncertain,
}

impl Verdict {
    /// Uppercase label, identical to the serialised form.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Real => "REAL",
            Verdict::Fake => "FAKE",
            Verdict::Uncertain => "UNCERTAIN",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Analysis result
// =============================================================================

/// Rationale shown alongside a verdict, one sentence per aspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub source_credibility: String,
    pub language_quality: String,
    pub factual_consistency: String,
    pub bias_indicators: String,
    pub verification_status: String,
}

/// Outcome of a single analysis. Produced once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub verdict: Verdict,

    /// Percentage in 0..=100; the sub-range depends on the verdict.
    pub confidence: u8,

    pub summary: String,

    pub analysis: ContentAnalysis,

    /// Reasons the content looked suspicious, in trigger order.
    pub red_flags: Vec<String>,

    /// Fixed advice list, identical for every result.
    pub recommendations: Vec<String>,

    /// Fact-checking sites; present only for URL input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,

    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// History item
// =============================================================================

/// Persisted record of one past analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Decimal epoch-millisecond id, unique within the store.
    pub id: String,

    #[serde(rename = "type")]
    pub input_type: InputType,

    /// First `HISTORY_CONTENT_MAX_CHARS` characters of the submitted content.
    pub content: String,

    pub result: AnalysisResult,

    pub timestamp: DateTime<Utc>,
}

/// Return the first `max` chars of `content`, never splitting a character.
pub fn truncate_chars(content: &str, max: usize) -> String {
    match content.char_indices().nth(max) {
        Some((byte_idx, _)) => content[..byte_idx].to_string(),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_parses_case_insensitively() {
        assert_eq!("URL".parse::<InputType>().unwrap(), InputType::Url);
        assert_eq!(" headline ".parse::<InputType>().unwrap(), InputType::Headline);
        assert!(matches!(
            "podcast".parse::<InputType>(),
            Err(InputError::UnknownInputType { .. })
        ));
    }

    #[test]
    fn test_verdict_serialises_uppercase() {
        assert_eq!(serde_json::to_string(&Verdict::Uncertain).unwrap(), "\"UNCERTAIN\"");
        let v: Verdict = serde_json::from_str("\"FAKE\"").unwrap();
        assert_eq!(v, Verdict::Fake);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    /// History written by earlier releases uses camelCase keys, a `type`
    /// key, millisecond timestamps and omits `sources` for non-URL input.
    #[test]
    fn test_history_item_reads_legacy_json() {
        let json = r#"{
            "id": "1700000000000",
            "type": "headline",
            "content": "Hi",
            "result": {
                "verdict": "UNCERTAIN",
                "confidence": 47,
                "summary": "s",
                "analysis": {
                    "sourceCredibility": "a",
                    "languageQuality": "b",
                    "factualConsistency": "c",
                    "biasIndicators": "d",
                    "verificationStatus": "e"
                },
                "redFlags": ["Content is unusually short for a news article"],
                "recommendations": [],
                "timestamp": "2023-11-14T22:13:20.000Z"
            },
            "timestamp": "2023-11-14T22:13:20.000Z"
        }"#;
        let item: HistoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.input_type, InputType::Headline);
        assert_eq!(item.result.verdict, Verdict::Uncertain);
        assert_eq!(item.result.analysis.bias_indicators, "d");
        assert!(item.result.sources.is_none());

        let out = serde_json::to_string(&item).unwrap();
        assert!(out.contains("\"redFlags\""));
        assert!(!out.contains("sources"));
    }
}
