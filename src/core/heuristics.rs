// NewsSleuth - core/heuristics.rs
//
// Content signal extraction. Each signal is a cheap, independent check on
// the raw content; the analyzer combines them into a verdict.
// Core layer: pure logic, no I/O.

use crate::util::constants::{
    CAPS_RATIO_THRESHOLD, PUNCTUATION_RUN_LIMIT, PUNCTUATION_RUN_PATTERN,
    SHORT_CONTENT_THRESHOLD, SUSPICIOUS_PHRASES,
};
use regex::Regex;
use std::sync::OnceLock;

/// Signals detected in a piece of content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSignals {
    /// Suspicious phrases found, in `SUSPICIOUS_PHRASES` order.
    pub matched_phrases: Vec<&'static str>,

    /// Uppercase letters exceed the caps threshold of total length.
    pub excessive_caps: bool,

    /// More than `PUNCTUATION_RUN_LIMIT` runs of repeated `!`/`?`.
    pub excessive_punctuation: bool,

    /// Content length in chars.
    pub length: usize,
}

impl ContentSignals {
    /// Inspect `content` and record every signal.
    pub fn detect(content: &str) -> Self {
        let length = content.chars().count();
        let signals = Self {
            matched_phrases: matched_phrases(content),
            excessive_caps: has_excessive_caps(content, length),
            excessive_punctuation: punctuation_runs(content) > PUNCTUATION_RUN_LIMIT,
            length,
        };
        tracing::trace!(
            phrases = signals.matched_phrases.len(),
            caps = signals.excessive_caps,
            punctuation = signals.excessive_punctuation,
            length,
            "Content signals detected"
        );
        signals
    }

    /// At least one suspicious phrase was found.
    pub fn has_suspicious_words(&self) -> bool {
        !self.matched_phrases.is_empty()
    }

    /// Caps or punctuation: the two formatting triggers.
    pub fn has_formatting_issues(&self) -> bool {
        self.excessive_caps || self.excessive_punctuation
    }

    /// Any trigger that forces a FAKE verdict fired.
    pub fn any_trigger(&self) -> bool {
        self.has_suspicious_words() || self.has_formatting_issues()
    }

    /// Too short to read as a news article.
    pub fn is_short(&self) -> bool {
        self.length < SHORT_CONTENT_THRESHOLD
    }
}

/// Suspicious phrases contained in `content`, case-insensitively.
pub fn matched_phrases(content: &str) -> Vec<&'static str> {
    let lower = content.to_lowercase();
    SUSPICIOUS_PHRASES
        .iter()
        .copied()
        .filter(|phrase| lower.contains(phrase))
        .collect()
}

/// True when the number of uppercase letters exceeds the caps threshold of
/// `length`.
///
/// The denominator is the total content length, not the number of letters,
/// so digits, spaces and punctuation dilute the ratio.
pub fn has_excessive_caps(content: &str, length: usize) -> bool {
    let upper = content.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 > length as f64 * CAPS_RATIO_THRESHOLD
}

/// Number of non-overlapping runs of two or more `!`/`?` characters.
pub fn punctuation_runs(content: &str) -> usize {
    static RUN: OnceLock<Regex> = OnceLock::new();
    let re = RUN.get_or_init(|| {
        Regex::new(PUNCTUATION_RUN_PATTERN).expect("punctuation_runs: invalid regex")
    });
    re.find_iter(content).count()
}
