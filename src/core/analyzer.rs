// NewsSleuth - core/analyzer.rs
//
// Heuristic analyzer: maps (input type, content) to an AnalysisResult.
// Deterministic apart from the confidence jitter, which is drawn from an
// injected RandomSource. The clock is passed in by the caller.
// Core layer: no I/O, no sleeping, no persistence.

use crate::core::heuristics::ContentSignals;
use crate::core::model::{AnalysisResult, InputType, Verdict};
use crate::core::templates::{self, TemplateContext};
use crate::util::constants::{
    FACT_CHECK_SOURCES, FAKE_CONFIDENCE_BASE, FAKE_CONFIDENCE_SPAN, REAL_CONFIDENCE_BASE,
    REAL_CONFIDENCE_SPAN, UNCERTAIN_CONFIDENCE_BASE, UNCERTAIN_CONFIDENCE_SPAN,
    UNCERTAIN_LENGTH_THRESHOLD,
};
use chrono::{DateTime, Utc};

/// Source of the uniform integers used for confidence jitter.
pub trait RandomSource {
    /// Uniform integer in `0..upper`. `upper` is always non-zero.
    fn below(&mut self, upper: u32) -> u32;
}

impl RandomSource for fastrand::Rng {
    fn below(&mut self, upper: u32) -> u32 {
        self.u32(0..upper)
    }
}

/// Always returns the same offset, clamped into range. Pins confidence
/// values in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn below(&mut self, upper: u32) -> u32 {
        self.0.min(upper.saturating_sub(1))
    }
}

/// Verdict bucket for a set of signals, in priority order.
pub fn classify(signals: &ContentSignals) -> Verdict {
    if signals.any_trigger() {
        Verdict::Fake
    } else if signals.length < UNCERTAIN_LENGTH_THRESHOLD {
        Verdict::Uncertain
    } else {
        Verdict::Real
    }
}

/// Inclusive confidence range for a verdict.
pub fn confidence_range(verdict: Verdict) -> std::ops::RangeInclusive<u8> {
    let (base, span) = confidence_params(verdict);
    base..=base + (span - 1) as u8
}

fn confidence_params(verdict: Verdict) -> (u8, u32) {
    match verdict {
        Verdict::Fake => (FAKE_CONFIDENCE_BASE, FAKE_CONFIDENCE_SPAN),
        Verdict::Uncertain => (UNCERTAIN_CONFIDENCE_BASE, UNCERTAIN_CONFIDENCE_SPAN),
        Verdict::Real => (REAL_CONFIDENCE_BASE, REAL_CONFIDENCE_SPAN),
    }
}

fn draw_confidence(verdict: Verdict, rng: &mut dyn RandomSource) -> u8 {
    let (base, span) = confidence_params(verdict);
    // Clamp so a misbehaving source cannot leave the verdict's range.
    let offset = rng.below(span).min(span - 1);
    base + offset as u8
}

/// Score `content` and build the full result.
pub fn analyze(
    input_type: InputType,
    content: &str,
    rng: &mut dyn RandomSource,
    now: DateTime<Utc>,
) -> AnalysisResult {
    let signals = ContentSignals::detect(content);
    let verdict = classify(&signals);
    let confidence = draw_confidence(verdict, rng);

    let ctx = TemplateContext {
        verdict,
        input_type,
        signals: &signals,
    };

    let sources = (input_type == InputType::Url)
        .then(|| FACT_CHECK_SOURCES.iter().map(|s| s.to_string()).collect());

    tracing::debug!(
        input_type = %input_type,
        verdict = %verdict,
        confidence,
        length = signals.length,
        "Content analysed"
    );

    AnalysisResult {
        verdict,
        confidence,
        summary: templates::summary(&ctx),
        analysis: templates::content_analysis(&ctx),
        red_flags: templates::red_flags(&signals),
        recommendations: templates::RECOMMENDATIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        sources,
        timestamp: now,
    }
}
