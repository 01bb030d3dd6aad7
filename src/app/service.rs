// NewsSleuth - app/service.rs
//
// Analysis orchestration: validate the submission, wait out the simulated
// remote-call delay, score the content, and record it in history.
//
// A history write failure does not fail the analysis. The result is still
// returned and the outcome carries `HistoryStatus::Unsaved` so the caller
// can tell the user their history was not updated.

use crate::app::history::HistoryStore;
use crate::core::analyzer::{self, RandomSource};
use crate::core::model::{AnalysisResult, InputType};
use crate::util::constants::MAX_CONTENT_CHARS;
use crate::util::error::InputError;
use crate::util::logging::preview;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What happened to the history record of an analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStatus {
    /// Stored under `id`.
    Saved { id: String },
    /// The store rejected the write; the analysis itself succeeded.
    Unsaved { reason: String },
    /// No history store is attached.
    Disabled,
}

/// Result of a completed analysis plus its history bookkeeping.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub history: HistoryStatus,
}

/// Runs analyses against an optional history store.
pub struct AnalysisService {
    store: Option<Arc<dyn HistoryStore>>,
    rng: Mutex<Box<dyn RandomSource + Send>>,
    delay: Duration,
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("history", &self.store.is_some())
            .field("delay", &self.delay)
            .finish()
    }
}

impl AnalysisService {
    /// Service with an entropy-seeded random source.
    pub fn new(store: Option<Arc<dyn HistoryStore>>, delay: Duration) -> Self {
        Self {
            store,
            rng: Mutex::new(Box::new(fastrand::Rng::new())),
            delay,
        }
    }

    /// Replace the random source (tests pin confidence values this way).
    pub fn with_random(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    /// Analyse `content` and record it in history.
    ///
    /// Fails only on invalid input; nothing is analysed or stored then.
    pub fn analyze(
        &self,
        input_type: InputType,
        content: &str,
    ) -> Result<AnalysisOutcome, InputError> {
        validate(content)?;

        tracing::debug!(
            input_type = %input_type,
            preview = %preview(content),
            delay_ms = self.delay.as_millis() as u64,
            "Analysis requested"
        );

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let result = {
            // The source holds no invariants a panic could break.
            let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
            analyzer::analyze(input_type, content, &mut **rng, Utc::now())
        };

        let history = match &self.store {
            None => HistoryStatus::Disabled,
            Some(store) => match store.append(input_type, content, &result) {
                Ok(item) => HistoryStatus::Saved { id: item.id },
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to save analysis to history");
                    HistoryStatus::Unsaved {
                        reason: e.to_string(),
                    }
                }
            },
        };

        tracing::info!(
            input_type = %input_type,
            verdict = %result.verdict,
            confidence = result.confidence,
            red_flags = result.red_flags.len(),
            "Analysis complete"
        );

        Ok(AnalysisOutcome { result, history })
    }
}

/// Reject empty or oversized submissions before any work is done.
pub fn validate(content: &str) -> Result<(), InputError> {
    if content.trim().is_empty() {
        return Err(InputError::EmptyContent);
    }
    let length = content.chars().count();
    if length > MAX_CONTENT_CHARS {
        return Err(InputError::ContentTooLong {
            length,
            max: MAX_CONTENT_CHARS,
        });
    }
    Ok(())
}
