//! Sentiment scoring on top of a raw three-class model.

use super::error::{ensure_text, AnalysisError, DegradationPolicy};
use super::types::SentimentLabel;
use crate::models::SentimentModel;
use crate::text::truncate_chars;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Input longer than this many characters is silently cut before scoring.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 512;

/// Confidence reported alongside the degraded `neutral` answer.
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    /// Softmax probability of `label`, in [0, 1].
    pub confidence: f32,
}

impl SentimentScore {
    fn fallback() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: FALLBACK_CONFIDENCE,
        }
    }
}

pub struct SentimentScorer {
    model: Arc<dyn SentimentModel>,
    policy: DegradationPolicy,
    max_input_chars: usize,
}

impl SentimentScorer {
    pub fn new(model: Arc<dyn SentimentModel>, policy: DegradationPolicy) -> Self {
        Self {
            model,
            policy,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars.max(1);
        self
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    pub fn score(&self, text: &str) -> Result<SentimentScore, AnalysisError> {
        ensure_text(text)?;
        let input = truncate_chars(text, self.max_input_chars);

        let logits = match self.model.class_scores(input) {
            Ok(logits) => logits,
            Err(e) => {
                return match self.policy {
                    DegradationPolicy::FailFast => {
                        Err(AnalysisError::model_unavailable(self.model.name(), e))
                    }
                    DegradationPolicy::Default => {
                        warn!(
                            "Sentiment backend {} failed ({}), assuming neutral",
                            self.model.name(),
                            e
                        );
                        Ok(SentimentScore::fallback())
                    }
                };
            }
        };

        let probabilities = softmax(&logits);
        let mut best = 0;
        for i in 1..probabilities.len() {
            if probabilities[i] > probabilities[best] {
                best = i;
            }
        }

        let score = SentimentScore {
            label: SentimentLabel::ALL[best],
            confidence: probabilities[best].clamp(0.0, 1.0),
        };
        debug!(
            label = %score.label,
            confidence = score.confidence,
            "Scored sentiment"
        );
        Ok(score)
    }
}

/// Numerically stable softmax over the three class scores.
///
/// Non-finite input yields a uniform distribution.
pub fn softmax(logits: &[f32; 3]) -> [f32; 3] {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return [1.0 / 3.0; 3];
    }

    let exp = logits.map(|x| (x - max).exp());
    let sum: f32 = exp.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return [1.0 / 3.0; 3];
    }
    exp.map(|x| x / sum)
}
