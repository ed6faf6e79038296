//! Fake model backends
//!
//! Each fake is deterministic and offline. `KeywordEmbedder` places a text
//! on one axis per mood category it names, so its classification is
//! predictable from the text alone.

use super::constants::SLOW_BACKEND_MILLIS;
use mood_composer::models::{ModelError, SentimentModel, TextEmbedder};
use mood_composer::mood::{
    DegradationPolicy, EnergyEstimator, MoodAnalysisPipeline, MoodCategory, MoodClassifier,
    SentimentScorer,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Embedders
// ============================================================================

pub struct KeywordEmbedder;

impl TextEmbedder for KeywordEmbedder {
    fn name(&self) -> &str {
        "keyword"
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        Ok(MoodCategory::ALL
            .iter()
            .map(|m| if words.contains(&m.as_str()) { 1.0 } else { 0.0 })
            .collect())
    }
}

/// Fails every call, as an unreachable server would.
pub struct UnreachableEmbedder;

impl TextEmbedder for UnreachableEmbedder {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn embed(&self, _text: &str) -> Result<Vec<f32>, ModelError> {
        Err(ModelError::Connection("connection refused".to_string()))
    }
}

/// Works for the reference descriptions, then starts failing.
///
/// Models a backend that goes away after the classifier was built.
pub struct FlakyEmbedder {
    calls: AtomicUsize,
    healthy_calls: usize,
}

impl FlakyEmbedder {
    pub fn failing_after(healthy_calls: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            healthy_calls,
        }
    }
}

impl TextEmbedder for FlakyEmbedder {
    fn name(&self) -> &str {
        "flaky"
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.healthy_calls {
            KeywordEmbedder.embed(text)
        } else {
            Err(ModelError::Timeout)
        }
    }
}

// ============================================================================
// Sentiment models
// ============================================================================

/// Returns the same raw class scores for every text.
pub struct FixedSentiment([f32; 3]);

impl FixedSentiment {
    pub fn positive() -> Self {
        Self([0.0, 0.0, 4.0])
    }

    pub fn negative() -> Self {
        Self([4.0, 0.0, 0.0])
    }

    pub fn neutral() -> Self {
        Self([0.0, 4.0, 0.0])
    }
}

impl SentimentModel for FixedSentiment {
    fn name(&self) -> &str {
        "fixed"
    }

    fn class_scores(&self, _text: &str) -> Result<[f32; 3], ModelError> {
        Ok(self.0)
    }
}

pub struct UnreachableSentiment;

impl SentimentModel for UnreachableSentiment {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn class_scores(&self, _text: &str) -> Result<[f32; 3], ModelError> {
        Err(ModelError::Api {
            status: 503,
            message: "model is loading".to_string(),
        })
    }
}

/// Sleeps on every call before answering neutral.
pub struct SlowSentiment;

impl SentimentModel for SlowSentiment {
    fn name(&self) -> &str {
        "slow"
    }

    fn class_scores(&self, _text: &str) -> Result<[f32; 3], ModelError> {
        std::thread::sleep(Duration::from_millis(SLOW_BACKEND_MILLIS));
        Ok([0.0, 1.0, 0.0])
    }
}

// ============================================================================
// Pipelines
// ============================================================================

pub fn pipeline_with(
    embedder: impl TextEmbedder + 'static,
    sentiment: impl SentimentModel + 'static,
) -> MoodAnalysisPipeline {
    try_pipeline_with(embedder, sentiment, DegradationPolicy::FailFast)
        .expect("fail-fast pipeline should build with a healthy embedder")
}

pub fn try_pipeline_with(
    embedder: impl TextEmbedder + 'static,
    sentiment: impl SentimentModel + 'static,
    policy: DegradationPolicy,
) -> Result<MoodAnalysisPipeline, mood_composer::AnalysisError> {
    let classifier = MoodClassifier::new(Arc::new(embedder), policy)?;
    let scorer = SentimentScorer::new(Arc::new(sentiment), policy);
    Ok(MoodAnalysisPipeline::new(
        scorer,
        classifier,
        EnergyEstimator::default(),
    ))
}
