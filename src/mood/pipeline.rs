//! Orchestrates sentiment, mood and energy into one analysis.

use super::classifier::{MoodClassifier, MoodMatch};
use super::energy::{EnergyBreakdown, EnergyEstimator};
use super::error::{ensure_text, AnalysisError};
use super::sentiment::{SentimentScore, SentimentScorer};
use super::types::AnalysisResult;
use crate::music::{map_parameters, MusicalParameters};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct MoodAnalysisPipeline {
    sentiment: SentimentScorer,
    classifier: MoodClassifier,
    energy: EnergyEstimator,
}

/// Full diagnostic view of one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisExplanation {
    pub result: AnalysisResult,
    pub sentiment: SentimentScore,
    pub mood_ranking: Vec<MoodMatch>,
    pub energy: EnergyBreakdown,
}

impl MoodAnalysisPipeline {
    pub fn new(
        sentiment: SentimentScorer,
        classifier: MoodClassifier,
        energy: EnergyEstimator,
    ) -> Self {
        Self {
            sentiment,
            classifier,
            energy,
        }
    }

    pub fn classifier(&self) -> &MoodClassifier {
        &self.classifier
    }

    /// Analyze `text` into mood, sentiment and energy.
    ///
    /// Sentiment runs first because the energy estimate depends on the
    /// resolved sentiment label.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        ensure_text(text)?;

        let sentiment = self.sentiment.score(text)?;
        let mood = self.classifier.classify(text)?;
        let energy_level = self.energy.estimate(text, sentiment.label);

        let result = AnalysisResult {
            mood: mood.category,
            mood_similarity: mood.similarity,
            sentiment: sentiment.label,
            sentiment_confidence: sentiment.confidence,
            energy_level,
        };
        debug!(?result, "Analysis complete");
        Ok(result)
    }

    /// Like [`analyze`](Self::analyze), but keeps every intermediate score.
    pub fn explain(&self, text: &str) -> Result<AnalysisExplanation, AnalysisError> {
        ensure_text(text)?;

        let sentiment = self.sentiment.score(text)?;
        let mood_ranking = self.classifier.rank(text)?;
        let energy = self.energy.breakdown(text, sentiment.label);

        let best = mood_ranking
            .first()
            .copied()
            .unwrap_or_else(MoodMatch::fallback);

        Ok(AnalysisExplanation {
            result: AnalysisResult {
                mood: best.category,
                mood_similarity: best.similarity,
                sentiment: sentiment.label,
                sentiment_confidence: sentiment.confidence,
                energy_level: energy.energy,
            },
            sentiment,
            mood_ranking,
            energy,
        })
    }

    /// Analyze `text` and map the result straight to musical parameters.
    pub fn compose(
        &self,
        text: &str,
    ) -> Result<(AnalysisResult, MusicalParameters), AnalysisError> {
        let analysis = self.analyze(text)?;
        let parameters = map_parameters(analysis.mood, analysis.sentiment, analysis.energy_level);
        info!(
            mood = %parameters.mood,
            tempo = parameters.tempo,
            key = %parameters.key,
            energy = parameters.energy,
            "Mapped analysis to musical parameters"
        );
        Ok((analysis, parameters))
    }

    /// Run [`analyze`](Self::analyze) on a blocking worker under a deadline.
    ///
    /// An elapsed deadline yields [`AnalysisError::TimedOut`]. The worker may
    /// keep running until its current model call returns, but its result is
    /// discarded; nothing shared is mutated by an analysis.
    pub async fn analyze_with_timeout(
        self: Arc<Self>,
        text: String,
        deadline: Duration,
    ) -> Result<AnalysisResult, AnalysisError> {
        run_with_deadline(deadline, move || self.analyze(&text)).await
    }

    /// [`explain`](Self::explain) under the same deadline rules as
    /// [`analyze_with_timeout`](Self::analyze_with_timeout).
    pub async fn explain_with_timeout(
        self: Arc<Self>,
        text: String,
        deadline: Duration,
    ) -> Result<AnalysisExplanation, AnalysisError> {
        run_with_deadline(deadline, move || self.explain(&text)).await
    }
}

async fn run_with_deadline<T, F>(deadline: Duration, work: F) -> Result<T, AnalysisError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AnalysisError> + Send + 'static,
{
    let task = tokio::task::spawn_blocking(work);

    match tokio::time::timeout(deadline, task).await {
        Ok(Ok(result)) => result,
        // A panicking backend is a bug, not an outage
        Ok(Err(join_error)) if join_error.is_panic() => {
            std::panic::resume_unwind(join_error.into_panic())
        }
        Ok(Err(join_error)) => Err(AnalysisError::ModelUnavailable {
            backend: "pipeline".to_string(),
            reason: format!("analysis worker failed: {}", join_error),
        }),
        Err(_) => Err(AnalysisError::TimedOut(deadline)),
    }
}
