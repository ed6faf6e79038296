//! Text-to-signal analysis: mood similarity ranking, sentiment labeling and
//! energy scoring, orchestrated by [`MoodAnalysisPipeline`].

mod classifier;
mod energy;
mod error;
mod pipeline;
mod sentiment;
mod types;

pub use classifier::{cosine_similarity, MoodClassifier, MoodMatch, FALLBACK_MOOD};
pub use energy::{EnergyBreakdown, EnergyEstimator, MAX_ENERGY, MIN_ENERGY};
pub use error::{AnalysisError, DegradationPolicy};
pub use pipeline::{AnalysisExplanation, MoodAnalysisPipeline};
pub use sentiment::{
    softmax, SentimentScore, SentimentScorer, DEFAULT_MAX_INPUT_CHARS, FALLBACK_CONFIDENCE,
};
pub use types::{AnalysisResult, MoodCategory, MoodTag, SentimentLabel, SentimentTag};
