//! Factory functions for creating model backends from configuration

use super::{
    HashingEmbedder, HuggingFaceSentimentModel, LexiconSentimentModel, OllamaEmbedder,
    SentimentModel, TextEmbedder,
};
use crate::config::{AppConfig, EmbeddingBackend, EmbeddingSettings, SentimentBackend, SentimentSettings};
use crate::mood::{
    AnalysisError, EnergyEstimator, MoodAnalysisPipeline, MoodClassifier, SentimentScorer,
};
use std::sync::Arc;
use tracing::info;

/// Create a text embedder based on the configured backend
pub fn create_embedder(settings: &EmbeddingSettings) -> Arc<dyn TextEmbedder> {
    match settings.backend {
        EmbeddingBackend::Hashing => {
            info!(
                "Creating hashing embedder ({} dimensions)",
                settings.dimensions
            );
            Arc::new(HashingEmbedder::new(settings.dimensions))
        }
        EmbeddingBackend::Ollama => {
            info!(
                "Creating Ollama embedder at {} (model {})",
                settings.url, settings.model
            );
            Arc::new(OllamaEmbedder::new(
                settings.url.clone(),
                settings.model.clone(),
                settings.timeout,
            ))
        }
    }
}

/// Create a raw sentiment model based on the configured backend
pub fn create_sentiment_model(settings: &SentimentSettings) -> Arc<dyn SentimentModel> {
    match settings.backend {
        SentimentBackend::Lexicon => {
            info!("Creating lexicon sentiment model");
            Arc::new(LexiconSentimentModel::new())
        }
        SentimentBackend::HuggingFace => {
            info!(
                "Creating hosted sentiment model {} at {}",
                settings.model, settings.url
            );
            Arc::new(HuggingFaceSentimentModel::new(
                settings.url.clone(),
                settings.model.clone(),
                settings.api_token.clone(),
                settings.timeout,
            ))
        }
    }
}

/// Build the full analysis pipeline described by `config`.
///
/// Mood reference embeddings are computed here, once. With the fail-fast
/// policy an unreachable embedding backend is reported immediately.
pub fn create_pipeline(config: &AppConfig) -> Result<MoodAnalysisPipeline, AnalysisError> {
    let policy = config.analysis.degradation;

    let embedder = create_embedder(&config.embedding);
    let classifier = MoodClassifier::new(embedder, policy)?;

    let model = create_sentiment_model(&config.sentiment);
    let scorer = SentimentScorer::new(model, policy).with_max_input_chars(config.sentiment.max_input_chars);

    info!("Analysis pipeline ready (policy: {:?})", policy);
    Ok(MoodAnalysisPipeline::new(
        scorer,
        classifier,
        EnergyEstimator::default(),
    ))
}
