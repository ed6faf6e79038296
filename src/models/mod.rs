//! Model backend abstraction layer.
//!
//! This module provides trait-based abstractions for the two inference
//! backends mood analysis depends on (text embedding and three-class
//! sentiment), plus the concrete providers shipped with the crate.

mod factory;
mod hashing;
pub mod huggingface;
mod lexicon;
mod ollama;
mod provider;

pub use factory::{create_embedder, create_pipeline, create_sentiment_model};
pub use hashing::{HashingEmbedder, DEFAULT_DIMENSIONS};
pub use huggingface::HuggingFaceSentimentModel;
pub use lexicon::LexiconSentimentModel;
pub use ollama::OllamaEmbedder;
pub use provider::{ModelError, SentimentModel, TextEmbedder};

#[cfg(feature = "mock")]
pub use provider::{MockSentimentModel, MockTextEmbedder};
