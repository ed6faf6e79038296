//! Model provider trait definitions.

use thiserror::Error;

/// Errors that can occur when interacting with a model backend.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl From<reqwest::Error> for ModelError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ModelError::Timeout
        } else if e.is_decode() {
            ModelError::InvalidResponse(e.to_string())
        } else {
            ModelError::Connection(e.to_string())
        }
    }
}

/// Turns text into a fixed-length vector.
///
/// Implementations must be safe to call concurrently from several threads.
/// Every call on one instance returns vectors of the same length.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TextEmbedder: Send + Sync {
    /// Backend name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Embed a single piece of text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError>;
}

/// Raw three-class sentiment model.
///
/// Returns unnormalized class scores (logits) ordered as
/// `[negative, neutral, positive]`. Normalization happens in
/// [`crate::mood::SentimentScorer`].
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SentimentModel: Send + Sync {
    fn name(&self) -> &str;

    fn class_scores(&self, text: &str) -> Result<[f32; 3], ModelError>;
}
