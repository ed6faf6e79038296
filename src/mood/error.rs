//! Analysis errors and the backend failure policy.

use crate::models::ModelError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by mood analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Model unavailable ({backend}): {reason}")]
    ModelUnavailable { backend: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis timed out after {0:?}")]
    TimedOut(Duration),
}

impl AnalysisError {
    pub fn model_unavailable(backend: impl Into<String>, err: ModelError) -> Self {
        AnalysisError::ModelUnavailable {
            backend: backend.into(),
            reason: err.to_string(),
        }
    }
}

/// What a classifier does when its model backend fails.
///
/// Chosen once per instance (normally once per deployment through the
/// configuration file); a single instance never mixes the two behaviors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationPolicy {
    /// Report [`AnalysisError::ModelUnavailable`] to the caller.
    #[default]
    FailFast,
    /// Answer with a fixed default value: `calm` with similarity 0.0 for
    /// moods, `neutral` with confidence 0.5 for sentiment.
    Default,
}

impl DegradationPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fail_fast" | "fail-fast" | "failfast" => Some(DegradationPolicy::FailFast),
            "default" | "degrade" => Some(DegradationPolicy::Default),
            _ => None,
        }
    }
}

/// Rejects empty and whitespace-only text.
pub(crate) fn ensure_text(text: &str) -> Result<(), AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::InvalidInput(
            "text must not be empty or whitespace-only".to_string(),
        ));
    }
    Ok(())
}
