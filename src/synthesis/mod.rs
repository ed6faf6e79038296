//! Audio synthesis collaborator.
//!
//! A [`Synthesizer`] receives a [`MusicalParameters`] bundle unchanged and
//! returns encoded audio bytes. Generating real music is delegated to an
//! external text-to-audio service; the crate itself only ships a silent
//! placeholder renderer.

mod http;
mod silent;

pub use http::HttpSynthesizer;
pub use silent::SilentSynthesizer;

use crate::config::{SynthesisBackend, SynthesisSettings};
use crate::music::MusicalParameters;
use anyhow::{bail, Result};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_SAMPLE_RATE: u32 = 16000;
/// Longest audio a single request may ask for.
pub const MAX_DURATION_SECS: u64 = 600;

/// Errors that can occur while producing audio.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Synthesis service unavailable: {0}")]
    Unavailable(String),

    #[error("Synthesis service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Synthesis service returned no audio")]
    EmptyAudio,

    #[error("Synthesis timed out")]
    Timeout,

    #[error("Requested {requested:?} of audio, the limit is {max:?}")]
    DurationTooLong { requested: Duration, max: Duration },

    #[error("Failed to encode audio: {0}")]
    Encoding(#[from] hound::Error),
}

impl From<reqwest::Error> for SynthesisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SynthesisError::Timeout
        } else {
            SynthesisError::Unavailable(err.to_string())
        }
    }
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait Synthesizer: Send + Sync {
    fn name(&self) -> &str;

    /// Render `duration` of audio for `parameters`.
    fn synthesize(
        &self,
        parameters: &MusicalParameters,
        duration: Duration,
    ) -> Result<Vec<u8>, SynthesisError>;
}

/// Natural-language description of `parameters` for text-to-audio models.
pub fn build_prompt(parameters: &MusicalParameters) -> String {
    format!(
        "A {} instrumental track in a {} key. The tempo is approximately {} BPM. \
         It features the following instruments: {}.",
        parameters.mood,
        parameters.key,
        parameters.tempo,
        parameters.instruments.join(", ")
    )
}

/// File name for a composition titled `title`.
pub fn output_file_name(title: &str) -> String {
    let stem = title.trim().to_lowercase().replace(' ', "_");
    if stem.is_empty() {
        "composition.wav".to_string()
    } else {
        format!("{}.wav", stem)
    }
}

/// Create a synthesizer based on the configured backend
pub fn create_synthesizer(settings: &SynthesisSettings) -> Result<Box<dyn Synthesizer>> {
    match settings.backend {
        SynthesisBackend::Silent => {
            info!(
                "Creating silent synthesizer ({} Hz)",
                settings.sample_rate
            );
            Ok(Box::new(SilentSynthesizer::new(settings.sample_rate)))
        }
        SynthesisBackend::Http => {
            let Some(url) = &settings.url else {
                bail!("synthesis.url must be specified for the http synthesis backend");
            };
            info!("Creating HTTP synthesizer at {}", url);
            Ok(Box::new(HttpSynthesizer::new(url.clone(), settings.timeout)))
        }
    }
}
