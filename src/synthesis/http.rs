//! Client for an external text-to-audio service.

use super::{build_prompt, SynthesisError, Synthesizer};
use crate::music::MusicalParameters;
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Posts the prompt and parameter bundle as JSON and returns the response
/// body as the audio stream.
pub struct HttpSynthesizer {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpSynthesizer {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }
}

impl Synthesizer for HttpSynthesizer {
    fn name(&self) -> &str {
        "http"
    }

    fn synthesize(
        &self,
        parameters: &MusicalParameters,
        duration: Duration,
    ) -> Result<Vec<u8>, SynthesisError> {
        let prompt = build_prompt(parameters);
        let request = SynthesisRequest {
            prompt: &prompt,
            duration_seconds: duration.as_secs_f64(),
            parameters,
        };

        info!("Requesting audio from {}", self.url);
        debug!(%prompt, "Synthesis prompt");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .timeout(self.timeout)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SynthesisError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let audio = response.bytes()?;
        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }
        debug!(bytes = audio.len(), "Received audio");
        Ok(audio.to_vec())
    }
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    prompt: &'a str,
    duration_seconds: f64,
    parameters: &'a MusicalParameters,
}
