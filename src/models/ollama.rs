//! Ollama embedding provider implementation.

use super::provider::{ModelError, TextEmbedder};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Ollama embedding provider.
///
/// Connects to an Ollama server and uses its `/api/embed` endpoint.
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Ollama server (e.g., "http://localhost:11434").
    /// * `model` - Embedding model to use (e.g., "all-minilm").
    /// * `timeout` - Per-request timeout.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TextEmbedder for OllamaEmbedder {
    fn name(&self) -> &str {
        "ollama"
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let url = format!("{}/api/embed", self.base_url);

        let request = OllamaEmbedRequest {
            model: &self.model,
            input: text,
        };

        debug!(
            model = %self.model,
            chars = text.chars().count(),
            "Sending embedding request to Ollama"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .timeout(self.timeout)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let ollama_response: OllamaEmbedResponse = response.json().map_err(|e| {
            ModelError::InvalidResponse(format!("Failed to parse Ollama response: {}", e))
        })?;

        ollama_response
            .embeddings
            .into_iter()
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ModelError::InvalidResponse("Ollama returned no embedding".to_string()))
    }
}

// Ollama API types

#[derive(Debug, Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = OllamaEmbedRequest {
            model: "all-minilm",
            input: "rainy sunday",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "all-minilm");
        assert_eq!(json["input"], "rainy sunday");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"model":"all-minilm","embeddings":[[0.1,-0.2,0.3]]}"#;
        let response: OllamaEmbedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.embeddings, vec![vec![0.1, -0.2, 0.3]]);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let embedder = OllamaEmbedder::new(
            "http://localhost:11434/",
            "all-minilm",
            Duration::from_secs(5),
        );
        assert_eq!(embedder.base_url, "http://localhost:11434");
        assert_eq!(embedder.model(), "all-minilm");
    }

    #[test]
    fn test_unreachable_server_is_connection_error() {
        // Port 9 (discard) is essentially never serving HTTP
        let embedder =
            OllamaEmbedder::new("http://127.0.0.1:9", "all-minilm", Duration::from_secs(2));
        let err = embedder.embed("hello").unwrap_err();
        assert!(matches!(err, ModelError::Connection(_) | ModelError::Timeout));
    }
}
