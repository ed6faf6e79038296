//! Hosted text-classification sentiment provider.
//!
//! Talks to a Hugging Face style inference endpoint serving a three-class
//! sentiment model. The endpoint answers with per-label probabilities;
//! they are returned as natural-log scores so that the scorer's softmax
//! reproduces the endpoint's distribution exactly.

use super::provider::{ModelError, SentimentModel};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_SENTIMENT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

/// Floor applied to probabilities before taking the log.
const MIN_PROBABILITY: f32 = 1e-9;

pub struct HuggingFaceSentimentModel {
    client: Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl HuggingFaceSentimentModel {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_token,
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl SentimentModel for HuggingFaceSentimentModel {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn class_scores(&self, text: &str) -> Result<[f32; 3], ModelError> {
        let url = format!("{}/{}", self.base_url, self.model);

        debug!(model = %self.model, "Sending sentiment request");

        let mut request = self
            .client
            .post(&url)
            .json(&ClassificationRequest { inputs: text })
            .timeout(self.timeout);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: ClassificationResponse = response.json().map_err(|e| {
            ModelError::InvalidResponse(format!("Failed to parse classification response: {}", e))
        })?;

        log_scores(body.into_labels())
    }
}

/// Convert per-label probabilities into `[negative, neutral, positive]` log-scores.
fn log_scores(labels: Vec<LabelScore>) -> Result<[f32; 3], ModelError> {
    let mut probabilities: [Option<f32>; 3] = [None; 3];
    for entry in labels {
        if let Some(index) = label_index(&entry.label) {
            probabilities[index] = Some(entry.score);
        }
    }

    let mut scores = [0.0f32; 3];
    for (i, p) in probabilities.iter().enumerate() {
        let p = p.ok_or_else(|| {
            ModelError::InvalidResponse(format!("Missing score for class index {}", i))
        })?;
        scores[i] = p.max(MIN_PROBABILITY).ln();
    }
    Ok(scores)
}

fn label_index(label: &str) -> Option<usize> {
    match label.to_lowercase().as_str() {
        "negative" | "label_0" | "neg" => Some(0),
        "neutral" | "label_1" | "neu" => Some(1),
        "positive" | "label_2" | "pos" => Some(2),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
struct ClassificationRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// The endpoint wraps results in an extra list for batched inputs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn into_labels(self) -> Vec<LabelScore> {
        match self {
            ClassificationResponse::Batched(batches) => {
                batches.into_iter().next().unwrap_or_default()
            }
            ClassificationResponse::Flat(labels) => labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batched_response_parsing() {
        let json = r#"[[{"label":"positive","score":0.7},{"label":"neutral","score":0.2},{"label":"negative","score":0.1}]]"#;
        let response: ClassificationResponse = serde_json::from_str(json).unwrap();
        let scores = log_scores(response.into_labels()).unwrap();
        assert!((scores[0] - 0.1f32.ln()).abs() < 1e-6);
        assert!((scores[1] - 0.2f32.ln()).abs() < 1e-6);
        assert!((scores[2] - 0.7f32.ln()).abs() < 1e-6);
    }

    #[test]
    fn test_flat_response_with_generic_labels() {
        let json = r#"[{"label":"LABEL_0","score":0.6},{"label":"LABEL_1","score":0.3},{"label":"LABEL_2","score":0.1}]"#;
        let response: ClassificationResponse = serde_json::from_str(json).unwrap();
        let scores = log_scores(response.into_labels()).unwrap();
        assert!(scores[0] > scores[1] && scores[1] > scores[2]);
    }

    #[test]
    fn test_missing_class_is_invalid_response() {
        let labels = vec![LabelScore {
            label: "positive".to_string(),
            score: 1.0,
        }];
        assert!(matches!(
            log_scores(labels),
            Err(ModelError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_zero_probability_is_floored() {
        let labels = vec![
            LabelScore {
                label: "negative".to_string(),
                score: 0.0,
            },
            LabelScore {
                label: "neutral".to_string(),
                score: 0.0,
            },
            LabelScore {
                label: "positive".to_string(),
                score: 1.0,
            },
        ];
        let scores = log_scores(labels).unwrap();
        assert!(scores[0].is_finite());
        assert_eq!(scores[2], 0.0);
    }
}
