//! Embedding-based mood classification.
//!
//! Every [`MoodCategory`] reference description is embedded once when the
//! classifier is built. A query is embedded and compared against each
//! reference vector by cosine similarity; the best match wins, with exact
//! ties going to the category declared first.

use super::error::{AnalysisError, DegradationPolicy};
use super::types::MoodCategory;
use crate::models::{ModelError, TextEmbedder};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Category returned when the embedding backend is unavailable and the
/// classifier was built with [`DegradationPolicy::Default`].
pub const FALLBACK_MOOD: MoodCategory = MoodCategory::Calm;

/// One category together with its similarity to a query text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodMatch {
    pub category: MoodCategory,
    pub similarity: f32,
}

impl MoodMatch {
    pub(crate) fn fallback() -> Self {
        Self {
            category: FALLBACK_MOOD,
            similarity: 0.0,
        }
    }
}

pub struct MoodClassifier {
    embedder: Arc<dyn TextEmbedder>,
    /// Reference vectors in declaration order. `None` when the backend
    /// failed at construction under the degrading policy.
    references: Option<Vec<(MoodCategory, Vec<f32>)>>,
    policy: DegradationPolicy,
}

impl MoodClassifier {
    /// Build a classifier, embedding every category's reference description.
    pub fn new(
        embedder: Arc<dyn TextEmbedder>,
        policy: DegradationPolicy,
    ) -> Result<Self, AnalysisError> {
        info!(
            "Pre-computing mood embeddings with {} backend...",
            embedder.name()
        );

        let references = match precompute_references(embedder.as_ref()) {
            Ok(references) => Some(references),
            Err(e) => match policy {
                DegradationPolicy::FailFast => {
                    return Err(AnalysisError::model_unavailable(embedder.name(), e));
                }
                DegradationPolicy::Default => {
                    warn!(
                        "Embedding backend {} unavailable ({}), every text will classify as {}",
                        embedder.name(),
                        e,
                        FALLBACK_MOOD
                    );
                    None
                }
            },
        };

        Ok(Self {
            embedder,
            references,
            policy,
        })
    }

    pub fn policy(&self) -> DegradationPolicy {
        self.policy
    }

    /// Whether reference embeddings are available.
    pub fn is_ready(&self) -> bool {
        self.references.is_some()
    }

    /// Return the closest mood category for `text`.
    pub fn classify(&self, text: &str) -> Result<MoodMatch, AnalysisError> {
        let ranking = self.rank(text)?;
        let best = ranking
            .into_iter()
            .next()
            .unwrap_or_else(MoodMatch::fallback);

        debug!(
            mood = %best.category,
            similarity = best.similarity,
            "Closest mood"
        );
        Ok(best)
    }

    /// Every category ordered by descending similarity to `text`.
    ///
    /// Ties keep declaration order. A degraded classifier returns only the
    /// fallback category.
    pub fn rank(&self, text: &str) -> Result<Vec<MoodMatch>, AnalysisError> {
        super::error::ensure_text(text)?;

        let Some(references) = &self.references else {
            return Ok(vec![MoodMatch::fallback()]);
        };

        let query = match self.embed_query(text, references) {
            Ok(query) => query,
            Err(e) => {
                return match self.policy {
                    DegradationPolicy::FailFast => {
                        Err(AnalysisError::model_unavailable(self.embedder.name(), e))
                    }
                    DegradationPolicy::Default => {
                        warn!("Mood embedding failed ({}), using {}", e, FALLBACK_MOOD);
                        Ok(vec![MoodMatch::fallback()])
                    }
                };
            }
        };

        let mut ranking: Vec<MoodMatch> = references
            .iter()
            .map(|(category, reference)| MoodMatch {
                category: *category,
                similarity: cosine_similarity(&query, reference),
            })
            .collect();

        debug!(similarities = ?ranking, "Calculated mood similarities");

        // Stable sort, so equal similarities keep declaration order
        ranking.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        Ok(ranking)
    }

    fn embed_query(
        &self,
        text: &str,
        references: &[(MoodCategory, Vec<f32>)],
    ) -> Result<Vec<f32>, ModelError> {
        let query = self.embedder.embed(text)?;
        ensure_finite(&query, "query")?;
        let expected = references.first().map(|(_, v)| v.len()).unwrap_or(0);
        if query.len() != expected {
            return Err(ModelError::DimensionMismatch {
                expected,
                actual: query.len(),
            });
        }
        Ok(query)
    }
}

fn precompute_references(
    embedder: &dyn TextEmbedder,
) -> Result<Vec<(MoodCategory, Vec<f32>)>, ModelError> {
    let mut references: Vec<(MoodCategory, Vec<f32>)> =
        Vec::with_capacity(MoodCategory::ALL.len());
    for category in MoodCategory::ALL {
        let vector = embedder.embed(category.reference_description())?;
        if vector.is_empty() {
            return Err(ModelError::InvalidResponse(format!(
                "Empty embedding for mood {}",
                category
            )));
        }
        ensure_finite(&vector, category.as_str())?;
        if let Some((_, first)) = references.first() {
            if first.len() != vector.len() {
                return Err(ModelError::DimensionMismatch {
                    expected: first.len(),
                    actual: vector.len(),
                });
            }
        }
        references.push((category, vector));
    }
    Ok(references)
}

fn ensure_finite(vector: &[f32], what: &str) -> Result<(), ModelError> {
    match vector.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(ModelError::InvalidResponse(format!(
            "Non-finite value at index {} of {} embedding",
            index, what
        ))),
        None => Ok(()),
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 for empty, mismatched, zero-norm or non-finite inputs;
/// otherwise the result is clamped to [-1, 1] to absorb rounding error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a * norm_b);
    if !similarity.is_finite() {
        return 0.0;
    }
    similarity.clamp(-1.0, 1.0)
}
