//! Offline feature-hashing embedder.
//!
//! Maps every word of the input into one of `dimensions` buckets using
//! SHA-256, with a hash-derived sign to reduce collision bias, and
//! L2-normalizes the result. It needs no model weights, which makes it the
//! default backend and the one used by tests; texts sharing vocabulary get
//! high cosine similarity, synonyms do not.

use super::provider::{ModelError, TextEmbedder};
use crate::text::words;
use sha2::{Digest, Sha256};

pub const DEFAULT_DIMENSIONS: usize = 256;

pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn bucket(&self, word: &str) -> (usize, f32) {
        let digest = Sha256::digest(word.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        let h = u64::from_le_bytes(bytes);
        let index = (h % self.dimensions as u64) as usize;
        let sign = if h >> 63 == 1 { -1.0 } else { 1.0 };
        (index, sign)
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl TextEmbedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let mut vector = vec![0.0f32; self.dimensions];
        for word in words(text) {
            let (index, sign) = self.bucket(&word);
            vector[index] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in vector.iter_mut() {
                *x /= norm;
            }
        }
        Ok(vector)
    }
}
