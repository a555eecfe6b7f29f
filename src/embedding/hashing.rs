use async_trait::async_trait;

use super::{EmbeddingError, EmbeddingProvider};
use crate::constants::HASHING_EMBEDDING_DIM;
use crate::hashing::hash_to_u64;

/// Deterministic feature-hashing embedder.
///
/// Lowercased alphanumeric tokens are hashed into `dim` buckets with a
/// hash-derived sign, then L2-normalised. Texts sharing tokens get positive
/// cosine similarity, which is enough for offline ranking and tests.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new() -> Self {
        Self::with_dim(HASHING_EMBEDDING_DIM)
    }

    pub fn with_dim(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Synchronous core of [`EmbeddingProvider::get_vector`].
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dim];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            let h = hash_to_u64(token.as_bytes());
            let bucket = (h % self.dim as u64) as usize;
            let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn get_vector(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.embed(text))
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
