//! Hash-based deterministic embedding provider.
//!
//! Maps each lowercased alphanumeric token to a vector component via
//! FNV-1a, accumulates token counts, and unit-normalizes. Texts sharing
//! vocabulary get proportionally higher cosine similarity, which is
//! enough signal for tests and offline smoke runs. Not a semantic model.

use async_trait::async_trait;

use crate::error::{EmbeddingError, Result};
use crate::traits::{EmbeddingOutput, EmbeddingProvider};

/// Default dimensionality of stub vectors.
pub const DEFAULT_DIMENSIONS: usize = 256;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(token: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in token.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Deterministic bag-of-tokens embedding provider.
#[derive(Debug, Clone)]
pub struct HashEmbeddingProvider {
    dimensions: usize,
}

impl HashEmbeddingProvider {
    /// Create a provider with the default dimensionality.
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_DIMENSIONS)
    }

    /// Create a provider with a custom dimensionality (must be nonzero).
    pub fn with_dimensions(dimensions: usize) -> Self {
        assert!(dimensions > 0, "dimensions must be nonzero");
        Self { dimensions }
    }

    fn embed_sync(&self, content: &str) -> Result<Vec<f32>> {
        if content.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput.into());
        }

        let mut vector = vec![0.0_f32; self.dimensions];
        for token in content
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            let slot = (fnv1a(&token) % self.dimensions as u64) as usize;
            vector[slot] += 1.0;
        }

        let magnitude = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for v in &mut vector {
                *v /= magnitude;
            }
        }
        Ok(vector)
    }
}

impl Default for HashEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddingProvider {
    async fn embed(&self, content: &str) -> Result<EmbeddingOutput> {
        let vector = self.embed_sync(content)?;
        EmbeddingOutput::new(vector, self.model_id())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        "stub-hash-embedding-v1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identical_text_gives_identical_vectors() {
        let provider = HashEmbeddingProvider::new();
        let a = provider.embed("the grid will fail tonight").await.expect("embed");
        let b = provider.embed("the grid will fail tonight").await.expect("embed");
        assert_eq!(a.vector, b.vector);
    }

    #[tokio::test]
    async fn vectors_are_unit_normalized() {
        let provider = HashEmbeddingProvider::new();
        let out = provider.embed("act now before it is too late").await.expect("embed");
        assert!((out.magnitude() - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn shared_vocabulary_raises_similarity() {
        let provider = HashEmbeddingProvider::with_dimensions(128);
        let a = provider.embed("economic crisis and fear").await.expect("embed");
        let b = provider.embed("economic crisis and fear everywhere").await.expect("embed");
        let c = provider.embed("quiet morning by the lake").await.expect("embed");

        let dot = |x: &[f32], y: &[f32]| x.iter().zip(y).map(|(a, b)| a * b).sum::<f32>();
        assert!(dot(&a.vector, &b.vector) > dot(&a.vector, &c.vector));
    }

    #[tokio::test]
    async fn blank_input_is_an_error() {
        let provider = HashEmbeddingProvider::new();
        assert!(provider.embed("   ").await.is_err());
    }

    #[tokio::test]
    async fn tokenization_is_case_insensitive() {
        let provider = HashEmbeddingProvider::new();
        let a = provider.embed("Economic Crisis").await.expect("embed");
        let b = provider.embed("economic crisis").await.expect("embed");
        assert_eq!(a.vector, b.vector);
    }
}
