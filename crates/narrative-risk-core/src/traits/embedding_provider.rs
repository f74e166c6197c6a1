//! Embedding provider trait for text-to-vector conversion.
//!
//! The engine never produces vectors itself: any fixed-dimension
//! text-to-vector function can be injected at construction time, which
//! keeps the registry store and identifier free of hidden global model
//! state. Implementations must be thread-safe (`Send + Sync`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{EmbeddingError, Result};

/// Result of embedding generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingOutput {
    /// The embedding vector.
    pub vector: Vec<f32>,
    /// Identifier of the model that produced it.
    pub model_id: String,
    /// Vector dimensionality (`vector.len()`).
    pub dimensions: usize,
}

impl EmbeddingOutput {
    /// Create a new output, rejecting empty vectors.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::EmptyVector`] if `vector` is empty.
    pub fn new(vector: Vec<f32>, model_id: impl Into<String>) -> Result<Self> {
        if vector.is_empty() {
            return Err(EmbeddingError::EmptyVector.into());
        }
        let dimensions = vector.len();
        Ok(Self {
            vector,
            model_id: model_id.into(),
            dimensions,
        })
    }

    /// L2 norm of the vector. A unit-normalized output has magnitude 1.
    pub fn magnitude(&self) -> f32 {
        self.vector.iter().map(|v| v * v).sum::<f32>().sqrt()
    }
}

/// Async interface for converting text to dense vector representations.
///
/// Identical inputs must produce identical vectors — determinism of the
/// whole analysis hinges on the provider. Retry and timeout policy live
/// inside implementations, not in this engine.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate the embedding for a single text.
    ///
    /// # Errors
    ///
    /// [`EmbeddingError::EmptyInput`] for blank content, or
    /// [`EmbeddingError::GenerationFailed`] when the backing model fails.
    async fn embed(&self, content: &str) -> Result<EmbeddingOutput>;

    /// Generate embeddings for a batch of texts, in input order.
    ///
    /// The default implementation embeds sequentially; backends with a
    /// real batch path should override it.
    async fn embed_batch(&self, contents: &[String]) -> Result<Vec<EmbeddingOutput>> {
        let mut outputs = Vec::with_capacity(contents.len());
        for content in contents {
            outputs.push(self.embed(content).await?);
        }
        Ok(outputs)
    }

    /// Fixed output dimensionality of this provider.
    fn dimensions(&self) -> usize;

    /// Model identifier string, used in diagnostics.
    fn model_id(&self) -> &str;
}
