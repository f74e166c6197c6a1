//! Deterministic stub implementations for tests and offline use.

mod hash_embedding;

pub use hash_embedding::HashEmbeddingProvider;
