//! Trait seams for injected dependencies.

mod embedding_provider;

pub use embedding_provider::{EmbeddingOutput, EmbeddingProvider};
