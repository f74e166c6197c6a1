//! Error types for narrative-risk-core.
//!
//! The engine never raises for data-quality problems in analysis inputs:
//! blank text, missing feature fields, and empty technique lists all
//! degrade to neutral results. Errors exist for the two genuinely fatal
//! conditions — a malformed catalog at load time and a failing embedding
//! provider — plus validation of mis-wired components.

use thiserror::Error;

use crate::types::Registry;

/// Embedding-related errors.
///
/// Covers the injected provider failing or producing unusable vectors.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Empty input text provided for embedding.
    #[error("empty input text")]
    EmptyInput,

    /// Provider produced an empty vector.
    #[error("empty embedding vector")]
    EmptyVector,

    /// Vector dimension does not match the provider's declared output size.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension received
        actual: usize,
    },

    /// Embedding generation failed inside the provider.
    #[error("embedding generation failed: {0}")]
    GenerationFailed(String),
}

/// Registry load/validation errors.
///
/// These fail fast at load time, before any analysis begins.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A catalog entry has a blank identifier.
    #[error("catalog entry with blank id (name: {name:?})")]
    BlankId {
        /// Display name of the offending entry
        name: String,
    },

    /// Two catalog entries share an identifier.
    #[error("duplicate technique id in registry {registry}: {id}")]
    DuplicateId {
        /// Registry being loaded
        registry: Registry,
        /// The repeated identifier
        id: String,
    },

    /// An entry carries no embedding vector.
    #[error("entry {id} has no embedding")]
    MissingEmbedding {
        /// Identifier of the entry
        id: String,
    },

    /// An entry's embedding cannot be unit-normalized.
    #[error("entry {id} has a zero-magnitude embedding")]
    ZeroMagnitude {
        /// Identifier of the entry
        id: String,
    },

    /// An entry's embedding dimension disagrees with the rest of the registry.
    #[error("entry {id}: dimension mismatch, expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Identifier of the entry
        id: String,
        /// Dimension established by the registry
        expected: usize,
        /// Dimension of the offending embedding
        actual: usize,
    },

    /// A catalog file could not be read or parsed.
    #[error("catalog file {path}: {reason}")]
    CatalogFile {
        /// Path that was being loaded
        path: String,
        /// I/O or parse failure description
        reason: String,
    },

    /// An entry was tagged for a different registry than the one being built.
    #[error("entry {id} is tagged {found}, expected {expected}")]
    RegistryMismatch {
        /// Identifier of the entry
        id: String,
        /// Registry the store is being built for
        expected: Registry,
        /// Registry the entry claims
        found: Registry,
    },
}

/// Top-level unified error for narrative-risk-core.
#[derive(Debug, Error)]
pub enum NarrativeRiskError {
    /// Embedding provider failure.
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Catalog load/validation failure.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Mis-wired components (e.g. store dimension vs provider dimension).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invariant violation indicating a bug.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NarrativeRiskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_messages_name_the_entry() {
        let err = RegistryError::ZeroMagnitude {
            id: "CAT-0001".into(),
        };
        assert!(err.to_string().contains("CAT-0001"));
    }

    #[test]
    fn errors_convert_into_unified_type() {
        let err: NarrativeRiskError = EmbeddingError::EmptyInput.into();
        assert!(matches!(err, NarrativeRiskError::Embedding(_)));

        let err: NarrativeRiskError = RegistryError::BlankId {
            name: "Scarcity".into(),
        }
        .into();
        assert!(matches!(err, NarrativeRiskError::Registry(_)));
    }

    #[test]
    fn dimension_mismatch_reports_both_sizes() {
        let err = EmbeddingError::DimensionMismatch {
            expected: 256,
            actual: 128,
        };
        let msg = err.to_string();
        assert!(msg.contains("256") && msg.contains("128"));
    }
}
