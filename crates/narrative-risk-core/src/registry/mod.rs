//! Immutable technique registries and the exhaustive similarity scan.
//!
//! A [`RegistryStore`] is built once (per registry) at startup, validated
//! fail-fast, and read-only afterwards — safe for unlimited concurrent
//! readers behind an `Arc`. Catalog content is external, versioned data;
//! nothing in this module knows what the techniques are.

use std::collections::HashMap;
use std::path::Path;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{RegistryError, Result};
use crate::traits::EmbeddingProvider;
use crate::types::{Registry, TechniqueCategory, TechniqueDef};

/// A catalog entry with its precomputed, unit-normalized embedding.
///
/// Owned exclusively by the store; the embedding is not exposed.
#[derive(Debug, Clone)]
pub struct TechniqueEntry {
    def: TechniqueDef,
    registry: Registry,
    embedding: Vec<f32>,
}

impl TechniqueEntry {
    /// Validate and unit-normalize a catalog entry.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::BlankId`] for a whitespace-only id
    /// - [`RegistryError::MissingEmbedding`] for an empty vector
    /// - [`RegistryError::ZeroMagnitude`] when the vector cannot be normalized
    pub fn new(def: TechniqueDef, registry: Registry, mut embedding: Vec<f32>) -> Result<Self> {
        if def.id.trim().is_empty() {
            return Err(RegistryError::BlankId {
                name: def.name.clone(),
            }
            .into());
        }
        if embedding.is_empty() {
            return Err(RegistryError::MissingEmbedding { id: def.id }.into());
        }
        let magnitude = embedding.iter().map(|v| v * v).sum::<f32>().sqrt();
        if !(magnitude > 0.0) || !magnitude.is_finite() {
            return Err(RegistryError::ZeroMagnitude { id: def.id }.into());
        }
        for v in &mut embedding {
            *v /= magnitude;
        }
        Ok(Self {
            def,
            registry,
            embedding,
        })
    }

    /// Stable catalog identifier.
    pub fn id(&self) -> &str {
        &self.def.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Description text the embedding was computed from.
    pub fn description(&self) -> &str {
        &self.def.description
    }

    /// Category/layer tag.
    pub fn category(&self) -> TechniqueCategory {
        self.def.category
    }

    /// Which registry this entry belongs to.
    pub fn registry(&self) -> Registry {
        self.registry
    }

    fn dot(&self, query: &[f32]) -> f32 {
        self.embedding
            .iter()
            .zip(query)
            .map(|(a, b)| a * b)
            .sum::<f32>()
    }
}

/// Read-only handle over one loaded technique registry.
#[derive(Debug)]
pub struct RegistryStore {
    registry: Registry,
    entries: Vec<TechniqueEntry>,
    by_id: HashMap<String, usize>,
    dimensions: usize,
}

impl RegistryStore {
    /// Build a store from already-embedded entries.
    ///
    /// Fails fast on duplicate ids, registry tag mismatches, or
    /// inconsistent embedding dimensions. An empty entry list is valid
    /// and yields a store whose scans return nothing.
    pub fn from_entries(registry: Registry, entries: Vec<TechniqueEntry>) -> Result<Self> {
        let dimensions = entries.first().map_or(0, |e| e.embedding.len());
        let mut by_id = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            if entry.registry != registry {
                return Err(RegistryError::RegistryMismatch {
                    id: entry.def.id.clone(),
                    expected: registry,
                    found: entry.registry,
                }
                .into());
            }
            if entry.embedding.len() != dimensions {
                return Err(RegistryError::DimensionMismatch {
                    id: entry.def.id.clone(),
                    expected: dimensions,
                    actual: entry.embedding.len(),
                }
                .into());
            }
            if by_id.insert(entry.def.id.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateId {
                    registry,
                    id: entry.def.id.clone(),
                }
                .into());
            }
        }

        info!(
            registry = %registry,
            entries = entries.len(),
            dimensions,
            "registry loaded"
        );
        Ok(Self {
            registry,
            entries,
            by_id,
            dimensions,
        })
    }

    /// Embed catalog definitions through the injected provider and build
    /// the store.
    pub async fn load(
        registry: Registry,
        defs: Vec<TechniqueDef>,
        provider: &dyn EmbeddingProvider,
    ) -> Result<Self> {
        let descriptions: Vec<String> = defs.iter().map(|d| d.description.clone()).collect();
        let outputs = provider.embed_batch(&descriptions).await?;

        let entries = defs
            .into_iter()
            .zip(outputs)
            .map(|(def, out)| TechniqueEntry::new(def, registry, out.vector))
            .collect::<Result<Vec<_>>>()?;
        Self::from_entries(registry, entries)
    }

    /// Load a JSON catalog file (an array of technique definitions) and
    /// embed it through the provider.
    pub async fn load_catalog_file(
        registry: Registry,
        path: impl AsRef<Path>,
        provider: &dyn EmbeddingProvider,
    ) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| RegistryError::CatalogFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let defs: Vec<TechniqueDef> =
            serde_json::from_str(&raw).map_err(|e| RegistryError::CatalogFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::load(registry, defs, provider).await
    }

    /// Cosine similarity of the query against every entry, descending.
    ///
    /// Ties break by id ascending so repeated calls are byte-identical.
    /// An empty registry yields an empty sequence. A query of the wrong
    /// dimension yields an empty sequence with a warning — that is a
    /// wiring bug, not a data-quality condition to score through.
    pub fn similarity(&self, query: &[f32]) -> Vec<(String, f32)> {
        if self.entries.is_empty() {
            return Vec::new();
        }
        if query.len() != self.dimensions {
            debug_assert!(
                false,
                "query dimension {} does not match registry dimension {}",
                query.len(),
                self.dimensions
            );
            warn!(
                registry = %self.registry,
                query_len = query.len(),
                expected = self.dimensions,
                "query dimension mismatch; returning no candidates"
            );
            return Vec::new();
        }

        let mut ranked: Vec<(String, f32)> = self
            .entries
            .par_iter()
            .map(|entry| (entry.def.id.clone(), entry.dot(query)))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&TechniqueEntry> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// Which registry this store holds.
    pub fn registry(&self) -> Registry {
        self.registry
    }

    /// Number of loaded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding dimensionality (0 for an empty registry).
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NarrativeRiskError;

    fn def(id: &str, name: &str, description: &str) -> TechniqueDef {
        TechniqueDef {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category: TechniqueCategory::Exploit,
        }
    }

    fn entry(id: &str, embedding: Vec<f32>) -> TechniqueEntry {
        TechniqueEntry::new(def(id, id, "test entry"), Registry::CatalogA, embedding)
            .expect("valid entry")
    }

    #[test]
    fn entries_are_unit_normalized_on_construction() {
        let e = entry("CAT-1", vec![3.0, 4.0]);
        let magnitude: f32 = e.embedding.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 1e-6);
    }

    #[test]
    fn blank_id_fails_fast() {
        let err =
            TechniqueEntry::new(def("  ", "Nameless", "x"), Registry::CatalogA, vec![1.0])
                .unwrap_err();
        assert!(matches!(
            err,
            NarrativeRiskError::Registry(RegistryError::BlankId { .. })
        ));
    }

    #[test]
    fn missing_embedding_fails_fast() {
        let err = TechniqueEntry::new(def("CAT-1", "X", "x"), Registry::CatalogA, vec![])
            .unwrap_err();
        assert!(matches!(
            err,
            NarrativeRiskError::Registry(RegistryError::MissingEmbedding { .. })
        ));
    }

    #[test]
    fn zero_magnitude_embedding_fails_fast() {
        let err =
            TechniqueEntry::new(def("CAT-1", "X", "x"), Registry::CatalogA, vec![0.0, 0.0])
                .unwrap_err();
        assert!(matches!(
            err,
            NarrativeRiskError::Registry(RegistryError::ZeroMagnitude { .. })
        ));
    }

    #[test]
    fn duplicate_ids_fail_fast() {
        let entries = vec![entry("CAT-1", vec![1.0, 0.0]), entry("CAT-1", vec![0.0, 1.0])];
        let err = RegistryStore::from_entries(Registry::CatalogA, entries).unwrap_err();
        assert!(matches!(
            err,
            NarrativeRiskError::Registry(RegistryError::DuplicateId { .. })
        ));
    }

    #[test]
    fn dimension_mismatch_across_entries_fails_fast() {
        let entries = vec![entry("CAT-1", vec![1.0, 0.0]), entry("CAT-2", vec![1.0, 0.0, 0.0])];
        let err = RegistryStore::from_entries(Registry::CatalogA, entries).unwrap_err();
        assert!(matches!(
            err,
            NarrativeRiskError::Registry(RegistryError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn empty_registry_scans_to_empty_not_error() {
        let store = RegistryStore::from_entries(Registry::CatalogA, vec![]).expect("valid");
        assert!(store.is_empty());
        assert!(store.similarity(&[1.0, 0.0]).is_empty());
    }

    #[test]
    fn similarity_ranks_descending_with_id_tiebreak() {
        let entries = vec![
            entry("CAT-3", vec![0.0, 1.0]),
            entry("CAT-1", vec![1.0, 0.0]),
            // Same direction as CAT-1: identical score, id breaks the tie.
            entry("CAT-2", vec![2.0, 0.0]),
        ];
        let store = RegistryStore::from_entries(Registry::CatalogA, entries).expect("valid");

        let ranked = store.similarity(&[1.0, 0.0]);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].0, "CAT-1");
        assert_eq!(ranked[1].0, "CAT-2");
        assert!((ranked[0].1 - ranked[1].1).abs() < 1e-6);
        assert_eq!(ranked[2].0, "CAT-3");
        assert!(ranked[2].1 < ranked[1].1);
    }

    #[test]
    fn registry_tag_mismatch_fails_fast() {
        let foreign = TechniqueEntry::new(def("DSR-1", "X", "x"), Registry::CatalogB, vec![1.0])
            .expect("valid entry");
        let err = RegistryStore::from_entries(Registry::CatalogA, vec![foreign]).unwrap_err();
        assert!(matches!(
            err,
            NarrativeRiskError::Registry(RegistryError::RegistryMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn load_embeds_descriptions_through_provider() {
        use crate::stubs::HashEmbeddingProvider;

        let provider = HashEmbeddingProvider::with_dimensions(64);
        let defs = vec![
            def("CAT-1", "Scarcity", "limited time pressure and urgency"),
            def("CAT-2", "Social Proof", "everyone agrees consensus majority"),
        ];
        let store = RegistryStore::load(Registry::CatalogA, defs, &provider)
            .await
            .expect("load");
        assert_eq!(store.len(), 2);
        assert_eq!(store.dimensions(), 64);
        assert!(store.get("CAT-2").is_some());
        assert!(store.get("CAT-9").is_none());
    }
}
