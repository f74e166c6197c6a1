//! Dual-registry technique identification.
//!
//! One query embedding is matched against both catalogs independently,
//! adjusted for category and technical-vocabulary false positives,
//! filtered by a minimum confidence, and merged under a balanced
//! inclusion policy: each registry's top k is guaranteed a seat, with
//! pooled backfill when one side runs short. A single ranked list over
//! the union would let the semantically denser catalog crowd the other
//! out entirely.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::constants::identify as defaults;
use crate::error::Result;
use crate::registry::RegistryStore;
use crate::traits::EmbeddingProvider;
use crate::types::{IdentificationResult, Registry, TechniqueCategory};

/// Down-weights entries whose descriptions lean on narrowly technical
/// vocabulary the input text never uses.
///
/// Semantic proximity alone is a weak signal for such entries: a
/// narrative about pressure and fear should not match a key-extraction
/// technique just because both mention coercion in the abstract. The
/// damping is multiplicative and skipped entirely when the input text
/// itself contains one of the guarded terms.
#[derive(Debug, Clone)]
pub struct TechnicalTermGuard {
    /// Lowercased technical vocabulary to guard against.
    pub terms: Vec<String>,
    /// Multiplier applied when the guard fires.
    pub damping: f32,
}

impl TechnicalTermGuard {
    /// Build a guard from string slices.
    pub fn new(terms: &[&str], damping: f32) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_lowercase()).collect(),
            damping,
        }
    }

    /// Guard for Catalog-A: cryptographic, electromagnetic, and
    /// model-internals vocabulary.
    pub fn catalog_a_default() -> Self {
        Self::new(
            &[
                "ultrasonic",
                "model inversion",
                "backdoor",
                "prompt injection",
                "coercion",
                "torture",
                "extract keys",
                "rubber-hose",
                "cryptanalysis",
                "encryption",
                "blockchain",
                "quantum",
                "cryptography",
                "malware",
                "trojan",
            ],
            defaults::GUARD_DAMPING_A,
        )
    }

    /// Guard for Catalog-B: operational-artifact vocabulary.
    pub fn catalog_b_default() -> Self {
        Self::new(
            &["deepfake", "bot", "hashtag", "inauthentic"],
            defaults::GUARD_DAMPING_B,
        )
    }

    /// Multiplier for an entry given its description and the input text,
    /// both lowercased.
    fn factor(&self, description: &str, text: &str) -> f32 {
        let guarded = self.terms.iter().any(|t| description.contains(t.as_str()));
        if guarded && !self.terms.iter().any(|t| text.contains(t.as_str())) {
            self.damping
        } else {
            1.0
        }
    }
}

/// Tunables for [`TechniqueIdentifier`].
#[derive(Debug, Clone)]
pub struct IdentifyConfig {
    /// Minimum adjusted score for an entry to qualify.
    pub min_confidence: f32,
    /// Guaranteed inclusion floor per registry.
    pub top_k_per_registry: usize,
    /// Technical-vocabulary guard for Catalog-A.
    pub guard_a: TechnicalTermGuard,
    /// Technical-vocabulary guard for Catalog-B.
    pub guard_b: TechnicalTermGuard,
    /// Per-category weight; directly cognitive/behavioral categories keep
    /// full weight by default.
    pub category_weights: BTreeMap<TechniqueCategory, f32>,
}

impl Default for IdentifyConfig {
    fn default() -> Self {
        let mut category_weights = BTreeMap::new();
        category_weights.insert(TechniqueCategory::Vulnerability, 1.0);
        category_weights.insert(TechniqueCategory::Exploit, 1.0);
        category_weights.insert(TechniqueCategory::Ttp, 1.0);
        Self {
            min_confidence: defaults::MIN_CONFIDENCE,
            top_k_per_registry: defaults::TOP_K_PER_REGISTRY,
            guard_a: TechnicalTermGuard::catalog_a_default(),
            guard_b: TechnicalTermGuard::catalog_b_default(),
            category_weights,
        }
    }
}

/// Matches free text against both technique registries.
///
/// Stateless per query; the registries and provider are shared read-only.
pub struct TechniqueIdentifier {
    provider: Arc<dyn EmbeddingProvider>,
    catalog_a: Arc<RegistryStore>,
    catalog_b: Arc<RegistryStore>,
    config: IdentifyConfig,
}

impl TechniqueIdentifier {
    /// Construct with default tunables.
    ///
    /// # Errors
    ///
    /// `Validation` if a store is tagged for the wrong registry or a
    /// non-empty store's dimensions disagree with the provider's.
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        catalog_a: Arc<RegistryStore>,
        catalog_b: Arc<RegistryStore>,
    ) -> Result<Self> {
        Self::with_config(provider, catalog_a, catalog_b, IdentifyConfig::default())
    }

    /// Construct with explicit tunables.
    pub fn with_config(
        provider: Arc<dyn EmbeddingProvider>,
        catalog_a: Arc<RegistryStore>,
        catalog_b: Arc<RegistryStore>,
        config: IdentifyConfig,
    ) -> Result<Self> {
        use crate::error::NarrativeRiskError;

        for (store, expected) in [(&catalog_a, Registry::CatalogA), (&catalog_b, Registry::CatalogB)]
        {
            if store.registry() != expected {
                return Err(NarrativeRiskError::Validation(format!(
                    "store tagged {} supplied for registry {expected}",
                    store.registry()
                )));
            }
            if !store.is_empty() && store.dimensions() != provider.dimensions() {
                return Err(NarrativeRiskError::Validation(format!(
                    "registry {expected} dimension {} does not match provider dimension {}",
                    store.dimensions(),
                    provider.dimensions()
                )));
            }
        }
        Ok(Self {
            provider,
            catalog_a,
            catalog_b,
            config,
        })
    }

    /// Identify techniques using the configured thresholds.
    pub async fn identify(&self, text: &str) -> Result<Vec<IdentificationResult>> {
        self.identify_with(
            text,
            self.config.min_confidence,
            self.config.top_k_per_registry,
        )
        .await
    }

    /// Identify techniques with explicit thresholds.
    ///
    /// Returns at most `2 * top_k_per_registry` results, sorted by
    /// confidence descending with registry-then-id tiebreaks. Blank input
    /// yields an empty sequence; so does a query that clears no entry
    /// past `min_confidence` in either registry — both are valid,
    /// reportable outcomes.
    pub async fn identify_with(
        &self,
        text: &str,
        min_confidence: f32,
        top_k_per_registry: usize,
    ) -> Result<Vec<IdentificationResult>> {
        if text.trim().is_empty() || top_k_per_registry == 0 {
            return Ok(Vec::new());
        }

        let query = self.provider.embed(text).await?.vector;
        let text_lower = text.to_lowercase();

        let matches_a = self.match_registry(
            &self.catalog_a,
            &self.config.guard_a,
            &query,
            &text_lower,
            min_confidence,
        );
        let matches_b = self.match_registry(
            &self.catalog_b,
            &self.config.guard_b,
            &query,
            &text_lower,
            min_confidence,
        );
        debug!(
            catalog_a = matches_a.len(),
            catalog_b = matches_b.len(),
            min_confidence,
            "qualifying matches per registry"
        );

        Ok(balanced_merge(matches_a, matches_b, top_k_per_registry))
    }

    /// Score one registry: raw cosine, category weight, technical guard,
    /// threshold filter. Output is sorted by confidence descending.
    fn match_registry(
        &self,
        store: &RegistryStore,
        guard: &TechnicalTermGuard,
        query: &[f32],
        text_lower: &str,
        min_confidence: f32,
    ) -> Vec<IdentificationResult> {
        let mut matches: Vec<IdentificationResult> = store
            .similarity(query)
            .into_iter()
            .filter_map(|(id, raw)| {
                let entry = store.get(&id)?;
                let category_weight = self
                    .config
                    .category_weights
                    .get(&entry.category())
                    .copied()
                    .unwrap_or(1.0);
                let description_lower = entry.description().to_lowercase();
                let adjusted = (raw
                    * category_weight
                    * guard.factor(&description_lower, text_lower))
                .clamp(0.0, 1.0);

                (adjusted >= min_confidence).then(|| IdentificationResult {
                    id,
                    name: entry.name().to_string(),
                    confidence: adjusted,
                    registry: entry.registry(),
                })
            })
            .collect();
        sort_results(&mut matches);
        matches
    }
}

/// Order: confidence descending, then registry (A before B), then id.
fn sort_results(results: &mut [IdentificationResult]) {
    results.sort_unstable_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.registry.cmp(&b.registry))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Balanced-inclusion merge of two per-registry ranked lists.
///
/// Takes the top `k` from each registry unconditionally, then backfills
/// from the pooled remainder (resorted by confidence) until the target
/// of `2k` is reached or both registries are exhausted.
fn balanced_merge(
    matches_a: Vec<IdentificationResult>,
    matches_b: Vec<IdentificationResult>,
    k: usize,
) -> Vec<IdentificationResult> {
    let target = 2 * k;
    let mut merged: Vec<IdentificationResult> = Vec::with_capacity(target);

    merged.extend(matches_a.iter().take(k).cloned());
    merged.extend(matches_b.iter().take(k).cloned());

    if merged.len() < target {
        let needed = target - merged.len();
        let mut extras: Vec<IdentificationResult> = matches_a
            .into_iter()
            .skip(k)
            .chain(matches_b.into_iter().skip(k))
            .collect();
        sort_results(&mut extras);
        merged.extend(extras.into_iter().take(needed));
    }

    sort_results(&mut merged);
    merged.truncate(target);
    merged
}
