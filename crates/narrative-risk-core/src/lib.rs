//! Narrative Risk Core
//!
//! Technique-identification and risk-aggregation engine for analyzing
//! persuasive text against a described target audience.
//!
//! # Architecture
//!
//! Three engines over shared plain records:
//!
//! - [`registry::RegistryStore`] + [`identify::TechniqueIdentifier`]:
//!   dual-registry semantic retrieval with category-aware confidence
//!   adjustment and balanced top-k selection.
//! - [`vulnerability::VulnerabilityInference`]: categorical vulnerability
//!   tags and a bounded audience-resonance score.
//! - [`risk::RiskAggregator`]: six-domain (PMESII) instability scoring,
//!   the 1–100 risk index, and a confidence estimate.
//!
//! Embeddings are produced by an injected [`traits::EmbeddingProvider`];
//! feature extraction, input validation, peripheral heuristics, and
//! report rendering are external collaborators. All per-analysis state
//! is created fresh and discarded; the only shared resource is the
//! read-only registry store.
//!
//! # Example
//!
//! ```
//! use narrative_risk_core::risk::RiskAggregator;
//! use narrative_risk_core::types::{PeripheralSignals, VulnerabilityMap};
//!
//! let risk = RiskAggregator::new().score(
//!     &VulnerabilityMap::default(),
//!     &PeripheralSignals::default(),
//!     &[],
//!     "a quiet report about the harvest",
//! );
//! assert!((1..=100).contains(&risk.risk_index));
//! ```

pub mod config;
pub mod error;
pub mod identify;
pub mod registry;
pub mod risk;
pub mod stubs;
pub mod traits;
pub mod types;
pub mod vulnerability;

pub use error::{NarrativeRiskError, Result};
pub use identify::{IdentifyConfig, TechniqueIdentifier};
pub use registry::{RegistryStore, TechniqueEntry};
pub use risk::RiskAggregator;
pub use types::{
    AudienceProfile, IdentificationResult, NarrativeFeatures, PeripheralSignals, Registry,
    RiskAssessment, TechniqueCategory, TechniqueDef, VulnerabilityMap,
};
pub use vulnerability::VulnerabilityInference;
