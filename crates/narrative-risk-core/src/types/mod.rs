//! Plain serializable records exposed by the engine.
//!
//! Everything here is data: no behavior beyond construction helpers and
//! range clamping. Records produced per analysis (`IdentificationResult`,
//! `VulnerabilityMap`, `RiskAssessment`) are created fresh each call and
//! never cached across requests.

mod assessment;
mod audience;
mod features;
mod technique;

pub use assessment::RiskAssessment;
pub use audience::{AudienceProfile, Demographics};
pub use features::{NarrativeFeatures, PeripheralSignals};
pub use technique::{IdentificationResult, Registry, TechniqueCategory, TechniqueDef};

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Categorical vulnerability tags plus a bounded resonance score.
///
/// Hit sets use `BTreeSet` so iteration order (and serialization) is
/// deterministic for identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityMap {
    /// Psychological vulnerability tags activated by the narrative.
    pub psychological_hits: BTreeSet<String>,
    /// Sociocultural vulnerability tags activated by the narrative.
    pub sociocultural_hits: BTreeSet<String>,
    /// How strongly the narrative aligns with this audience, in [0, 1].
    pub resonance_score: f32,
    /// Descriptive counts and the qualitative resonance band.
    pub summary: BTreeMap<String, String>,
}

impl VulnerabilityMap {
    /// Total number of activated vulnerability tags.
    pub fn hit_count(&self) -> usize {
        self.psychological_hits.len() + self.sociocultural_hits.len()
    }
}
