//! Terminal risk-assessment record.

use serde::{Deserialize, Serialize};

/// Composite instability profile across the six PMESII domains.
///
/// Immutable once constructed. All domain scores and `instability` are
/// in [0, 1]; `confidence` is in [0.6, 1.0]; `risk_index` is in [1, 100]
/// and always equals `floor(instability * 99) + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Final 1–100 integer for reporting.
    pub risk_index: u8,
    /// Weighted instability across all domains.
    pub instability: f32,
    /// Trust in the aggregation, driven by how many domains signal strongly.
    pub confidence: f32,
    /// Political domain score.
    pub political: f32,
    /// Military domain score.
    pub military: f32,
    /// Economic domain score.
    pub economic: f32,
    /// Social domain score.
    pub social: f32,
    /// Information domain score.
    pub information: f32,
    /// Infrastructure domain score.
    pub infrastructure: f32,
}

impl RiskAssessment {
    /// Domain scores in PMESII order, for radar-style consumers.
    pub fn domain_scores(&self) -> [f32; 6] {
        [
            self.political,
            self.military,
            self.economic,
            self.social,
            self.information,
            self.infrastructure,
        ]
    }
}
