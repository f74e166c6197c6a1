//! Named calibration constants.
//!
//! Every threshold and scaling factor that shapes scoring lives here,
//! not inline in logic. Values are the calibrated defaults; components
//! that accept a config struct can override them per instance.

/// Technique-identification defaults.
pub mod identify {
    /// Minimum adjusted similarity for a registry entry to qualify.
    pub const MIN_CONFIDENCE: f32 = 0.45;

    /// Guaranteed inclusion floor per registry in the balanced merge.
    pub const TOP_K_PER_REGISTRY: usize = 5;

    /// Damping multiplier for Catalog-A entries whose descriptions lean on
    /// narrowly technical vocabulary absent from the input text.
    pub const GUARD_DAMPING_A: f32 = 0.3;

    /// Damping multiplier for Catalog-B under the same guard. Lighter than
    /// Catalog-A, whose descriptions carry far more technical vocabulary.
    pub const GUARD_DAMPING_B: f32 = 0.7;
}

/// Audience-resonance calibration.
pub mod resonance {
    /// Calibration ceiling: maximum expected simultaneous signal richness.
    ///
    /// The resonance score divides total hit/technique signal by this value
    /// before clamping to 1.0.
    pub const CEILING: f32 = 12.0;

    /// Contribution of each identified technique to the resonance numerator.
    pub const TECHNIQUE_WEIGHT: f32 = 0.15;

    /// Resonance at or above this is reported as the HIGH band.
    pub const HIGH_BAND: f32 = 0.7;

    /// Resonance at or above this (and below HIGH) is the MODERATE band.
    pub const MODERATE_BAND: f32 = 0.4;
}

/// Risk-aggregation constants.
pub mod risk {
    /// A domain scoring above this counts as an independently strong signal.
    pub const STRONG_SIGNAL: f32 = 0.5;

    /// Confidence when no domain is strong.
    pub const CONFIDENCE_FLOOR: f32 = 0.6;

    /// Confidence gained when all six domains are strong.
    pub const CONFIDENCE_SPAN: f32 = 0.4;

    /// Multiplier mapping instability [0,1] onto the 1–100 index.
    /// `risk_index = floor(instability * RISK_INDEX_SPAN) + 1`.
    pub const RISK_INDEX_SPAN: f32 = 99.0;
}
