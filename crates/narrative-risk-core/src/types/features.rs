//! Records supplied by external collaborators.
//!
//! `NarrativeFeatures` comes from a remote language-model extraction
//! call and `PeripheralSignals` from local text heuristics — both are
//! out of scope here and consumed read-only. Missing or empty fields are
//! neutral, never an error.

use serde::{Deserialize, Serialize};

fn neutral() -> String {
    "neutral".to_string()
}

/// Rhetorical/emotional/structural signals extracted from a narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeFeatures {
    /// Overall sentiment: "negative", "neutral", or "positive".
    pub sentiment: String,
    /// Stance toward the subject: e.g. "critical", "supportive", "neutral".
    pub stance: String,
    /// Frames the narrative is built around (e.g. "victimhood", "corruption").
    pub narrative_frames: Vec<String>,
    /// Rhetorical devices in play (e.g. "scarcity", "appeal to authority").
    pub rhetorical_devices: Vec<String>,
    /// Emotional markers (e.g. "fear", "anger", "urgency").
    pub emotional_markers: Vec<String>,
    /// Identity-related markers (e.g. "outgroup-threat").
    pub identity_markers: Vec<String>,
    /// Links to other circulating narratives (e.g. "conspiracy").
    pub cross_narrative_links: Vec<String>,
}

impl Default for NarrativeFeatures {
    fn default() -> Self {
        Self {
            sentiment: neutral(),
            stance: neutral(),
            narrative_frames: Vec::new(),
            rhetorical_devices: Vec::new(),
            emotional_markers: Vec::new(),
            identity_markers: Vec::new(),
            cross_narrative_links: Vec::new(),
        }
    }
}

/// Peripheral persuasion signals from local text heuristics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeripheralSignals {
    /// Estimated cognitive load of the text, in [0, 1].
    pub cognitive_load: f32,
    /// Detected framing patterns (e.g. "Threat", "Scarcity").
    pub framing_patterns: Vec<String>,
    /// Detected temporal cues (e.g. "Crisis Trigger").
    pub temporal_cues: Vec<String>,
    /// Blended peripheral influence score, in [0, 1].
    pub peripheral_score: f32,
}
