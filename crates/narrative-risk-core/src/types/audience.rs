//! Normalized target-audience records.
//!
//! Produced by an upstream validation layer; consumed read-only here.
//! Every field tolerates being empty — absent audience knowledge means
//! fewer activated rules, never an error.

use serde::{Deserialize, Serialize};

/// Basic demographic descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Demographics {
    /// e.g. "25-40".
    pub age_range: String,
    /// e.g. "rural midwest".
    pub location: String,
    /// e.g. "secondary".
    pub education_level: String,
}

/// Description of the audience a narrative targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudienceProfile {
    /// Demographic descriptors.
    pub demographics: Demographics,
    /// Declared political lean (free text, e.g. "center-right").
    pub political_orientation: String,
    /// Group identities the audience holds (e.g. "union workers").
    pub group_identities: Vec<String>,
    /// Known vulnerability tags (e.g. "economic anxiety").
    pub known_vulnerabilities: Vec<String>,
    /// Channels the audience gets information through.
    pub information_channels: Vec<String>,
    /// Optional cultural context note.
    pub cultural_context: Option<String>,
    /// Active stressors (e.g. "layoffs", "housing crisis").
    pub current_stressors: Vec<String>,
}
