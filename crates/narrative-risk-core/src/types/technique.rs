//! Technique catalog records and identification results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two independent technique registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Registry {
    /// Cognitive-security catalog (biases, exploits, individual-level TTPs).
    #[serde(rename = "A")]
    CatalogA,
    /// Operational influence-campaign catalog.
    #[serde(rename = "B")]
    CatalogB,
}

impl Registry {
    /// Both registries, in merge order (A before B).
    pub fn all() -> [Registry; 2] {
        [Registry::CatalogA, Registry::CatalogB]
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registry::CatalogA => write!(f, "A"),
            Registry::CatalogB => write!(f, "B"),
        }
    }
}

/// Category/layer tag carried by every catalog entry.
///
/// `Vulnerability` and `Exploit` mark directly cognitive/behavioral
/// entries; `Ttp` marks operational tradecraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TechniqueCategory {
    /// An exploitable property of human cognition.
    Vulnerability,
    /// An active exploitation pattern against such a property.
    Exploit,
    /// An operational tactic, technique, or procedure.
    #[serde(alias = "TTP")]
    Ttp,
}

/// A catalog record as authored in the registry data files.
///
/// Embeddings are not part of the authored record; they are computed (or
/// supplied) when the registry is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueDef {
    /// Stable, unique identifier (e.g. "CAT-2024-010").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description; this is the text that gets embedded.
    pub description: String,
    /// Category/layer tag.
    pub category: TechniqueCategory,
}

/// A single identified technique with its adjusted confidence.
///
/// Produced per query in rank order; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentificationResult {
    /// Catalog identifier of the matched technique.
    pub id: String,
    /// Display name of the matched technique.
    pub name: String,
    /// Adjusted similarity in [0, 1].
    pub confidence: f32,
    /// Which registry the match came from.
    pub registry: Registry,
}
