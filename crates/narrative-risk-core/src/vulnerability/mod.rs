//! Audience vulnerability inference.
//!
//! Converts narrative signals, audience metadata, and identified
//! techniques into categorical vulnerability tags plus a bounded
//! resonance score. Psychological and sociocultural hits come from two
//! independent declarative rule tables; each rule is a keyword group
//! checked (lowercased substring containment) against one signal source.

use std::collections::BTreeSet;

use crate::config::constants::resonance;
use crate::types::{AudienceProfile, IdentificationResult, NarrativeFeatures, VulnerabilityMap};

/// Which input field a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSource {
    /// `NarrativeFeatures::emotional_markers`
    EmotionalMarkers,
    /// `NarrativeFeatures::rhetorical_devices`
    RhetoricalDevices,
    /// `NarrativeFeatures::narrative_frames`
    NarrativeFrames,
    /// `NarrativeFeatures::identity_markers`
    IdentityMarkers,
    /// `NarrativeFeatures::cross_narrative_links`
    CrossNarrativeLinks,
    /// `AudienceProfile::known_vulnerabilities`
    KnownVulnerabilities,
    /// `AudienceProfile::group_identities`
    GroupIdentities,
    /// `AudienceProfile::information_channels`
    InformationChannels,
    /// `AudienceProfile::political_orientation`
    PoliticalOrientation,
    /// `AudienceProfile::current_stressors`
    CurrentStressors,
    /// Names of identified techniques
    TechniqueNames,
}

/// One inference rule: if any keyword appears in the source, the tag is
/// added to the hit set.
#[derive(Debug, Clone, Copy)]
pub struct HitRule {
    /// Vulnerability tag contributed when the rule fires.
    pub tag: &'static str,
    /// Signal source inspected.
    pub source: SignalSource,
    /// Lowercase keywords checked by substring containment.
    pub keywords: &'static [&'static str],
}

/// Psychological (individual-cognition) rule table.
pub fn psychological_rules() -> &'static [HitRule] {
    &[
        HitRule {
            tag: "fear-response",
            source: SignalSource::EmotionalMarkers,
            keywords: &["fear", "afraid", "terror", "dread"],
        },
        HitRule {
            tag: "moral-outrage",
            source: SignalSource::EmotionalMarkers,
            keywords: &["anger", "outrage", "furious", "indignation"],
        },
        HitRule {
            tag: "scarcity/urgency-bias",
            source: SignalSource::EmotionalMarkers,
            keywords: &["urgency", "urgent"],
        },
        HitRule {
            tag: "scarcity/urgency-bias",
            source: SignalSource::RhetoricalDevices,
            keywords: &["scarcity", "limited", "urgent", "now or never"],
        },
        HitRule {
            tag: "coercive-threat-susceptibility",
            source: SignalSource::RhetoricalDevices,
            keywords: &["explicit-threat", "threat", "ultimatum"],
        },
        HitRule {
            tag: "authority-deference",
            source: SignalSource::RhetoricalDevices,
            keywords: &["authority", "expert", "official"],
        },
        HitRule {
            tag: "general-anxiety",
            source: SignalSource::KnownVulnerabilities,
            keywords: &["anxiety"],
        },
        HitRule {
            tag: "economic-anxiety",
            source: SignalSource::KnownVulnerabilities,
            keywords: &["economic"],
        },
        HitRule {
            tag: "institutional-distrust-sensitivity",
            source: SignalSource::KnownVulnerabilities,
            keywords: &["distrust"],
        },
        HitRule {
            tag: "fear-response",
            source: SignalSource::TechniqueNames,
            keywords: &["fear", "intimidat"],
        },
        HitRule {
            tag: "repetition-normalization",
            source: SignalSource::TechniqueNames,
            keywords: &["repeated exposure", "habituation", "repetition"],
        },
        HitRule {
            tag: "conformity-pressure",
            source: SignalSource::TechniqueNames,
            keywords: &["social proof", "bandwagon", "consensus"],
        },
        HitRule {
            tag: "confirmation-bias-reinforcement",
            source: SignalSource::TechniqueNames,
            keywords: &["positive test", "confirmation", "cherry"],
        },
    ]
}

/// Sociocultural (group/system) rule table.
pub fn sociocultural_rules() -> &'static [HitRule] {
    &[
        HitRule {
            tag: "identity-polarization",
            source: SignalSource::IdentityMarkers,
            keywords: &["outgroup-threat", "outgroup", "us vs them"],
        },
        HitRule {
            tag: "institutional-distrust",
            source: SignalSource::RhetoricalDevices,
            keywords: &["delegitimization", "delegitimiz"],
        },
        HitRule {
            tag: "institutional-distrust",
            source: SignalSource::KnownVulnerabilities,
            keywords: &["institutional distrust"],
        },
        HitRule {
            tag: "politicized-identity-salience",
            source: SignalSource::PoliticalOrientation,
            keywords: &["left", "right"],
        },
        HitRule {
            tag: "labor-grievance-susceptibility",
            source: SignalSource::GroupIdentities,
            keywords: &["workers", "union", "labor"],
        },
        HitRule {
            tag: "family-safety-sensitivity",
            source: SignalSource::GroupIdentities,
            keywords: &["parents", "families"],
        },
        HitRule {
            tag: "social-media-amplification-risk",
            source: SignalSource::InformationChannels,
            keywords: &["facebook", "social", "twitter", "telegram", "tiktok"],
        },
        HitRule {
            tag: "local-ecosystem-amplification-risk",
            source: SignalSource::InformationChannels,
            keywords: &["local news", "radio", "community bulletin"],
        },
        HitRule {
            tag: "victimhood-framing-receptivity",
            source: SignalSource::NarrativeFrames,
            keywords: &["victim", "oppression", "persecution"],
        },
        HitRule {
            tag: "elite-corruption-narrative-receptivity",
            source: SignalSource::NarrativeFrames,
            keywords: &["corruption", "elite", "rigged"],
        },
        HitRule {
            tag: "conspiracy-framing-receptivity",
            source: SignalSource::CrossNarrativeLinks,
            keywords: &["conspiracy", "self-fulfilling", "cover-up"],
        },
        HitRule {
            tag: "stressor-compounding",
            source: SignalSource::CurrentStressors,
            keywords: &["crisis", "layoff", "inflation", "war", "eviction"],
        },
        HitRule {
            tag: "inauthentic-consensus-susceptibility",
            source: SignalSource::TechniqueNames,
            keywords: &["astroturf", "persona", "inauthentic", "echo chamber"],
        },
    ]
}

/// Vulnerability inference engine.
///
/// Stateless per analysis; the ceiling and technique weight can be
/// overridden for recalibration without touching the rule tables.
#[derive(Debug, Clone)]
pub struct VulnerabilityInference {
    resonance_ceiling: f32,
    technique_weight: f32,
}

impl Default for VulnerabilityInference {
    fn default() -> Self {
        Self {
            resonance_ceiling: resonance::CEILING,
            technique_weight: resonance::TECHNIQUE_WEIGHT,
        }
    }
}

impl VulnerabilityInference {
    /// Inference with the calibrated defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the resonance calibration ceiling.
    pub fn with_ceiling(mut self, ceiling: f32) -> Self {
        self.resonance_ceiling = ceiling.max(1.0);
        self
    }

    /// Override the per-technique resonance contribution.
    pub fn with_technique_weight(mut self, weight: f32) -> Self {
        self.technique_weight = weight.max(0.0);
        self
    }

    /// Build the vulnerability map for one analysis.
    ///
    /// Missing or empty inputs contribute nothing; an all-neutral input
    /// yields an empty map with zero resonance.
    pub fn infer(
        &self,
        features: &NarrativeFeatures,
        audience: &AudienceProfile,
        techniques: &[IdentificationResult],
    ) -> VulnerabilityMap {
        let signals = SignalText::collect(features, audience, techniques);

        let psychological_hits = apply_rules(psychological_rules(), &signals);
        let sociocultural_hits = apply_rules(sociocultural_rules(), &signals);

        let raw = psychological_hits.len() as f32
            + sociocultural_hits.len() as f32
            + self.technique_weight * techniques.len() as f32;
        let resonance_score = (raw / self.resonance_ceiling).min(1.0);

        let band = if resonance_score >= resonance::HIGH_BAND {
            "HIGH"
        } else if resonance_score >= resonance::MODERATE_BAND {
            "MODERATE"
        } else {
            "LOW"
        };
        let note = match band {
            "HIGH" => "High resonance with audience stressors",
            "MODERATE" => "Moderate resonance",
            _ => "Low apparent resonance",
        };

        let mut summary = std::collections::BTreeMap::new();
        summary.insert(
            "psychological_hits_count".to_string(),
            psychological_hits.len().to_string(),
        );
        summary.insert(
            "sociocultural_hits_count".to_string(),
            sociocultural_hits.len().to_string(),
        );
        summary.insert("technique_count".to_string(), techniques.len().to_string());
        summary.insert("resonance_band".to_string(), band.to_string());
        summary.insert("note".to_string(), note.to_string());

        VulnerabilityMap {
            psychological_hits,
            sociocultural_hits,
            resonance_score,
            summary,
        }
    }
}

/// Lowercased, space-joined text per signal source.
struct SignalText {
    emotional: String,
    rhetorical: String,
    frames: String,
    identity: String,
    links: String,
    known: String,
    groups: String,
    channels: String,
    orientation: String,
    stressors: String,
    technique_names: String,
}

impl SignalText {
    fn collect(
        features: &NarrativeFeatures,
        audience: &AudienceProfile,
        techniques: &[IdentificationResult],
    ) -> Self {
        fn join_lower(values: &[String]) -> String {
            values.join(" ").to_lowercase()
        }
        Self {
            emotional: join_lower(&features.emotional_markers),
            rhetorical: join_lower(&features.rhetorical_devices),
            frames: join_lower(&features.narrative_frames),
            identity: join_lower(&features.identity_markers),
            links: join_lower(&features.cross_narrative_links),
            known: join_lower(&audience.known_vulnerabilities),
            groups: join_lower(&audience.group_identities),
            channels: join_lower(&audience.information_channels),
            orientation: audience.political_orientation.to_lowercase(),
            stressors: join_lower(&audience.current_stressors),
            technique_names: techniques
                .iter()
                .map(|t| t.name.to_lowercase())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    fn text_for(&self, source: SignalSource) -> &str {
        match source {
            SignalSource::EmotionalMarkers => &self.emotional,
            SignalSource::RhetoricalDevices => &self.rhetorical,
            SignalSource::NarrativeFrames => &self.frames,
            SignalSource::IdentityMarkers => &self.identity,
            SignalSource::CrossNarrativeLinks => &self.links,
            SignalSource::KnownVulnerabilities => &self.known,
            SignalSource::GroupIdentities => &self.groups,
            SignalSource::InformationChannels => &self.channels,
            SignalSource::PoliticalOrientation => &self.orientation,
            SignalSource::CurrentStressors => &self.stressors,
            SignalSource::TechniqueNames => &self.technique_names,
        }
    }
}

fn apply_rules(rules: &[HitRule], signals: &SignalText) -> BTreeSet<String> {
    let mut hits = BTreeSet::new();
    for rule in rules {
        let text = signals.text_for(rule.source);
        if text.is_empty() {
            continue;
        }
        if rule.keywords.iter().any(|kw| text.contains(kw)) {
            hits.insert(rule.tag.to_string());
        }
    }
    hits
}
