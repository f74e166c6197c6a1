//! PMESII risk aggregation.
//!
//! Each domain score starts from its calibrated base and accumulates
//! three independently capped boosts — vulnerability/peripheral hits,
//! name-matching technique confidence, and literal raw-text keyword
//! evidence — then gets amplified by audience resonance according to the
//! domain's sensitivity. The six post-multiplier scores combine under a
//! fixed weight vector into instability, the 1–100 risk index, and a
//! confidence estimate.
//!
//! Raw-text scanning is a deliberate second signal source: literal
//! keyword evidence counts even when upstream feature extraction missed
//! it.

pub mod rules;

pub use rules::{default_rules, Domain, DomainRule};

use tracing::warn;

use crate::config::constants::risk as constants;
use crate::types::{IdentificationResult, PeripheralSignals, RiskAssessment, VulnerabilityMap};

/// Multi-domain risk aggregator.
#[derive(Debug, Clone)]
pub struct RiskAggregator {
    rules: Vec<DomainRule>,
}

impl Default for RiskAggregator {
    fn default() -> Self {
        Self {
            rules: default_rules().to_vec(),
        }
    }
}

impl RiskAggregator {
    /// Aggregator with the calibrated default table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator with a custom rule table (weights should sum to 1.0;
    /// the weighted sum is normalized defensively if they do not).
    pub fn with_rules(rules: Vec<DomainRule>) -> Self {
        Self { rules }
    }

    /// Compute the composite risk assessment for one analysis.
    ///
    /// A missing technique list is the empty list; absent evidence
    /// leaves every domain at its base value. Never fails.
    pub fn score(
        &self,
        vulnerability: &VulnerabilityMap,
        peripheral: &PeripheralSignals,
        techniques: &[IdentificationResult],
        raw_text: &str,
    ) -> RiskAssessment {
        let text_lower = raw_text.to_lowercase();
        let hit_entries: Vec<String> = vulnerability
            .psychological_hits
            .iter()
            .chain(vulnerability.sociocultural_hits.iter())
            .chain(peripheral.framing_patterns.iter())
            .chain(peripheral.temporal_cues.iter())
            .map(|s| s.to_lowercase())
            .collect();

        let mut domain_scores = [0.0_f32; 6];
        let mut weighted_sum = 0.0_f32;
        let mut weight_total = 0.0_f32;

        for rule in &self.rules {
            let score = domain_score(
                rule,
                &hit_entries,
                techniques,
                &text_lower,
                vulnerability.resonance_score,
            );
            let slot = Domain::all()
                .iter()
                .position(|d| *d == rule.domain)
                .unwrap_or(0);
            domain_scores[slot] = score;
            weighted_sum += rule.weight * score;
            weight_total += rule.weight;
        }

        // Weights are a design parameter summing to 1.0; normalize only
        // if a custom table breaks that.
        let mut instability = if (weight_total - 1.0).abs() > 1e-3 && weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            weighted_sum
        };
        instability = clamp_unit(instability, "instability");

        let risk_index = (instability * constants::RISK_INDEX_SPAN).floor() as u8 + 1;
        debug_assert!((1..=100).contains(&risk_index));

        let strong = domain_scores
            .iter()
            .filter(|&&s| s > constants::STRONG_SIGNAL)
            .count();
        let confidence =
            constants::CONFIDENCE_FLOOR + constants::CONFIDENCE_SPAN * (strong as f32 / 6.0);

        RiskAssessment {
            risk_index,
            instability,
            confidence,
            political: domain_scores[0],
            military: domain_scores[1],
            economic: domain_scores[2],
            social: domain_scores[3],
            information: domain_scores[4],
            infrastructure: domain_scores[5],
        }
    }
}

/// Score a single domain per its rule.
fn domain_score(
    rule: &DomainRule,
    hit_entries: &[String],
    techniques: &[IdentificationResult],
    text_lower: &str,
    resonance: f32,
) -> f32 {
    let matches_keywords = |s: &str| rule.keywords.iter().any(|kw| s.contains(kw));

    let hits = hit_entries.iter().filter(|e| matches_keywords(e)).count();
    let hit_boost = (hits as f32 * rule.hit_increment).min(rule.hit_cap);

    let technique_mass: f32 = techniques
        .iter()
        .filter(|t| matches_keywords(&t.name.to_lowercase()))
        .map(|t| t.confidence.clamp(0.0, 1.0))
        .sum();
    let technique_boost = (technique_mass * rule.technique_scale).min(rule.technique_cap);

    let occurrences: usize = rule
        .keywords
        .iter()
        .map(|kw| text_lower.matches(kw).count())
        .sum();
    let text_boost = (occurrences as f32 * rule.text_increment).min(rule.text_cap);

    let evidence = clamp_unit(
        rule.base + hit_boost + technique_boost + text_boost,
        "domain evidence",
    );
    let amplified = evidence * (1.0 + resonance.clamp(0.0, 1.0) * rule.resonance_sensitivity);
    clamp_unit(amplified, "amplified domain score")
}

/// Clamp to [0, 1]; out-of-range values indicate a calibration bug and
/// fail loudly in debug builds.
fn clamp_unit(value: f32, what: &str) -> f32 {
    debug_assert!(value.is_finite(), "{what} is not finite: {value}");
    if !(0.0..=2.5).contains(&value) {
        warn!(value, what, "score outside expected range; clamping");
    }
    value.clamp(0.0, 1.0)
}
