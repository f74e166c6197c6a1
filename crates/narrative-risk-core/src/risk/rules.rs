//! Declarative PMESII domain rule table.
//!
//! All domain-specific keywords, increments, caps, weights, and
//! resonance sensitivities live here. The aggregator iterates this table
//! uniformly; adding or recalibrating a domain never touches scoring
//! logic.

use serde::{Deserialize, Serialize};

/// One of the six PMESII analytic domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// Institutional legitimacy and governance.
    Political,
    /// Armed-conflict and direct-threat framing.
    Military,
    /// Material security and scarcity.
    Economic,
    /// Group identity and cohesion.
    Social,
    /// The information environment itself.
    Information,
    /// Critical systems and time-critical windows.
    Infrastructure,
}

impl Domain {
    /// All domains in PMESII order.
    pub fn all() -> [Domain; 6] {
        [
            Domain::Political,
            Domain::Military,
            Domain::Economic,
            Domain::Social,
            Domain::Information,
            Domain::Infrastructure,
        ]
    }
}

/// Scoring parameters for one domain.
#[derive(Debug, Clone)]
pub struct DomainRule {
    /// Domain this rule scores.
    pub domain: Domain,
    /// Contribution to the weighted instability sum. Weights across the
    /// table sum to 1.0.
    pub weight: f32,
    /// Baseline score in the absence of any evidence. Never zero:
    /// no evidence means baseline uncertainty, not certainty of
    /// stability.
    pub base: f32,
    /// Increment per matching vulnerability/peripheral entry.
    pub hit_increment: f32,
    /// Cap on the total hit boost.
    pub hit_cap: f32,
    /// Scale applied to the summed confidence of name-matching techniques.
    pub technique_scale: f32,
    /// Cap on the technique-confidence boost.
    pub technique_cap: f32,
    /// Increment per literal keyword occurrence in the raw text.
    pub text_increment: f32,
    /// Cap on the raw-text boost.
    pub text_cap: f32,
    /// How strongly audience resonance amplifies this domain.
    pub resonance_sensitivity: f32,
    /// Lowercase keyword group matched against hits, technique names,
    /// and raw text.
    pub keywords: &'static [&'static str],
}

/// The calibrated default table.
///
/// Weights follow the final historical calibration: information and the
/// cognitive-adjacent domains (political, social) carry the most weight,
/// infrastructure the least. Information is the most
/// resonance-sensitive domain, infrastructure the least.
pub fn default_rules() -> [DomainRule; 6] {
    [
        DomainRule {
            domain: Domain::Political,
            weight: 0.20,
            base: 0.30,
            hit_increment: 0.25,
            hit_cap: 0.50,
            technique_scale: 0.15,
            technique_cap: 0.30,
            text_increment: 0.05,
            text_cap: 0.20,
            resonance_sensitivity: 0.40,
            keywords: &[
                "distrust",
                "corruption",
                "elite",
                "institution",
                "regime",
                "government",
                "election",
                "legitimacy",
            ],
        },
        DomainRule {
            domain: Domain::Military,
            weight: 0.15,
            base: 0.20,
            hit_increment: 0.25,
            hit_cap: 0.50,
            technique_scale: 0.15,
            technique_cap: 0.30,
            text_increment: 0.05,
            text_cap: 0.25,
            resonance_sensitivity: 0.20,
            keywords: &[
                "threat", "attack", "aggression", "invasion", "military", "forces", "war",
                "strike",
            ],
        },
        DomainRule {
            domain: Domain::Economic,
            weight: 0.15,
            base: 0.30,
            hit_increment: 0.20,
            hit_cap: 0.40,
            technique_scale: 0.15,
            technique_cap: 0.30,
            text_increment: 0.05,
            text_cap: 0.20,
            resonance_sensitivity: 0.30,
            keywords: &[
                "economic",
                "anxiety",
                "scarcity",
                "crisis",
                "inflation",
                "jobs",
                "poverty",
                "collapse",
                "market",
            ],
        },
        DomainRule {
            domain: Domain::Social,
            weight: 0.20,
            base: 0.20,
            hit_increment: 0.15,
            hit_cap: 0.45,
            technique_scale: 0.15,
            technique_cap: 0.30,
            text_increment: 0.05,
            text_cap: 0.20,
            resonance_sensitivity: 0.45,
            keywords: &[
                "identity",
                "polarization",
                "outgroup",
                "community",
                "grievance",
                "family",
                "victim",
                "conformity",
            ],
        },
        DomainRule {
            domain: Domain::Information,
            weight: 0.20,
            base: 0.25,
            hit_increment: 0.15,
            hit_cap: 0.30,
            technique_scale: 0.10,
            technique_cap: 0.40,
            text_increment: 0.05,
            text_cap: 0.20,
            resonance_sensitivity: 0.50,
            keywords: &[
                "media",
                "news",
                "narrative",
                "platform",
                "inauthentic",
                "bot",
                "hashtag",
                "amplif",
                "censor",
                "persona",
                "astroturf",
                "consensus",
            ],
        },
        DomainRule {
            domain: Domain::Infrastructure,
            weight: 0.10,
            base: 0.30,
            hit_increment: 0.20,
            hit_cap: 0.40,
            technique_scale: 0.10,
            technique_cap: 0.20,
            text_increment: 0.05,
            text_cap: 0.20,
            resonance_sensitivity: 0.10,
            keywords: &[
                "urgency",
                "urgent",
                "crisis_window",
                "limited time",
                "now or never",
                "grid",
                "supply",
                "outage",
                "shortage",
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let total: f32 = default_rules().iter().map(|r| r.weight).sum();
        assert!((total - 1.0).abs() < 1e-6, "weights sum to {total}");
    }

    #[test]
    fn bases_stay_in_calibration_band() {
        for rule in default_rules() {
            assert!(
                rule.base >= 0.2 && rule.base <= 0.35,
                "{:?} base {} outside [0.2, 0.35]",
                rule.domain,
                rule.base
            );
        }
    }

    #[test]
    fn sensitivities_are_nonnegative_with_information_highest() {
        let rules = default_rules();
        let sensitivity = |d: Domain| {
            rules
                .iter()
                .find(|r| r.domain == d)
                .map(|r| r.resonance_sensitivity)
                .unwrap()
        };
        for rule in &rules {
            assert!(rule.resonance_sensitivity >= 0.0);
            assert!(sensitivity(Domain::Information) >= rule.resonance_sensitivity);
            assert!(sensitivity(Domain::Infrastructure) <= rule.resonance_sensitivity);
        }
    }

    #[test]
    fn caps_keep_boosted_scores_clampable() {
        // base + all caps may exceed 1.0 (clamped later), but each cap
        // must be positive and no increment may exceed its cap.
        for rule in default_rules() {
            assert!(rule.hit_increment > 0.0 && rule.hit_increment <= rule.hit_cap);
            assert!(rule.text_increment > 0.0 && rule.text_increment <= rule.text_cap);
            assert!(rule.technique_scale > 0.0 && rule.technique_cap > 0.0);
        }
    }

    #[test]
    fn table_covers_every_domain_once() {
        let rules = default_rules();
        for domain in Domain::all() {
            assert_eq!(rules.iter().filter(|r| r.domain == domain).count(), 1);
        }
    }

    #[test]
    fn keywords_are_lowercase() {
        for rule in default_rules() {
            for kw in rule.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "{:?}: {kw}", rule.domain);
            }
        }
    }
}
