use std::collections::BTreeMap;

use factly_common::config::ScoringConfig;
use factly_common::types::{
    Classification, ConfidenceLevel, Consensus, CrossSourceAnalysis, EvidenceCollection,
    EvidenceStrength, ScoreComponent, VerificationResult,
};
use factly_common::{FactlyError, Result};

use crate::analyzer::{self, CrossSourceAnalyzer};

/// Weight tables must sum to 1.0 within this tolerance.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Component name resolved from the caller-supplied NLP confidence.
pub const COMPONENT_NLP_CONFIDENCE: &str = "nlp_confidence";
/// Component name resolved from the analyzer's weighted verdict score
/// (enhanced mode).
pub const COMPONENT_CROSS_SOURCE: &str = "cross_source_analysis";

/// Combines the NLP-confidence sub-score, per-source sub-scores, and a
/// fresh cross-source analysis into one 0–100 credibility score.
///
/// Pure function of its inputs: identical inputs yield an identical
/// score.
pub struct ScoringEngine {
    config: ScoringConfig,
    analyzer: CrossSourceAnalyzer,
}

impl ScoringEngine {
    /// Build an engine, validating the active weight table up front.
    /// An empty table or one whose weights do not sum to 1.0 is a
    /// configuration error; no score may ever be produced from it.
    pub fn new(config: ScoringConfig, analyzer: CrossSourceAnalyzer) -> Result<Self> {
        validate_weights(config.active_weights())?;
        Ok(Self { config, analyzer })
    }

    /// Score one claim's evidence.
    pub fn verify(
        &self,
        nlp_confidence: f64,
        per_source_subscores: &BTreeMap<String, f64>,
        evidence: &EvidenceCollection,
    ) -> Result<VerificationResult> {
        validate_inputs(nlp_confidence, per_source_subscores, evidence)?;

        let analysis = self.analyzer.analyze(evidence);
        let components =
            self.resolve_components(nlp_confidence, per_source_subscores, evidence)?;

        let base: f64 = components.iter().map(|c| c.weighted_score).sum();
        let base_0_100 = base * 100.0;

        let consensus_adj = consensus_adjustment(analysis.consensus_level);
        let strength_adj = strength_adjustment(analysis.evidence_strength);

        // Mean raw component confidence; below 0.5 the boost turns
        // into a penalty.
        let overall_confidence: f64 =
            components.iter().map(|c| c.raw_score).sum::<f64>() / components.len() as f64;
        let confidence_boost = (overall_confidence - 0.5) * 20.0;

        let raw_final = base_0_100 + consensus_adj + strength_adj + confidence_boost;
        let factly_score = raw_final.clamp(0.0, 100.0).round() as u8;

        let classification = Classification::from_score(factly_score);
        let confidence_level = ConfidenceLevel::from_confidence(overall_confidence);

        tracing::debug!(
            factly_score,
            base = base_0_100,
            consensus_adj,
            strength_adj,
            confidence_boost,
            "Computed credibility score"
        );
        metrics::histogram!("scoring.factly_score").record(f64::from(factly_score));

        Ok(VerificationResult {
            factly_score,
            classification,
            confidence_level,
            components,
            analysis,
        })
    }

    /// Run only the cross-source analysis, without scoring.
    pub fn analyze(&self, evidence: &EvidenceCollection) -> CrossSourceAnalysis {
        self.analyzer.analyze(evidence)
    }

    /// Resolve each configured weight to a raw score. Reserved names
    /// resolve internally; everything else must be supplied, or the
    /// configuration and the inputs disagree and we refuse to guess.
    fn resolve_components(
        &self,
        nlp_confidence: f64,
        subscores: &BTreeMap<String, f64>,
        evidence: &EvidenceCollection,
    ) -> Result<Vec<ScoreComponent>> {
        let weights = self.config.active_weights();

        for name in subscores.keys() {
            if !weights.contains_key(name) {
                tracing::warn!(component = %name, "Sub-score supplied for unconfigured component, ignoring");
            }
        }

        let mut components = Vec::with_capacity(weights.len());
        for (name, weight) in weights {
            let raw = match name.as_str() {
                COMPONENT_NLP_CONFIDENCE => nlp_confidence,
                COMPONENT_CROSS_SOURCE => analyzer::verdict_weighted_score(evidence),
                other => *subscores.get(other).ok_or_else(|| {
                    FactlyError::Config(format!(
                        "component '{}' is configured with weight {} but no score was supplied",
                        other, weight
                    ))
                })?,
            };
            components.push(ScoreComponent::new(name.clone(), raw, *weight));
        }

        // Ordered by weight descending for consistent display; name as
        // a deterministic tie-break.
        components.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(components)
    }
}

fn validate_weights(weights: &BTreeMap<String, f64>) -> Result<()> {
    if weights.is_empty() {
        return Err(FactlyError::Config(
            "scoring weight table has zero components".to_string(),
        ));
    }
    for (name, weight) in weights {
        if !(0.0..=1.0).contains(weight) {
            return Err(FactlyError::Config(format!(
                "weight for component '{}' is {} (must be within [0, 1])",
                name, weight
            )));
        }
    }
    let sum: f64 = weights.values().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(FactlyError::Config(format!(
            "scoring weights sum to {} (must be 1.0 within {})",
            sum, WEIGHT_SUM_TOLERANCE
        )));
    }
    Ok(())
}

fn validate_inputs(
    nlp_confidence: f64,
    subscores: &BTreeMap<String, f64>,
    evidence: &EvidenceCollection,
) -> Result<()> {
    if !(0.0..=1.0).contains(&nlp_confidence) {
        return Err(FactlyError::Validation(format!(
            "nlp_confidence {} outside [0, 1]",
            nlp_confidence
        )));
    }
    for (name, score) in subscores {
        if !(0.0..=1.0).contains(score) {
            return Err(FactlyError::Validation(format!(
                "sub-score for '{}' is {} (must be within [0, 1])",
                name, score
            )));
        }
    }
    for item in &evidence.items {
        item.validate().map_err(FactlyError::Validation)?;
    }
    Ok(())
}

/// Flat point adjustment from the consensus level.
fn consensus_adjustment(consensus: Consensus) -> f64 {
    match consensus {
        Consensus::StrongAgreement => 5.0,
        Consensus::ModerateAgreement => 2.0,
        Consensus::Mixed => 0.0,
        Consensus::ModerateDisagreement => -8.0,
        Consensus::StrongDisagreement => -15.0,
    }
}

/// Flat point adjustment from the evidence strength. Applied on top of
/// any cross-source weighted component: the compounding of the
/// consensus signal is deliberate, acting as a conservative penalty
/// amplifier.
fn strength_adjustment(strength: EvidenceStrength) -> f64 {
    match strength {
        EvidenceStrength::Strong => 5.0,
        EvidenceStrength::Moderate => 2.0,
        EvidenceStrength::Weak => -5.0,
        EvidenceStrength::Insufficient => -10.0,
        EvidenceStrength::Conflicting => -15.0,
    }
}
