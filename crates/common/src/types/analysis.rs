use serde::{Deserialize, Serialize};

use super::evidence::Verdict;

/// Categorical summary of how much the sources agree, derived from the
/// credibility-weighted agreement score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consensus {
    StrongAgreement,
    ModerateAgreement,
    Mixed,
    ModerateDisagreement,
    StrongDisagreement,
}

impl Consensus {
    /// Fixed bands over the agreement score.
    pub fn from_agreement_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::StrongAgreement
        } else if score >= 0.6 {
            Self::ModerateAgreement
        } else if score >= 0.4 {
            Self::Mixed
        } else if score >= 0.2 {
            Self::ModerateDisagreement
        } else {
            Self::StrongDisagreement
        }
    }
}

/// Overall strength of the gathered evidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStrength {
    Strong,
    Moderate,
    Weak,
    Insufficient,
    Conflicting,
}

/// A pair of evidence items with definite, differing verdicts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contradiction {
    pub source_a: String,
    pub verdict_a: Verdict,
    pub source_b: String,
    pub verdict_b: Verdict,
    pub description: String,
}

/// Complete cross-source analysis for one claim.
///
/// Recomputed fresh for each scoring request; never cached across
/// claims.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrossSourceAnalysis {
    pub consensus_level: Consensus,
    /// Credibility-weighted agreement, 0.0–1.0. Defaults to 1.0 when
    /// fewer than two comparable verdicts exist; `uncertainty_factors`
    /// flags that case so it is never read as corroboration.
    pub agreement_score: f64,
    pub evidence_strength: EvidenceStrength,
    pub contradictions: Vec<Contradiction>,
    /// Verdict implied by the weighted majority; ties resolve to
    /// `Mixed` rather than asserting true or false.
    pub recommended_verdict: Verdict,
    /// Free-text reasons confidence is reduced.
    pub uncertainty_factors: Vec<String>,
}
