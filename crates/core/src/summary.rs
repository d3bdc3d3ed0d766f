use factly_common::api::verify::VerificationSummary;
use factly_common::types::{
    Classification, Consensus, EvidenceStrength, Verdict, VerificationResult,
};

/// Render a `VerificationResult` into a human-readable summary.
/// Thin formatting only; every figure comes from the result itself.
pub fn generate(result: &VerificationResult) -> VerificationSummary {
    VerificationSummary {
        headline: headline(result.factly_score, result.analysis.recommended_verdict),
        key_findings: key_findings(result),
        recommendations: recommendations(result),
        limitations: result.analysis.uncertainty_factors.clone(),
    }
}

fn headline(score: u8, verdict: Verdict) -> String {
    let band = match score {
        80..=100 => "Verified Authentic",
        60..=79 => "Likely True",
        40..=59 => "Uncertain",
        20..=39 => "Likely False",
        _ => "Disproven",
    };
    format!("{}: sources point to '{}'", band, verdict.as_str())
}

fn key_findings(result: &VerificationResult) -> Vec<String> {
    let mut findings = Vec::new();
    let analysis = &result.analysis;

    findings.push(format!(
        "Factly score {}/100 ({})",
        result.factly_score,
        match result.classification {
            Classification::LikelyFake => "likely fake",
            Classification::Uncertain => "uncertain",
            Classification::LikelyAuthentic => "likely authentic",
        }
    ));

    match analysis.consensus_level {
        Consensus::StrongAgreement => {
            findings.push("Credible sources strongly agree on this claim".to_string())
        }
        Consensus::ModerateAgreement => {
            findings.push("Most credible sources agree on this claim".to_string())
        }
        Consensus::Mixed => findings.push("Sources report mixed results".to_string()),
        Consensus::ModerateDisagreement | Consensus::StrongDisagreement => {
            findings.push("Sources disagree on this claim".to_string())
        }
    }

    if analysis.evidence_strength == EvidenceStrength::Insufficient {
        findings.push("No evidence was found to verify this claim".to_string());
    }

    for contradiction in &analysis.contradictions {
        findings.push(contradiction.description.clone());
    }

    if let Some(top) = result.components.first() {
        findings.push(format!(
            "Largest scoring factor: {} ({:.0}% weight)",
            top.name,
            top.weight * 100.0
        ));
    }

    findings
}

fn recommendations(result: &VerificationResult) -> Vec<String> {
    let mut recs = match result.classification {
        Classification::LikelyAuthentic => vec![
            "This information appears accurate based on available evidence".to_string(),
            "Consider verifying with official sources if critical".to_string(),
        ],
        Classification::Uncertain => vec![
            "Exercise caution with this information".to_string(),
            "Seek additional verification from authoritative sources".to_string(),
        ],
        Classification::LikelyFake => vec![
            "This information is likely inaccurate".to_string(),
            "Do not share without additional verification".to_string(),
        ],
    };

    if !result.analysis.contradictions.is_empty() {
        recs.push(format!(
            "Note: {} contradiction(s) found between sources",
            result.analysis.contradictions.len()
        ));
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use factly_common::types::{ConfidenceLevel, CrossSourceAnalysis, ScoreComponent};

    fn result(score: u8, strength: EvidenceStrength) -> VerificationResult {
        VerificationResult {
            factly_score: score,
            classification: Classification::from_score(score),
            confidence_level: ConfidenceLevel::Medium,
            components: vec![ScoreComponent::new("nlp_confidence", 0.6, 1.0)],
            analysis: CrossSourceAnalysis {
                consensus_level: Consensus::Mixed,
                agreement_score: 0.5,
                evidence_strength: strength,
                contradictions: Vec::new(),
                recommended_verdict: Verdict::Mixed,
                uncertainty_factors: vec!["low source diversity (1 source type)".to_string()],
            },
        }
    }

    #[test]
    fn test_headline_bands() {
        assert!(headline(92, Verdict::True).starts_with("Verified Authentic"));
        assert!(headline(65, Verdict::True).starts_with("Likely True"));
        assert!(headline(45, Verdict::Mixed).starts_with("Uncertain"));
        assert!(headline(25, Verdict::False).starts_with("Likely False"));
        assert!(headline(5, Verdict::False).starts_with("Disproven"));
    }

    #[test]
    fn test_summary_carries_uncertainty_as_limitations() {
        let summary = generate(&result(50, EvidenceStrength::Weak));
        assert_eq!(summary.limitations.len(), 1);
        assert!(summary.limitations[0].contains("diversity"));
    }

    #[test]
    fn test_insufficient_evidence_called_out() {
        let summary = generate(&result(40, EvidenceStrength::Insufficient));
        assert!(summary
            .key_findings
            .iter()
            .any(|f| f.contains("No evidence")));
    }

    #[test]
    fn test_low_score_recommends_not_sharing() {
        let summary = generate(&result(15, EvidenceStrength::Conflicting));
        assert!(summary
            .recommendations
            .iter()
            .any(|r| r.contains("Do not share")));
    }
}
