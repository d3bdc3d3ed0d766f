//! End-to-end pipeline tests: evidence collection → cross-source
//! analysis → scoring → summary, with no external collaborators.

use std::collections::BTreeMap;

use factly_common::config::ScoringConfig;
use factly_common::types::{
    Classification, Consensus, EvidenceCollection, EvidenceItem, EvidenceStrength, SourceType,
    Verdict,
};
use factly_core::{summary, CrossSourceAnalyzer, ScoringEngine};

fn engine() -> ScoringEngine {
    // Default baseline table: nlp_confidence 0.40, google_fact_check
    // 0.35, news_coverage 0.15, linguistic_bias 0.10.
    ScoringEngine::new(
        ScoringConfig::default(),
        CrossSourceAnalyzer::new(vec![SourceType::FactCheck, SourceType::News]),
    )
    .expect("default config is valid")
}

fn evidence_item(
    name: &str,
    source_type: SourceType,
    raw_verdict: Option<&str>,
    credibility: f64,
    relevance: f64,
) -> EvidenceItem {
    EvidenceItem {
        source_name: name.into(),
        source_type,
        raw_verdict: raw_verdict.map(String::from),
        normalized_verdict: factly_core::verdict::normalize_opt(raw_verdict),
        relevance_score: relevance,
        source_credibility: credibility,
        published_at: None,
        url: None,
    }
}

fn subscores(fact_check: f64, news: f64, bias: f64) -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("google_fact_check".to_string(), fact_check),
        ("news_coverage".to_string(), news),
        ("linguistic_bias".to_string(), bias),
    ])
}

#[test]
fn test_well_corroborated_claim_scores_authentic() {
    let mut evidence = EvidenceCollection::new("the earth orbits the sun");
    evidence.add(evidence_item(
        "politifact",
        SourceType::FactCheck,
        Some("True"),
        0.95,
        0.9,
    ));
    evidence.add(evidence_item(
        "snopes",
        SourceType::FactCheck,
        Some("Mostly True"),
        0.93,
        0.85,
    ));
    evidence.add(evidence_item(
        "reuters",
        SourceType::News,
        Some("verified"),
        0.95,
        0.8,
    ));

    let result = engine()
        .verify(0.85, &subscores(0.9, 0.8, 0.9), &evidence)
        .expect("valid inputs");

    assert_eq!(result.classification, Classification::LikelyAuthentic);
    assert_eq!(result.analysis.consensus_level, Consensus::StrongAgreement);
    assert_eq!(result.analysis.evidence_strength, EvidenceStrength::Strong);
    assert_eq!(result.analysis.recommended_verdict, Verdict::True);
    assert!(result.analysis.contradictions.is_empty());

    let summary = summary::generate(&result);
    assert!(summary.headline.contains("'true'"));
    assert!(!summary.key_findings.is_empty());
}

#[test]
fn test_debunked_claim_scores_fake() {
    let mut evidence = EvidenceCollection::new("vaccine microchips");
    evidence.add(evidence_item(
        "politifact",
        SourceType::FactCheck,
        Some("Pants on Fire"),
        0.95,
        0.95,
    ));
    evidence.add(evidence_item(
        "factcheck.org",
        SourceType::FactCheck,
        Some("False"),
        0.94,
        0.9,
    ));
    evidence.add(evidence_item(
        "apnews",
        SourceType::News,
        Some("false"),
        0.95,
        0.85,
    ));

    let result = engine()
        .verify(0.3, &subscores(0.1, 0.2, 0.2), &evidence)
        .expect("valid inputs");

    assert_eq!(result.classification, Classification::LikelyFake);
    assert_eq!(result.analysis.recommended_verdict, Verdict::False);

    let summary = summary::generate(&result);
    assert!(summary
        .recommendations
        .iter()
        .any(|r| r.contains("Do not share")));
}

#[test]
fn test_contested_claim_surfaces_contradictions() {
    let mut evidence = EvidenceCollection::new("contested policy figure");
    evidence.add(evidence_item(
        "politifact",
        SourceType::FactCheck,
        Some("True"),
        0.9,
        0.9,
    ));
    evidence.add(evidence_item(
        "snopes",
        SourceType::FactCheck,
        Some("False"),
        0.9,
        0.9,
    ));

    let result = engine()
        .verify(0.5, &subscores(0.5, 0.5, 0.5), &evidence)
        .expect("valid inputs");

    assert_eq!(
        result.analysis.consensus_level,
        Consensus::StrongDisagreement
    );
    assert_eq!(
        result.analysis.evidence_strength,
        EvidenceStrength::Conflicting
    );
    assert_eq!(result.analysis.contradictions.len(), 1);
    assert_eq!(result.analysis.recommended_verdict, Verdict::Mixed);

    let summary = summary::generate(&result);
    assert!(summary
        .key_findings
        .iter()
        .any(|f| f.contains("politifact") && f.contains("snopes")));
}

#[test]
fn test_unheard_claim_degrades_but_completes() {
    let evidence = EvidenceCollection::new("claim nobody has checked");

    let result = engine()
        .verify(0.5, &subscores(0.5, 0.5, 0.5), &evidence)
        .expect("empty evidence must not fail");

    assert_eq!(
        result.analysis.evidence_strength,
        EvidenceStrength::Insufficient
    );
    assert!(result
        .analysis
        .uncertainty_factors
        .iter()
        .any(|f| f.contains("no evidence")));

    let summary = summary::generate(&result);
    assert!(summary.limitations.iter().any(|f| f.contains("no evidence")));
}

#[test]
fn test_result_serializes_to_wire_shape() {
    let mut evidence = EvidenceCollection::new("claim");
    evidence.add(evidence_item(
        "politifact",
        SourceType::FactCheck,
        Some("True"),
        0.9,
        0.9,
    ));

    let result = engine()
        .verify(0.7, &subscores(0.8, 0.6, 0.7), &evidence)
        .expect("valid inputs");
    let json = serde_json::to_value(&result).expect("serializes");

    assert!(json["factly_score"].is_u64());
    assert!(json["classification"].is_string());
    assert!(json["confidence_level"].is_string());
    let component = &json["components"][0];
    assert!(component["name"].is_string());
    assert!(component["score"].is_number());
    assert!(component["weight"].is_number());
    assert!(component["weighted_score"].is_number());
}
