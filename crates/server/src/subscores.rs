use std::collections::BTreeMap;

use factly_common::types::{EvidenceCollection, SourceType, Verdict};

/// Derive the per-source sub-scores the scoring engine consumes from
/// the gathered evidence and the claim text itself. Names must match
/// the configured weight table components.
pub fn derive(claim: &str, evidence: &EvidenceCollection) -> BTreeMap<String, f64> {
    BTreeMap::from([
        (
            "google_fact_check".to_string(),
            fact_check_consensus(evidence),
        ),
        ("news_coverage".to_string(), news_coverage(evidence)),
        ("linguistic_bias".to_string(), linguistic_quality(claim)),
    ])
}

/// Weighted mean verdict score over fact-check items, scaled up as
/// more reviews corroborate it (full weight at 5+ reviews). Neutral
/// 0.5 when no fact-checks were found.
fn fact_check_consensus(evidence: &EvidenceCollection) -> f64 {
    let mut weighted_sum = 0.0_f64;
    let mut total_weight = 0.0_f64;
    let mut count = 0_usize;

    for item in &evidence.items {
        if item.source_type != SourceType::FactCheck {
            continue;
        }
        count += 1;
        let value = match item.normalized_verdict {
            Verdict::True => 1.0,
            Verdict::Mixed => 0.5,
            Verdict::False => 0.0,
            Verdict::Unverified => continue,
        };
        let weight = item.source_credibility * item.relevance_score;
        weighted_sum += value * weight;
        total_weight += weight;
    }

    if count == 0 || total_weight <= 0.0 {
        return 0.5;
    }

    let score = weighted_sum / total_weight;
    let count_factor = (count as f64 / 5.0).min(1.0);
    (score * (0.7 + 0.3 * count_factor)).clamp(0.0, 1.0)
}

/// Coverage from news sources: blend of how many relevant articles
/// exist (full weight at 5+) and how credible their outlets are. Low
/// 0.3 floor when nothing was found, matching the thin-evidence
/// penalty elsewhere.
fn news_coverage(evidence: &EvidenceCollection) -> f64 {
    let news: Vec<_> = evidence
        .items
        .iter()
        .filter(|i| i.source_type == SourceType::News)
        .collect();

    if news.is_empty() {
        return 0.3;
    }

    let count_factor = (news.len() as f64 / 5.0).min(1.0);
    let avg_credibility =
        news.iter().map(|i| i.source_credibility).sum::<f64>() / news.len() as f64;

    (0.6 * avg_credibility + 0.4 * count_factor).clamp(0.0, 1.0)
}

const SENSATIONAL_MARKERS: &[&str] = &[
    "shocking",
    "outrageous",
    "unbelievable",
    "scandalous",
    "devastating",
    "terrifying",
    "mind-blowing",
    "you won't believe",
    "this changes everything",
    "doctors hate this",
    "they don't want you to know",
    "wake up",
];

const BIAS_MARKERS: &[&str] = &[
    "conspiracy",
    "hoax",
    "fake news",
    "propaganda",
    "mainstream media",
    "deep state",
    "false flag",
    "crisis actor",
];

/// Linguistic quality of the claim text itself: sensationalism and
/// loaded-language markers lower the score. A neutrally worded claim
/// scores 1.0.
fn linguistic_quality(claim: &str) -> f64 {
    let lower = claim.to_lowercase();
    let mut markers = 0_usize;

    for phrase in SENSATIONAL_MARKERS.iter().chain(BIAS_MARKERS) {
        if lower.contains(phrase) {
            markers += 1;
        }
    }

    if claim.matches('!').count() > 2 {
        markers += 1;
    }

    let caps_words = claim
        .split_whitespace()
        .filter(|w| w.len() > 2 && w.chars().all(|c| c.is_uppercase()))
        .count();
    if caps_words > 2 {
        markers += 1;
    }

    (1.0 - markers as f64 / 5.0).clamp(0.0, 1.0)
}
