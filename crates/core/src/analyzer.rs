use factly_common::types::{
    Consensus, Contradiction, CrossSourceAnalysis, EvidenceCollection, EvidenceItem,
    EvidenceStrength, SourceType, Verdict,
};

use crate::verdict;

/// Credibility threshold for a source to count toward the conflicting
/// evidence-strength signal.
const CREDIBLE_CONFLICT_THRESHOLD: f64 = 0.6;
/// Credibility floor for a pair to be recorded in the contradictions
/// list.
const CONTRADICTION_CREDIBILITY_FLOOR: f64 = 0.5;

/// Turns an `EvidenceCollection` into a `CrossSourceAnalysis`.
///
/// Never fails: missing or empty evidence degrades to
/// `EvidenceStrength::Insufficient` with an uncertainty factor, so the
/// scoring engine can discount it.
pub struct CrossSourceAnalyzer {
    expected_source_types: Vec<SourceType>,
}

impl CrossSourceAnalyzer {
    pub fn new(expected_source_types: Vec<SourceType>) -> Self {
        Self {
            expected_source_types,
        }
    }

    pub fn analyze(&self, collection: &EvidenceCollection) -> CrossSourceAnalysis {
        tracing::debug!(
            items = collection.len(),
            claim = %collection.claim_text,
            "Running cross-source analysis"
        );

        // Re-derive normalized verdicts from the raw labels. Items
        // whose raw label is absent keep whatever verdict they carry,
        // so the step is idempotent.
        let verdicts: Vec<Verdict> = collection
            .items
            .iter()
            .map(|item| match item.raw_verdict.as_deref() {
                Some(raw) => verdict::normalize(raw),
                None => item.normalized_verdict,
            })
            .collect();

        let (agreement_score, comparable_pairs) =
            weighted_agreement(&collection.items, &verdicts);
        let consensus_level = Consensus::from_agreement_score(agreement_score);

        let (contradictions, credible_conflict) =
            find_contradictions(&collection.items, &verdicts);

        let evidence_strength = evidence_strength(
            collection,
            agreement_score,
            credible_conflict,
        );

        let recommended_verdict = recommended_verdict(&collection.items, &verdicts);

        let uncertainty_factors = self.uncertainty_factors(
            collection,
            comparable_pairs,
            &contradictions,
        );

        CrossSourceAnalysis {
            consensus_level,
            agreement_score,
            evidence_strength,
            contradictions,
            recommended_verdict,
            uncertainty_factors,
        }
    }

    fn uncertainty_factors(
        &self,
        collection: &EvidenceCollection,
        comparable_pairs: usize,
        contradictions: &[Contradiction],
    ) -> Vec<String> {
        let mut factors = Vec::new();

        if collection.is_empty() {
            factors.push("no evidence found for this claim".to_string());
        } else {
            let diversity = collection.source_diversity();
            if diversity < 2 {
                factors.push(format!(
                    "low source diversity ({} source type)",
                    diversity
                ));
            }
            if comparable_pairs == 0 {
                factors.push(
                    "fewer than two sources provided a definite verdict".to_string(),
                );
            }
        }

        for gap in collection.coverage_gaps(&self.expected_source_types) {
            factors.push(format!("no {} sources found", gap.as_str()));
        }

        if !contradictions.is_empty() {
            factors.push(format!(
                "{} contradiction(s) detected between credible sources",
                contradictions.len()
            ));
        }

        factors
    }
}

/// Credibility-weighted pairwise agreement across comparable verdicts.
///
/// Matching pairs add `min(cred_a, cred_b)` to the agreement
/// accumulator, conflicting pairs add it to the disagreement
/// accumulator. Returns the ratio and the number of comparable pairs;
/// with no comparable pairs the score defaults to 1.0, which the
/// caller must flag rather than read as strong agreement.
fn weighted_agreement(items: &[EvidenceItem], verdicts: &[Verdict]) -> (f64, usize) {
    let mut agreement = 0.0_f64;
    let mut disagreement = 0.0_f64;
    let mut pairs = 0_usize;

    for i in 0..items.len() {
        if !verdicts[i].is_comparable() {
            continue;
        }
        for j in (i + 1)..items.len() {
            if !verdicts[j].is_comparable() {
                continue;
            }
            pairs += 1;
            let weight = items[i].source_credibility.min(items[j].source_credibility);
            if verdicts[i] == verdicts[j] {
                agreement += weight;
            } else {
                disagreement += weight;
            }
        }
    }

    let total = agreement + disagreement;
    if total <= 0.0 {
        (1.0, pairs)
    } else {
        (agreement / total, pairs)
    }
}

/// Every pair of definite, differing verdicts where both sources are
/// at least moderately credible. Also reports whether any such pair
/// involves two credible (>= 0.6) sources, which drives the
/// conflicting evidence-strength signal.
fn find_contradictions(
    items: &[EvidenceItem],
    verdicts: &[Verdict],
) -> (Vec<Contradiction>, bool) {
    let mut contradictions = Vec::new();
    let mut credible_conflict = false;

    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if !verdicts[i].is_comparable() || !verdicts[j].is_comparable() {
                continue;
            }
            if verdicts[i] == verdicts[j] {
                continue;
            }
            let cred_i = items[i].source_credibility;
            let cred_j = items[j].source_credibility;
            if cred_i >= CREDIBLE_CONFLICT_THRESHOLD && cred_j >= CREDIBLE_CONFLICT_THRESHOLD {
                credible_conflict = true;
            }
            if cred_i >= CONTRADICTION_CREDIBILITY_FLOOR
                && cred_j >= CONTRADICTION_CREDIBILITY_FLOOR
            {
                contradictions.push(Contradiction {
                    source_a: items[i].source_name.clone(),
                    verdict_a: verdicts[i],
                    source_b: items[j].source_name.clone(),
                    verdict_b: verdicts[j],
                    description: format!(
                        "{} rates the claim '{}' while {} rates it '{}'",
                        items[i].source_name,
                        verdicts[i].as_str(),
                        items[j].source_name,
                        verdicts[j].as_str(),
                    ),
                });
            }
        }
    }

    (contradictions, credible_conflict)
}

fn evidence_strength(
    collection: &EvidenceCollection,
    agreement_score: f64,
    credible_conflict: bool,
) -> EvidenceStrength {
    if collection.is_empty() {
        EvidenceStrength::Insufficient
    } else if credible_conflict {
        EvidenceStrength::Conflicting
    } else if collection.len() >= 3
        && collection.source_diversity() >= 2
        && agreement_score >= 0.6
    {
        EvidenceStrength::Strong
    } else if collection.len() >= 2 {
        EvidenceStrength::Moderate
    } else {
        EvidenceStrength::Weak
    }
}

/// The verdict with the highest sum of `credibility * relevance`
/// across its holders. Ties resolve to `Mixed`: the analyzer never
/// asserts true or false on a tie.
fn recommended_verdict(items: &[EvidenceItem], verdicts: &[Verdict]) -> Verdict {
    if items.is_empty() {
        return Verdict::Unverified;
    }

    let candidates = [
        Verdict::True,
        Verdict::False,
        Verdict::Mixed,
        Verdict::Unverified,
    ];
    let mut weights = [0.0_f64; 4];
    for (item, verdict) in items.iter().zip(verdicts) {
        let idx = candidates.iter().position(|v| v == verdict).unwrap_or(3);
        weights[idx] += item.source_credibility * item.relevance_score;
    }

    let max = weights.iter().cloned().fold(f64::MIN, f64::max);
    let tied: Vec<Verdict> = candidates
        .iter()
        .zip(&weights)
        .filter(|(_, w)| (**w - max).abs() < 1e-9)
        .map(|(v, _)| *v)
        .collect();

    if tied.len() == 1 {
        tied[0]
    } else {
        Verdict::Mixed
    }
}

/// Credibility-and-relevance-weighted verdict score across comparable
/// items: true counts 1.0, mixed 0.5, false 0.0. Used as the raw score
/// of the enhanced mode's cross_source_analysis component. Defaults to
/// a neutral 0.5 when no item carries a definite verdict.
pub fn verdict_weighted_score(collection: &EvidenceCollection) -> f64 {
    let mut weighted_sum = 0.0_f64;
    let mut total_weight = 0.0_f64;

    for item in &collection.items {
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

    if total_weight <= 0.0 {
        0.5
    } else {
        weighted_sum / total_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> CrossSourceAnalyzer {
        CrossSourceAnalyzer::new(vec![SourceType::FactCheck, SourceType::News])
    }

    fn item(name: &str, raw: Option<&str>, credibility: f64) -> EvidenceItem {
        let normalized = verdict::normalize_opt(raw);
        EvidenceItem {
            source_name: name.into(),
            source_type: SourceType::FactCheck,
            raw_verdict: raw.map(String::from),
            normalized_verdict: normalized,
            relevance_score: 0.9,
            source_credibility: credibility,
            published_at: None,
            url: None,
        }
    }

    fn collect(items: Vec<EvidenceItem>) -> EvidenceCollection {
        let mut collection = EvidenceCollection::new("test claim");
        for i in items {
            collection.add(i);
        }
        collection
    }

    #[test]
    fn test_two_agreeing_sources_strong_agreement() {
        // Both true, credibilities 0.9 and 0.8: one matching pair.
        let collection = collect(vec![
            item("politifact", Some("true"), 0.9),
            item("snopes", Some("true"), 0.8),
        ]);
        let analysis = analyzer().analyze(&collection);
        assert!((analysis.agreement_score - 1.0).abs() < 1e-12);
        assert_eq!(analysis.consensus_level, Consensus::StrongAgreement);
        assert!(analysis.contradictions.is_empty());
        assert_eq!(analysis.recommended_verdict, Verdict::True);
    }

    #[test]
    fn test_direct_conflict_strong_disagreement() {
        let collection = collect(vec![
            item("politifact", Some("true"), 0.9),
            item("snopes", Some("false"), 0.9),
        ]);
        let analysis = analyzer().analyze(&collection);
        assert!((analysis.agreement_score - 0.0).abs() < 1e-12);
        assert_eq!(analysis.consensus_level, Consensus::StrongDisagreement);
        assert_eq!(analysis.evidence_strength, EvidenceStrength::Conflicting);
        assert_eq!(analysis.contradictions.len(), 1);
        let c = &analysis.contradictions[0];
        assert_eq!(c.source_a, "politifact");
        assert_eq!(c.source_b, "snopes");
        assert!(c.description.contains("politifact"));
        assert!(c.description.contains("snopes"));
    }

    #[test]
    fn test_agreement_is_symmetric() {
        let a = item("a", Some("true"), 0.7);
        let b = item("b", Some("false"), 0.9);
        let forward = analyzer().analyze(&collect(vec![a.clone(), b.clone()]));
        let reverse = analyzer().analyze(&collect(vec![b, a]));
        assert_eq!(forward.agreement_score, reverse.agreement_score);
        assert_eq!(forward.consensus_level, reverse.consensus_level);
    }

    #[test]
    fn test_empty_collection_degrades_gracefully() {
        let collection = EvidenceCollection::new("unheard claim");
        let analysis = analyzer().analyze(&collection);
        assert_eq!(analysis.evidence_strength, EvidenceStrength::Insufficient);
        assert_eq!(analysis.recommended_verdict, Verdict::Unverified);
        assert!((analysis.agreement_score - 1.0).abs() < 1e-12);
        assert!(analysis
            .uncertainty_factors
            .iter()
            .any(|f| f.contains("no evidence")));
    }

    #[test]
    fn test_single_item_is_weak_not_strong() {
        // One source, defaulted agreement of 1.0: must not read as
        // corroboration.
        let collection = collect(vec![item("politifact", Some("true"), 0.9)]);
        let analysis = analyzer().analyze(&collection);
        assert_eq!(analysis.evidence_strength, EvidenceStrength::Weak);
        assert!(analysis
            .uncertainty_factors
            .iter()
            .any(|f| f.contains("definite verdict")));
    }

    #[test]
    fn test_unverified_items_are_not_compared() {
        let collection = collect(vec![
            item("politifact", Some("true"), 0.9),
            item("wire-service", None, 0.9),
        ]);
        let analysis = analyzer().analyze(&collection);
        // One comparable item, no pairs: defaulted agreement, no
        // contradiction against the verdict-less item.
        assert!((analysis.agreement_score - 1.0).abs() < 1e-12);
        assert!(analysis.contradictions.is_empty());
    }

    #[test]
    fn test_low_credibility_conflict_not_listed() {
        let collection = collect(vec![
            item("politifact", Some("true"), 0.9),
            item("some-blog", Some("false"), 0.3),
        ]);
        let analysis = analyzer().analyze(&collection);
        assert!(analysis.contradictions.is_empty());
        assert_ne!(analysis.evidence_strength, EvidenceStrength::Conflicting);
    }

    #[test]
    fn test_strong_evidence_needs_count_diversity_and_agreement() {
        let mut news = item("reuters", Some("true"), 0.95);
        news.source_type = SourceType::News;
        let collection = collect(vec![
            item("politifact", Some("true"), 0.9),
            item("snopes", Some("true"), 0.85),
            news,
        ]);
        let analysis = analyzer().analyze(&collection);
        assert_eq!(analysis.evidence_strength, EvidenceStrength::Strong);
    }

    #[test]
    fn test_tied_verdicts_recommend_mixed() {
        let collection = collect(vec![
            item("a", Some("true"), 0.8),
            item("b", Some("false"), 0.8),
        ]);
        let analysis = analyzer().analyze(&collection);
        assert_eq!(analysis.recommended_verdict, Verdict::Mixed);
    }

    #[test]
    fn test_recommended_verdict_weighted_by_credibility_and_relevance() {
        let mut weak = item("b", Some("false"), 0.4);
        weak.relevance_score = 0.5;
        let collection = collect(vec![item("a", Some("true"), 0.9), weak]);
        let analysis = analyzer().analyze(&collection);
        assert_eq!(analysis.recommended_verdict, Verdict::True);
    }

    #[test]
    fn test_normalization_inside_analyze_overrides_stale_verdict() {
        let mut stale = item("a", Some("Mostly True"), 0.9);
        stale.normalized_verdict = Verdict::Unverified; // stale; raw wins
        let collection = collect(vec![stale, item("b", Some("true"), 0.8)]);
        let analysis = analyzer().analyze(&collection);
        assert!((analysis.agreement_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_verdict_weighted_score() {
        let collection = collect(vec![
            item("a", Some("true"), 0.9),
            item("b", Some("false"), 0.9),
        ]);
        // Equal weights, one at 1.0 and one at 0.0.
        assert!((verdict_weighted_score(&collection) - 0.5).abs() < 1e-12);

        let empty = EvidenceCollection::new("claim");
        assert!((verdict_weighted_score(&empty) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_coverage_gap_reported_as_uncertainty() {
        let collection = collect(vec![item("politifact", Some("true"), 0.9)]);
        let analysis = analyzer().analyze(&collection);
        assert!(analysis
            .uncertainty_factors
            .iter()
            .any(|f| f.contains("no news sources")));
    }
}
