use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of external source an evidence item came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    FactCheck,
    News,
    PrimaryDatabase,
    Academic,
    Institutional,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FactCheck => "fact_check",
            Self::News => "news",
            Self::PrimaryDatabase => "primary_database",
            Self::Academic => "academic",
            Self::Institutional => "institutional",
        }
    }
}

/// Normalized verdict vocabulary. Every free-text label a provider
/// returns maps into exactly one of these; unrecognized labels map to
/// `Unverified`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    True,
    False,
    Mixed,
    Unverified,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::Mixed => "mixed",
            Self::Unverified => "unverified",
        }
    }

    /// Whether this verdict takes part in agreement comparisons.
    /// `Unverified` items carry no position and are never compared.
    pub fn is_comparable(&self) -> bool {
        !matches!(self, Self::Unverified)
    }
}

/// One piece of verification evidence from one source: a fact-check
/// verdict or a news article reference.
///
/// Immutable after creation; owned by the `EvidenceCollection` that
/// contains it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Identifier of the originating API/organization.
    pub source_name: String,
    pub source_type: SourceType,
    /// Original free-text label from the source (e.g. "Mostly True",
    /// "Pants on Fire"). Absent for plain news references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_verdict: Option<String>,
    /// Always present, even when `raw_verdict` is absent or unrecognized
    /// (defaults to `Unverified`).
    pub normalized_verdict: Verdict,
    /// How well this item matches the claim, 0.0–1.0.
    pub relevance_score: f64,
    /// Static or lookup-derived reliability rating of the source, 0.0–1.0.
    pub source_credibility: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl EvidenceItem {
    /// Check that scores are inside [0, 1]. An out-of-range value
    /// signals an upstream bug and is rejected, never clamped.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.relevance_score) {
            return Err(format!(
                "evidence item from '{}' has relevance_score {} outside [0, 1]",
                self.source_name, self.relevance_score
            ));
        }
        if !(0.0..=1.0).contains(&self.source_credibility) {
            return Err(format!(
                "evidence item from '{}' has source_credibility {} outside [0, 1]",
                self.source_name, self.source_credibility
            ));
        }
        Ok(())
    }
}

/// Evidence gathered for one claim across all sources.
///
/// Pure data holder. The items list may be empty (no evidence found);
/// every downstream consumer handles the empty case without failing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvidenceCollection {
    /// The claim being checked.
    pub claim_text: String,
    /// Insertion order = discovery order across sources; not
    /// semantically significant.
    pub items: Vec<EvidenceItem>,
}

impl EvidenceCollection {
    pub fn new(claim_text: impl Into<String>) -> Self {
        Self {
            claim_text: claim_text.into(),
            items: Vec::new(),
        }
    }

    /// Append an item. No deduplication: near-identical items from
    /// different providers are kept because they count toward
    /// consensus weight.
    pub fn add(&mut self, item: EvidenceItem) {
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Count of distinct source types present.
    pub fn source_diversity(&self) -> usize {
        self.items
            .iter()
            .map(|i| i.source_type)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Expected source types with no evidence present. Feeds the
    /// analyzer's uncertainty factors; never blocks scoring.
    pub fn coverage_gaps(&self, expected: &[SourceType]) -> BTreeSet<SourceType> {
        let present: BTreeSet<SourceType> =
            self.items.iter().map(|i| i.source_type).collect();
        expected
            .iter()
            .copied()
            .filter(|t| !present.contains(t))
            .collect()
    }
}
