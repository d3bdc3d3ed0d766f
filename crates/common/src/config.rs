use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::SourceType;

/// Top-level system configuration, deserialized from factly.toml.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FactlyConfig {
    pub scoring: ScoringConfig,
    pub evidence: EvidenceConfig,
    pub credibility: CredibilityConfig,
    pub cache: CacheConfig,
}

/// Which weight table the scoring engine runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    Baseline,
    /// Adds a cross_source_analysis component on top of the baseline
    /// inputs.
    Enhanced,
}

/// Scoring engine configuration. The weight tables are versioned
/// constants shipped in the config file, not user-configurable at
/// request time; each active table must sum to 1.0 within 1e-6 or the
/// process refuses to start.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub mode: ScoringMode,
    pub weights: WeightTables,
}

/// Component weight tables keyed by component name. The names
/// `nlp_confidence` and `cross_source_analysis` are resolved internally
/// by the engine; every other name must arrive as a per-source
/// sub-score.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeightTables {
    pub baseline: BTreeMap<String, f64>,
    pub enhanced: BTreeMap<String, f64>,
}

impl ScoringConfig {
    /// The weight table selected by `mode`.
    pub fn active_weights(&self) -> &BTreeMap<String, f64> {
        match self.mode {
            ScoringMode::Baseline => &self.weights.baseline,
            ScoringMode::Enhanced => &self.weights.enhanced,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let baseline = BTreeMap::from([
            ("nlp_confidence".to_string(), 0.40),
            ("google_fact_check".to_string(), 0.35),
            ("news_coverage".to_string(), 0.15),
            ("linguistic_bias".to_string(), 0.10),
        ]);
        let enhanced = BTreeMap::from([
            ("nlp_confidence".to_string(), 0.30),
            ("google_fact_check".to_string(), 0.25),
            ("news_coverage".to_string(), 0.10),
            ("linguistic_bias".to_string(), 0.05),
            ("cross_source_analysis".to_string(), 0.30),
        ]);
        Self {
            mode: ScoringMode::Baseline,
            weights: WeightTables { baseline, enhanced },
        }
    }
}

/// Evidence search configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvidenceConfig {
    /// Source types a well-covered search is expected to produce.
    /// Missing ones become coverage gaps (uncertainty factors only;
    /// they never block scoring).
    pub expected_source_types: Vec<SourceType>,
    pub providers: ProvidersConfig,
}

/// Per-provider settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub google_fact_check: ProviderConfig,
    pub news: ProviderConfig,
}

/// Settings for one external verification API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub enabled: bool,
    pub base_url: String,
    /// Independent timeout per provider; a slow provider never blocks
    /// the rest of the fan-out.
    pub timeout_ms: u64,
    /// Token bucket refill rate, requests per second.
    pub rate_per_second: f64,
    /// Max results taken from this provider per search.
    pub max_results: usize,
}

/// Source credibility lookup keyed by domain/organization name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CredibilityConfig {
    /// Rating applied when a source is not in the table.
    pub default: f64,
    pub domains: BTreeMap<String, f64>,
}

impl CredibilityConfig {
    /// Look up a source's rating by domain, falling back to the
    /// configured default.
    pub fn rating_for(&self, domain: &str) -> f64 {
        let key = domain.trim().to_lowercase();
        self.domains.get(&key).copied().unwrap_or(self.default)
    }
}

/// Search result cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whole-search cache TTL in seconds.
    pub search_ttl_seconds: u64,
}
