use serde::{Deserialize, Serialize};

use super::analysis::CrossSourceAnalysis;

/// Score-band classification of a claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    LikelyFake,
    Uncertain,
    LikelyAuthentic,
}

impl Classification {
    /// Fixed thresholds: 0–30 fake, 31–60 uncertain, 61–100 authentic.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=30 => Self::LikelyFake,
            31..=60 => Self::Uncertain,
            _ => Self::LikelyAuthentic,
        }
    }
}

/// Confidence label derived from mean component confidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    MediumLow,
    Medium,
    MediumHigh,
    High,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::High
        } else if confidence >= 0.6 {
            Self::MediumHigh
        } else if confidence >= 0.4 {
            Self::Medium
        } else if confidence >= 0.2 {
            Self::MediumLow
        } else {
            Self::Low
        }
    }
}

/// One weighted input to the composite score, kept for explainability.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: String,
    /// Raw component score, 0.0–1.0. Serialized as `score` for the
    /// surrounding HTTP API.
    #[serde(rename = "score")]
    pub raw_score: f64,
    pub weight: f64,
    pub weighted_score: f64,
}

impl ScoreComponent {
    pub fn new(name: impl Into<String>, raw_score: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            raw_score,
            weight,
            weighted_score: raw_score * weight,
        }
    }
}

/// Final output of one verification request. Immutable; not persisted
/// by the core.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Composite credibility score, 0–100.
    pub factly_score: u8,
    /// Derived purely from `factly_score` via fixed thresholds.
    pub classification: Classification,
    pub confidence_level: ConfidenceLevel,
    /// Ordered by configured weight descending for consistent display.
    pub components: Vec<ScoreComponent>,
    pub analysis: CrossSourceAnalysis,
}
