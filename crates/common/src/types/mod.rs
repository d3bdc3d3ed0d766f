mod analysis;
mod evidence;
mod score;

pub use analysis::{
    Consensus, Contradiction, CrossSourceAnalysis, EvidenceStrength,
};
pub use evidence::{EvidenceCollection, EvidenceItem, SourceType, Verdict};
pub use score::{
    Classification, ConfidenceLevel, ScoreComponent, VerificationResult,
};
