use serde::{Deserialize, Serialize};

use crate::ids::RequestId;
use crate::types::VerificationResult;

/// POST /api/verify request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// Claim text to verify (headline, article excerpt, or extracted
    /// claim).
    pub claim: String,
    /// Confidence of the external claim-extraction step, 0.0–1.0.
    /// Defaults to 0.5 when the caller has no extraction signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nlp_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// POST /api/verify response. The `result` field is the core's
/// `VerificationResult` passed straight through.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub request_id: RequestId,
    pub claim: String,
    pub result: VerificationResult,
    pub summary: VerificationSummary,
    /// Whether the evidence search was served from cache.
    #[serde(default)]
    pub cached: bool,
    pub elapsed_ms: u64,
}

/// Human-readable explanation of a verification result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub headline: String,
    #[serde(default)]
    pub key_findings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Limitations of the verification, from the analyzer's
    /// uncertainty factors.
    #[serde(default)]
    pub limitations: Vec<String>,
}
