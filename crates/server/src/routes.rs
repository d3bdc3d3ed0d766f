use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use factly_common::api::verify::{VerifyRequest, VerifyResponse};
use factly_common::ids::RequestId;
use factly_common::FactlyError;
use factly_core::summary;

use crate::{subscores, AppState};

/// Default extraction confidence when the caller supplies none: the
/// claim is taken at face value, neither boosting nor penalizing.
const DEFAULT_NLP_CONFIDENCE: f64 = 0.5;

/// POST /api/verify: search evidence for a claim and score it.
pub async fn verify_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let request_id = RequestId::new();

    let claim = request.claim.trim();
    if claim.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "claim must not be empty".into()));
    }

    tracing::info!(request_id = %request_id, claim = %claim, "Verification request");

    // Evidence search, cache first. The search itself never fails;
    // a fully degraded search yields an empty collection.
    let (evidence, cached) = {
        let hit = {
            let cache = state.cache.read().await;
            cache.get(claim)
        };
        match hit {
            Some(collection) => (collection, true),
            None => {
                let collection = state.search.search(claim).await;
                let mut cache = state.cache.write().await;
                cache.insert(claim, collection.clone());
                (collection, false)
            }
        }
    };

    let nlp_confidence = request.nlp_confidence.unwrap_or(DEFAULT_NLP_CONFIDENCE);
    let per_source_subscores = subscores::derive(claim, &evidence);

    let result = state
        .engine
        .verify(nlp_confidence, &per_source_subscores, &evidence)
        .map_err(error_response)?;
    let summary = summary::generate(&result);

    let elapsed_ms = start.elapsed().as_millis() as u64;
    metrics::histogram!("verify.latency_ms").record(elapsed_ms as f64);
    tracing::info!(
        request_id = %request_id,
        factly_score = result.factly_score,
        classification = ?result.classification,
        cached,
        elapsed_ms,
        "Verification complete"
    );

    Ok(Json(VerifyResponse {
        request_id,
        claim: claim.to_string(),
        result,
        summary,
        cached,
        elapsed_ms,
    }))
}

/// Validation errors are the caller's to fix; configuration errors are
/// ours.
fn error_response(error: FactlyError) -> (StatusCode, String) {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, error.to_string())
}
