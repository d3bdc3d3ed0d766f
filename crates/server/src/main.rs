use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::sync::RwLock;

use factly_core::{CrossSourceAnalyzer, ScoringEngine};

mod cache;
mod config;
mod rate_limit;
mod relevance;
mod routes;
mod search;
mod subscores;

use cache::SearchCache;
use search::EvidenceSearch;

/// Shared application state.
pub struct AppState {
    pub engine: ScoringEngine,
    pub search: EvidenceSearch,
    pub cache: Arc<RwLock<SearchCache>>,
    pub metrics_handle: PrometheusHandle,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Factly server starting");

    // Load configuration. Fail loudly on misconfiguration: a broken
    // weight table must never score anything.
    let config_dir = std::env::var("FACTLY_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let factly_config = match config::load_config(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration, refusing to start");
            std::process::exit(1);
        }
    };

    // Install Prometheus metrics recorder.
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    let analyzer = CrossSourceAnalyzer::new(factly_config.evidence.expected_source_types.clone());
    let engine = match ScoringEngine::new(factly_config.scoring.clone(), analyzer) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, "Invalid scoring configuration, refusing to start");
            std::process::exit(1);
        }
    };

    let http = reqwest::Client::builder()
        .user_agent("Factly/0.1")
        .build()
        .expect("Failed to build HTTP client");

    let search = EvidenceSearch::new(
        http,
        factly_config.evidence.clone(),
        factly_config.credibility.clone(),
    );

    let cache = Arc::new(RwLock::new(SearchCache::new(Duration::from_secs(
        factly_config.cache.search_ttl_seconds,
    ))));

    let state = Arc::new(AppState {
        engine,
        search,
        cache,
        metrics_handle,
    });

    let app = Router::new()
        .route("/healthz", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/verify", post(routes::verify_handler))
        .with_state(state);

    let port: u16 = std::env::var("FACTLY_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind TCP listener");

    tracing::info!(port = port, "Factly server listening");

    axum::serve(listener, app).await.expect("HTTP server error");
}

async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "healthy" })),
    )
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}
