use std::collections::HashMap;
use std::time::Duration;

use factly_common::config::{CredibilityConfig, EvidenceConfig};
use factly_common::types::{EvidenceCollection, EvidenceItem};
use factly_common::{FactlyError, Result};

use crate::rate_limit::ProviderRateLimiter;

pub mod google;
pub mod news;

use google::GoogleFactCheckClient;
use news::NewsClient;

/// Multi-source evidence search: fans out to every enabled provider
/// concurrently, each with an independent timeout. A provider failure
/// or timeout is logged and skipped; whatever evidence arrived is
/// scored. A provider is enabled only when configured on and its API
/// key is present.
pub struct EvidenceSearch {
    google: Option<GoogleFactCheckClient>,
    news: Option<NewsClient>,
    limiter: ProviderRateLimiter,
    credibility: CredibilityConfig,
    google_timeout: Duration,
    news_timeout: Duration,
}

impl EvidenceSearch {
    pub fn new(
        http: reqwest::Client,
        evidence: EvidenceConfig,
        credibility: CredibilityConfig,
    ) -> Self {
        let google_config = evidence.providers.google_fact_check;
        let news_config = evidence.providers.news;

        let rates = HashMap::from([
            (
                google::PROVIDER_NAME.to_string(),
                google_config.rate_per_second,
            ),
            (news::PROVIDER_NAME.to_string(), news_config.rate_per_second),
        ]);
        let limiter = ProviderRateLimiter::new(rates, 1.0);

        let google_timeout = Duration::from_millis(google_config.timeout_ms);
        let news_timeout = Duration::from_millis(news_config.timeout_ms);

        let google = if google_config.enabled {
            match std::env::var("GOOGLE_FACT_CHECK_API_KEY") {
                Ok(key) => Some(GoogleFactCheckClient::new(http.clone(), google_config, key)),
                Err(_) => {
                    tracing::warn!("GOOGLE_FACT_CHECK_API_KEY not set, provider disabled");
                    None
                }
            }
        } else {
            None
        };

        let news = if news_config.enabled {
            match std::env::var("NEWS_API_KEY") {
                Ok(key) => Some(NewsClient::new(http, news_config, key)),
                Err(_) => {
                    tracing::warn!("NEWS_API_KEY not set, provider disabled");
                    None
                }
            }
        } else {
            None
        };

        tracing::info!(
            google = google.is_some(),
            news = news.is_some(),
            "Evidence search initialized"
        );

        Self {
            google,
            news,
            limiter,
            credibility,
            google_timeout,
            news_timeout,
        }
    }

    /// Gather evidence for one claim across all enabled providers.
    /// Never fails: the worst case is an empty collection, which the
    /// core degrades on gracefully.
    pub async fn search(&self, claim: &str) -> EvidenceCollection {
        let start = std::time::Instant::now();

        let (google_items, news_items) = tokio::join!(
            self.run_provider(google::PROVIDER_NAME, self.google_timeout, async {
                match &self.google {
                    Some(client) => client.search(claim, &self.credibility).await,
                    None => Ok(Vec::new()),
                }
            }),
            self.run_provider(news::PROVIDER_NAME, self.news_timeout, async {
                match &self.news {
                    Some(client) => client.search(claim, &self.credibility).await,
                    None => Ok(Vec::new()),
                }
            }),
        );

        // Fixed merge order keeps the collection deterministic for a
        // given set of provider responses.
        let mut collection = EvidenceCollection::new(claim);
        for item in google_items.into_iter().chain(news_items) {
            collection.add(item);
        }

        metrics::histogram!("search.total_latency").record(start.elapsed().as_secs_f64());
        tracing::info!(
            claim = %claim,
            items = collection.len(),
            diversity = collection.source_diversity(),
            "Evidence search complete"
        );

        collection
    }

    /// Run one provider under the rate limiter and its own timeout.
    /// All failure modes collapse to an empty item list.
    async fn run_provider<F>(
        &self,
        provider: &str,
        timeout: Duration,
        search: F,
    ) -> Vec<EvidenceItem>
    where
        F: std::future::Future<Output = Result<Vec<EvidenceItem>>>,
    {
        if let Err(e) = self.limiter.acquire(provider, timeout).await {
            tracing::warn!(provider = %provider, error = %e, "Provider rate limited, skipping");
            return Vec::new();
        }

        let start = std::time::Instant::now();
        let outcome = tokio::time::timeout(timeout, search)
            .await
            .map_err(|_| FactlyError::Timeout(format!("provider {} timed out", provider)));

        metrics::histogram!("search.provider.latency", "provider" => provider.to_string())
            .record(start.elapsed().as_secs_f64());

        match outcome {
            Ok(Ok(items)) => {
                tracing::debug!(provider = %provider, items = items.len(), "Provider returned");
                items
            }
            Ok(Err(e)) | Err(e) => {
                metrics::counter!("search.provider.errors", "provider" => provider.to_string())
                    .increment(1);
                tracing::warn!(provider = %provider, error = %e, "Provider failed, continuing without it");
                Vec::new()
            }
        }
    }
}
