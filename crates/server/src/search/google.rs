use chrono::DateTime;
use serde::Deserialize;

use factly_common::config::{CredibilityConfig, ProviderConfig};
use factly_common::types::{EvidenceItem, SourceType};
use factly_common::{FactlyError, Result};

use crate::relevance;

pub const PROVIDER_NAME: &str = "google_fact_check";

/// Client for the Google Fact Check Tools claim search API.
pub struct GoogleFactCheckClient {
    http: reqwest::Client,
    config: ProviderConfig,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ClaimSearchResponse {
    #[serde(default)]
    claims: Vec<ClaimEntry>,
}

#[derive(Debug, Deserialize)]
struct ClaimEntry {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "claimReview")]
    claim_review: Vec<ClaimReview>,
}

#[derive(Debug, Deserialize)]
struct ClaimReview {
    #[serde(default)]
    publisher: Option<Publisher>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "reviewDate")]
    review_date: Option<String>,
    #[serde(default, rename = "textualRating")]
    textual_rating: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Publisher {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    site: Option<String>,
}

impl GoogleFactCheckClient {
    pub fn new(http: reqwest::Client, config: ProviderConfig, api_key: String) -> Self {
        Self {
            http,
            config,
            api_key,
        }
    }

    /// Query fact-check reviews for a claim and map them to evidence
    /// items.
    pub async fn search(
        &self,
        claim: &str,
        credibility: &CredibilityConfig,
    ) -> Result<Vec<EvidenceItem>> {
        let url = format!("{}/v1alpha1/claims:search", self.config.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("query", claim), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FactlyError::Provider {
                provider: PROVIDER_NAME.into(),
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FactlyError::Provider {
                provider: PROVIDER_NAME.into(),
                detail: format!("HTTP {}", response.status()),
            });
        }

        let body: ClaimSearchResponse =
            response.json().await.map_err(|e| FactlyError::Provider {
                provider: PROVIDER_NAME.into(),
                detail: format!("malformed response: {}", e),
            })?;

        Ok(map_response(
            claim,
            body,
            credibility,
            self.config.max_results,
        ))
    }
}

/// Map the provider response into evidence items. Pure so the mapping
/// is testable without the network.
fn map_response(
    claim: &str,
    body: ClaimSearchResponse,
    credibility: &CredibilityConfig,
    max_results: usize,
) -> Vec<EvidenceItem> {
    let mut items = Vec::new();

    for entry in body.claims {
        let matched_text = entry.text.as_deref().unwrap_or(claim);
        for review in entry.claim_review {
            if items.len() >= max_results {
                return items;
            }

            let publisher = review.publisher.as_ref();
            let source_name = publisher
                .and_then(|p| p.name.clone())
                .or_else(|| publisher.and_then(|p| p.site.clone()))
                .unwrap_or_else(|| PROVIDER_NAME.to_string());
            let source_credibility = publisher
                .and_then(|p| p.site.as_deref())
                .map(|site| credibility.rating_for(site))
                .unwrap_or(credibility.default);

            // Relevance against the reviewed claim text when present,
            // falling back to the review title.
            let reference = review.title.as_deref().unwrap_or(matched_text);
            let relevance_score = relevance::score(claim, matched_text)
                .max(relevance::score(claim, reference));

            let raw_verdict = review.textual_rating.clone();
            items.push(EvidenceItem {
                source_name,
                source_type: SourceType::FactCheck,
                normalized_verdict: factly_core::verdict::normalize_opt(raw_verdict.as_deref()),
                raw_verdict,
                relevance_score,
                source_credibility,
                published_at: review
                    .review_date
                    .as_deref()
                    .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                    .map(|d| d.to_utc()),
                url: review.url,
            });
        }
    }

    items
}
