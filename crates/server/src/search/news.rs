use chrono::DateTime;
use serde::Deserialize;

use factly_common::config::{CredibilityConfig, ProviderConfig};
use factly_common::types::{EvidenceItem, SourceType, Verdict};
use factly_common::{FactlyError, Result};

use crate::relevance;

pub const PROVIDER_NAME: &str = "news";

/// Client for a NewsAPI-compatible article search endpoint. News
/// articles carry no verdict; they contribute coverage and source
/// credibility, normalized as `Unverified`.
pub struct NewsClient {
    http: reqwest::Client,
    config: ProviderConfig,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ArticleSearchResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    source: Option<ArticleSource>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    #[serde(default)]
    name: Option<String>,
}

impl NewsClient {
    pub fn new(http: reqwest::Client, config: ProviderConfig, api_key: String) -> Self {
        Self {
            http,
            config,
            api_key,
        }
    }

    pub async fn search(
        &self,
        claim: &str,
        credibility: &CredibilityConfig,
    ) -> Result<Vec<EvidenceItem>> {
        let url = format!("{}/v2/everything", self.config.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", claim),
                ("pageSize", &self.config.max_results.to_string()),
            ])
            .header("X-Api-Key", &self.api_key)
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

        let body: ArticleSearchResponse =
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

fn map_response(
    claim: &str,
    body: ArticleSearchResponse,
    credibility: &CredibilityConfig,
    max_results: usize,
) -> Vec<EvidenceItem> {
    body.articles
        .into_iter()
        .take(max_results)
        .map(|article| {
            let source_name = article
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| PROVIDER_NAME.to_string());
            // Credibility is keyed by article domain, not the
            // publisher's display name.
            let source_credibility = article
                .url
                .as_deref()
                .map(|u| credibility.rating_for(&extract_domain(u)))
                .unwrap_or(credibility.default);
            let relevance_score = article
                .title
                .as_deref()
                .map(|t| relevance::score(claim, t))
                .unwrap_or(0.0);

            EvidenceItem {
                source_name,
                source_type: SourceType::News,
                raw_verdict: None,
                normalized_verdict: Verdict::Unverified,
                relevance_score,
                source_credibility,
                published_at: article
                    .published_at
                    .as_deref()
                    .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                    .map(|d| d.to_utc()),
                url: article.url,
            }
        })
        .collect()
}

fn extract_domain(url: &str) -> String {
    url.split("//")
        .nth(1)
        .unwrap_or(url)
        .split('/')
        .next()
        .unwrap_or("unknown")
        .trim_start_matches("www.")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn credibility() -> CredibilityConfig {
        CredibilityConfig {
            default: 0.5,
            domains: BTreeMap::from([("reuters.com".to_string(), 0.95)]),
        }
    }

    #[test]
    fn test_map_articles_to_unverified_items() {
        let body: ArticleSearchResponse = serde_json::from_value(serde_json::json!({
            "articles": [{
                "source": {"name": "Reuters"},
                "title": "Scientists confirm moon composition findings",
                "url": "https://www.reuters.com/science/moon",
                "publishedAt": "2024-05-01T12:00:00Z"
            }]
        }))
        .unwrap();

        let items = map_response("moon composition findings", body, &credibility(), 10);
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.source_name, "Reuters");
        assert_eq!(item.source_type, SourceType::News);
        assert_eq!(item.normalized_verdict, Verdict::Unverified);
        assert!(item.raw_verdict.is_none());
        assert!((item.source_credibility - 0.95).abs() < 1e-9);
        assert!(item.relevance_score > 0.3);
    }

    #[test]
    fn test_extract_domain_strips_www_and_path() {
        assert_eq!(extract_domain("https://www.reuters.com/a/b"), "reuters.com");
        assert_eq!(extract_domain("http://apnews.com"), "apnews.com");
    }

    #[test]
    fn test_article_without_url_gets_default_credibility() {
        let body: ArticleSearchResponse = serde_json::from_value(serde_json::json!({
            "articles": [{"title": "some headline"}]
        }))
        .unwrap();
        let items = map_response("claim", body, &credibility(), 10);
        assert!((items[0].source_credibility - 0.5).abs() < 1e-9);
    }
}
