//! Amazon search adapter, backed by a SerpAPI-style search endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use shophound_core::config::{FetchConfig, SearchConfig};
use shophound_core::types::{ProviderOutcome, ProviderTag, UnifiedResult};

use super::{SearchProvider, http_client};
use crate::errors::ProviderError;

/// Amazon product search via a hosted search-scraping API.
///
/// The upstream already formats prices as display strings, so they are
/// passed through as-is rather than reformatted.
#[derive(Debug)]
pub struct AmazonProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

/// Response from the search endpoint.
#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<SerpItem>,
    #[serde(default)]
    serpapi_pagination: Option<SerpPagination>,
}

/// Single product item from the search endpoint.
#[derive(Debug, Deserialize)]
struct SerpItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    // Loosely typed: the upstream mixes strings, objects, and omissions.
    #[serde(default)]
    price: serde_json::Value,
    #[serde(default)]
    rating: serde_json::Value,
    #[serde(default)]
    reviews: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SerpPagination {
    #[serde(default)]
    next: Option<String>,
}

impl AmazonProvider {
    /// Creates the adapter from the central configuration.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            client: http_client(config.fetch.user_agent),
            base_url: config.providers.serpapi_base_url.clone(),
            api_key: config.providers.serpapi_key.clone(),
        }
    }

    /// Creates the adapter with an explicit endpoint and credential, using
    /// the default user agent.
    pub fn with_config(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: http_client(FetchConfig::default().user_agent),
            base_url,
            api_key,
        }
    }

    async fn search_page(&self, query: &str, page: u32) -> Result<ProviderOutcome, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::MissingCredential {
                provider: ProviderTag::Amazon,
            });
        };

        let url = format!("{}/search.json", self.base_url);
        let page_param = page.to_string();
        let params = [
            ("engine", "amazon"),
            ("k", query),
            ("page", page_param.as_str()),
            ("api_key", api_key),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                reason: format!("Amazon request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(ProviderError::Http {
                status: response.status().as_u16(),
            });
        }

        let body: SerpResponse = response.json().await.map_err(|e| ProviderError::Decode {
            reason: format!("Amazon JSON decoding failed: {e}"),
        })?;

        Ok(Self::map_response(body))
    }

    fn map_response(body: SerpResponse) -> ProviderOutcome {
        let results: Vec<UnifiedResult> = body
            .organic_results
            .into_iter()
            .filter_map(Self::map_item)
            .collect();

        // Pagination metadata is authoritative when present; otherwise fall
        // back to the nonempty-page heuristic.
        let has_more = match body.serpapi_pagination {
            Some(pagination) => pagination.next.is_some(),
            None => !results.is_empty(),
        };

        ProviderOutcome::new(results, has_more)
    }

    fn map_item(item: SerpItem) -> Option<UnifiedResult> {
        Some(UnifiedResult {
            source: ProviderTag::Amazon,
            title: item.title?,
            price: Self::display_price(&item.price),
            link: item.link?,
            thumbnail: item.thumbnail,
            rating: item.rating.as_f64(),
            reviews: item.reviews.as_u64(),
        })
    }

    /// Extracts a pre-formatted display price.
    ///
    /// A bare string is used as-is; an object form uses its `raw` string.
    /// Anything else is absent rather than coerced.
    fn display_price(price: &serde_json::Value) -> Option<String> {
        match price {
            serde_json::Value::String(raw) => Some(raw.clone()),
            serde_json::Value::Object(fields) => fields
                .get("raw")
                .and_then(|raw| raw.as_str())
                .map(str::to_string),
            _ => None,
        }
    }
}

#[async_trait]
impl SearchProvider for AmazonProvider {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Amazon
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, query: &str, page: u32) -> ProviderOutcome {
        match self.search_page(query, page).await {
            Ok(outcome) => outcome,
            Err(ProviderError::MissingCredential { .. }) => {
                tracing::debug!("Amazon adapter skipped: no API key configured");
                ProviderOutcome::empty()
            }
            Err(e) => {
                tracing::warn!("Amazon search degraded to empty outcome: {e}");
                ProviderOutcome::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn item(value: serde_json::Value) -> SerpItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn maps_complete_item() {
        let result = AmazonProvider::map_item(item(json!({
            "title": "AirPods Pro",
            "link": "https://amazon.com/dp/B0TEST",
            "thumbnail": "https://images.example.com/airpods.jpg",
            "price": "$249.00",
            "rating": 4.7,
            "reviews": 12431
        })))
        .unwrap();

        assert_eq!(result.source, ProviderTag::Amazon);
        assert_eq!(result.title, "AirPods Pro");
        assert_eq!(result.price.as_deref(), Some("$249.00"));
        assert_eq!(result.rating, Some(4.7));
        assert_eq!(result.reviews, Some(12431));
    }

    #[test]
    fn skips_item_without_title_or_link() {
        assert!(
            AmazonProvider::map_item(item(json!({
                "link": "https://amazon.com/dp/B0TEST"
            })))
            .is_none()
        );
        assert!(AmazonProvider::map_item(item(json!({"title": "Lonely"}))).is_none());
    }

    #[test]
    fn drops_non_numeric_rating_and_reviews() {
        let result = AmazonProvider::map_item(item(json!({
            "title": "Cable",
            "link": "https://amazon.com/dp/B0CABLE",
            "rating": "4.5 out of 5",
            "reviews": "many"
        })))
        .unwrap();

        assert_eq!(result.rating, None);
        assert_eq!(result.reviews, None);
    }

    #[test]
    fn price_string_used_as_is_and_object_uses_raw() {
        assert_eq!(
            AmazonProvider::display_price(&json!("$19.99")).as_deref(),
            Some("$19.99")
        );
        assert_eq!(
            AmazonProvider::display_price(&json!({"raw": "$19.99", "value": 19.99})).as_deref(),
            Some("$19.99")
        );
        // A bare number is not a formatted display price
        assert_eq!(AmazonProvider::display_price(&json!(19.99)), None);
        assert_eq!(AmazonProvider::display_price(&json!(null)), None);
    }

    #[test]
    fn has_more_follows_pagination_metadata() {
        let with_next: SerpResponse = serde_json::from_value(json!({
            "organic_results": [{"title": "A", "link": "https://a"}],
            "serpapi_pagination": {"next": "https://serpapi.com/search.json?page=2"}
        }))
        .unwrap();
        assert!(AmazonProvider::map_response(with_next).has_more);

        let last_page: SerpResponse = serde_json::from_value(json!({
            "organic_results": [{"title": "A", "link": "https://a"}],
            "serpapi_pagination": {}
        }))
        .unwrap();
        assert!(!AmazonProvider::map_response(last_page).has_more);
    }

    #[test]
    fn has_more_falls_back_to_nonempty_heuristic() {
        let nonempty: SerpResponse = serde_json::from_value(json!({
            "organic_results": [{"title": "A", "link": "https://a"}]
        }))
        .unwrap();
        assert!(AmazonProvider::map_response(nonempty).has_more);

        let empty: SerpResponse = serde_json::from_value(json!({})).unwrap();
        let outcome = AmazonProvider::map_response(empty);
        assert!(outcome.results.is_empty());
        assert!(!outcome.has_more);
    }
}
