//! Best Buy products API adapter.

use async_trait::async_trait;
use serde::Deserialize;
use shophound_core::config::{FetchConfig, SearchConfig};
use shophound_core::types::{ProviderOutcome, ProviderTag, UnifiedResult};

use super::{SearchProvider, http_client};
use crate::errors::ProviderError;

/// Fields requested from the products API; keeps responses small.
const SHOW_FIELDS: &str =
    "name,salePrice,regularPrice,url,image,customerReviewAverage,customerReviewCount";

/// Best Buy product search via the official products API.
///
/// Prices arrive as numeric sale/regular fields and are formatted here as
/// two-decimal currency strings, preferring the sale price.
#[derive(Debug)]
pub struct BestBuyProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

/// Response from the products API search endpoint.
#[derive(Debug, Deserialize)]
struct BestBuyResponse {
    #[serde(default)]
    products: Vec<BestBuyProduct>,
    #[serde(rename = "currentPage", default)]
    current_page: Option<u32>,
    #[serde(rename = "totalPages", default)]
    total_pages: Option<u32>,
}

/// Single product from the products API.
#[derive(Debug, Deserialize)]
struct BestBuyProduct {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    image: Option<String>,
    // Loosely typed: numeric validation happens during mapping.
    #[serde(rename = "salePrice", default)]
    sale_price: serde_json::Value,
    #[serde(rename = "regularPrice", default)]
    regular_price: serde_json::Value,
    #[serde(rename = "customerReviewAverage", default)]
    review_average: serde_json::Value,
    #[serde(rename = "customerReviewCount", default)]
    review_count: serde_json::Value,
}

impl BestBuyProvider {
    /// Creates the adapter from the central configuration.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            client: http_client(config.fetch.user_agent),
            base_url: config.providers.bestbuy_base_url.clone(),
            api_key: config.providers.bestbuy_key.clone(),
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
                provider: ProviderTag::BestBuy,
            });
        };

        // The search term is part of the path expression, not a query
        // parameter, so it is encoded by hand.
        let url = format!(
            "{}/v1/products(search={})",
            self.base_url,
            urlencoding::encode(query)
        );
        let page_param = page.to_string();
        let params = [
            ("format", "json"),
            ("apiKey", api_key),
            ("page", page_param.as_str()),
            ("pageSize", "10"),
            ("show", SHOW_FIELDS),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                reason: format!("Best Buy request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(ProviderError::Http {
                status: response.status().as_u16(),
            });
        }

        let body: BestBuyResponse =
            response.json().await.map_err(|e| ProviderError::Decode {
                reason: format!("Best Buy JSON decoding failed: {e}"),
            })?;

        Ok(Self::map_response(body))
    }

    fn map_response(body: BestBuyResponse) -> ProviderOutcome {
        let results: Vec<UnifiedResult> =
            body.products.into_iter().filter_map(Self::map_product).collect();

        let has_more = match (body.current_page, body.total_pages) {
            (Some(current), Some(total)) => current < total,
            _ => !results.is_empty(),
        };

        ProviderOutcome::new(results, has_more)
    }

    fn map_product(product: BestBuyProduct) -> Option<UnifiedResult> {
        Some(UnifiedResult {
            source: ProviderTag::BestBuy,
            title: product.name?,
            price: Self::format_price(&product.sale_price, &product.regular_price),
            link: product.url?,
            thumbnail: product.image,
            rating: product.review_average.as_f64(),
            reviews: product.review_count.as_u64(),
        })
    }

    /// Formats the first usable numeric price as a two-decimal currency
    /// string, preferring the sale price over the regular price.
    fn format_price(sale: &serde_json::Value, regular: &serde_json::Value) -> Option<String> {
        sale.as_f64()
            .or_else(|| regular.as_f64())
            .map(|price| format!("${price:.2}"))
    }
}

#[async_trait]
impl SearchProvider for BestBuyProvider {
    fn tag(&self) -> ProviderTag {
        ProviderTag::BestBuy
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, query: &str, page: u32) -> ProviderOutcome {
        match self.search_page(query, page).await {
            Ok(outcome) => outcome,
            Err(ProviderError::MissingCredential { .. }) => {
                tracing::debug!("Best Buy adapter skipped: no API key configured");
                ProviderOutcome::empty()
            }
            Err(e) => {
                tracing::warn!("Best Buy search degraded to empty outcome: {e}");
                ProviderOutcome::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product(value: serde_json::Value) -> BestBuyProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn maps_complete_product() {
        let result = BestBuyProvider::map_product(product(json!({
            "name": "AirPods Pro",
            "url": "https://bestbuy.com/site/airpods",
            "image": "https://pisces.bbystatic.com/airpods.jpg",
            "salePrice": 229.99,
            "regularPrice": 249.99,
            "customerReviewAverage": 4.8,
            "customerReviewCount": 9021
        })))
        .unwrap();

        assert_eq!(result.source, ProviderTag::BestBuy);
        assert_eq!(result.price.as_deref(), Some("$229.99"));
        assert_eq!(result.rating, Some(4.8));
        assert_eq!(result.reviews, Some(9021));
    }

    #[test]
    fn sale_price_preferred_over_regular() {
        assert_eq!(
            BestBuyProvider::format_price(&json!(99.0), &json!(129.99)).as_deref(),
            Some("$99.00")
        );
        assert_eq!(
            BestBuyProvider::format_price(&json!(null), &json!(129.99)).as_deref(),
            Some("$129.99")
        );
    }

    #[test]
    fn non_numeric_prices_become_absent() {
        // Type-checked, never coerced: a string price fails validation.
        assert_eq!(
            BestBuyProvider::format_price(&json!("99.00"), &json!("129.99")),
            None
        );
        assert_eq!(BestBuyProvider::format_price(&json!(null), &json!(null)), None);
    }

    #[test]
    fn drops_non_numeric_review_fields() {
        let result = BestBuyProvider::map_product(product(json!({
            "name": "HDMI Cable",
            "url": "https://bestbuy.com/site/hdmi",
            "customerReviewAverage": "4.6",
            "customerReviewCount": "n/a"
        })))
        .unwrap();

        assert_eq!(result.rating, None);
        assert_eq!(result.reviews, None);
        assert_eq!(result.price, None);
    }

    #[test]
    fn skips_product_without_name_or_url() {
        assert!(BestBuyProvider::map_product(product(json!({"url": "https://x"}))).is_none());
        assert!(BestBuyProvider::map_product(product(json!({"name": "X"}))).is_none());
    }

    #[test]
    fn has_more_from_page_totals() {
        let mid: BestBuyResponse = serde_json::from_value(json!({
            "products": [{"name": "A", "url": "https://a"}],
            "currentPage": 1,
            "totalPages": 4
        }))
        .unwrap();
        assert!(BestBuyProvider::map_response(mid).has_more);

        let last: BestBuyResponse = serde_json::from_value(json!({
            "products": [{"name": "A", "url": "https://a"}],
            "currentPage": 4,
            "totalPages": 4
        }))
        .unwrap();
        assert!(!BestBuyProvider::map_response(last).has_more);
    }

    #[test]
    fn has_more_heuristic_without_page_totals() {
        let nonempty: BestBuyResponse = serde_json::from_value(json!({
            "products": [{"name": "A", "url": "https://a"}]
        }))
        .unwrap();
        assert!(BestBuyProvider::map_response(nonempty).has_more);

        let empty: BestBuyResponse = serde_json::from_value(json!({"products": []})).unwrap();
        assert!(!BestBuyProvider::map_response(empty).has_more);
    }
}
