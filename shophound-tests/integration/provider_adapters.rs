//! Provider adapter tests against stubbed retailer APIs.
//!
//! Uses `wiremock` to stand up a local HTTP server per test so no real
//! network traffic is made. Covers the happy mapping path and every failure
//! mode the adapter boundary must absorb: non-success status, undecodable
//! body, and the missing-credential guard.

use serde_json::json;
use shophound_core::config::SearchConfig;
use shophound_core::types::ProviderTag;
use shophound_search::providers::{AmazonProvider, BestBuyProvider};
use shophound_search::SearchProvider;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn amazon_fixture() -> serde_json::Value {
    json!({
        "organic_results": [
            {
                "title": "AirPods Pro (2nd Generation)",
                "link": "https://www.amazon.com/dp/B0TEST",
                "thumbnail": "https://m.media-amazon.com/images/airpods.jpg",
                "price": "$249.00",
                "rating": 4.7,
                "reviews": 12431
            },
            {
                "title": "AirPods Pro Case",
                "link": "https://www.amazon.com/dp/B0CASE",
                "price": {"raw": "$12.99", "value": 12.99},
                "rating": "not rated",
                "reviews": null
            }
        ],
        "serpapi_pagination": {"next": "https://serpapi.com/search.json?page=2"}
    })
}

fn bestbuy_fixture() -> serde_json::Value {
    json!({
        "products": [
            {
                "name": "Apple - AirPods Pro",
                "url": "https://www.bestbuy.com/site/airpods-pro",
                "image": "https://pisces.bbystatic.com/airpods.jpg",
                "salePrice": 229.99,
                "regularPrice": 249.99,
                "customerReviewAverage": 4.8,
                "customerReviewCount": 9021
            }
        ],
        "currentPage": 1,
        "totalPages": 3
    })
}

#[tokio::test]
async fn amazon_adapter_maps_fixture_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("engine", "amazon"))
        .and(query_param("k", "airpods pro"))
        .and(query_param("page", "1"))
        .and(query_param("api_key", "serp-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(amazon_fixture()))
        .mount(&server)
        .await;

    let provider = AmazonProvider::with_config(server.uri(), Some("serp-test-key".to_string()));
    let outcome = provider.fetch("airpods pro", 1).await;

    assert_eq!(outcome.results.len(), 2);
    assert!(outcome.has_more);

    let first = &outcome.results[0];
    assert_eq!(first.source, ProviderTag::Amazon);
    assert_eq!(first.title, "AirPods Pro (2nd Generation)");
    assert_eq!(first.price.as_deref(), Some("$249.00"));
    assert_eq!(first.rating, Some(4.7));
    assert_eq!(first.reviews, Some(12431));

    // Object-form price uses its raw string; non-numeric rating is dropped.
    let second = &outcome.results[1];
    assert_eq!(second.price.as_deref(), Some("$12.99"));
    assert_eq!(second.rating, None);
    assert_eq!(second.reviews, None);
}

#[tokio::test]
async fn bestbuy_adapter_maps_fixture_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("apiKey", "bby-test-key"))
        .and(query_param("format", "json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bestbuy_fixture()))
        .mount(&server)
        .await;

    let provider = BestBuyProvider::with_config(server.uri(), Some("bby-test-key".to_string()));
    let outcome = provider.fetch("airpods pro", 2).await;

    assert_eq!(outcome.results.len(), 1);
    assert!(outcome.has_more);

    let result = &outcome.results[0];
    assert_eq!(result.source, ProviderTag::BestBuy);
    assert_eq!(result.title, "Apple - AirPods Pro");
    assert_eq!(result.price.as_deref(), Some("$229.99"));
    assert_eq!(result.rating, Some(4.8));
    assert_eq!(result.reviews, Some(9021));
}

#[tokio::test]
async fn requests_carry_the_configured_user_agent() {
    let server = MockServer::start().await;

    // The mock only matches when the configured user agent arrives, so a
    // client built without it degrades this fetch to empty.
    Mock::given(method("GET"))
        .and(header("user-agent", "shophound-test/0.1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(amazon_fixture()))
        .mount(&server)
        .await;

    let mut config = SearchConfig::for_testing();
    config.providers.serpapi_base_url = server.uri();
    config.providers.serpapi_key = Some("serp-test-key".to_string());

    let provider = AmazonProvider::new(&config);
    let outcome = provider.fetch("ssd", 1).await;
    assert_eq!(outcome.results.len(), 2);
}

#[tokio::test]
async fn non_success_status_degrades_to_empty_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let amazon = AmazonProvider::with_config(server.uri(), Some("key".to_string()));
    let outcome = amazon.fetch("ssd", 1).await;
    assert!(outcome.results.is_empty());
    assert!(!outcome.has_more);

    let bestbuy = BestBuyProvider::with_config(server.uri(), Some("key".to_string()));
    let outcome = bestbuy.fetch("ssd", 1).await;
    assert!(outcome.results.is_empty());
    assert!(!outcome.has_more);
}

#[tokio::test]
async fn undecodable_body_degrades_to_empty_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let provider = AmazonProvider::with_config(server.uri(), Some("key".to_string()));
    let outcome = provider.fetch("ssd", 1).await;

    assert!(outcome.results.is_empty());
    assert!(!outcome.has_more);
}

#[tokio::test]
async fn missing_credential_makes_no_network_call() {
    let server = MockServer::start().await;

    // Any request reaching the server fails the expectation.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(amazon_fixture()))
        .expect(0)
        .mount(&server)
        .await;

    let provider = AmazonProvider::with_config(server.uri(), None);
    assert!(!provider.is_configured());

    let outcome = provider.fetch("ssd", 1).await;
    assert!(outcome.results.is_empty());
    assert!(!outcome.has_more);
}

#[tokio::test]
async fn unreachable_provider_degrades_to_empty_outcome() {
    // Nothing listens on this port.
    let provider = BestBuyProvider::with_config(
        "http://127.0.0.1:1".to_string(),
        Some("key".to_string()),
    );

    let outcome = provider.fetch("ssd", 1).await;
    assert!(outcome.results.is_empty());
    assert!(!outcome.has_more);
}
