//! End-to-end endpoint scenarios: stubbed retailer APIs behind real
//! adapters, the real orchestrator and cache tiers, and the real router.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use shophound_cache::MemoryTier;
use shophound_core::config::SearchConfig;
use shophound_search::SearchAggregator;
use shophound_search::providers::{AmazonProvider, BestBuyProvider, SearchProvider};
use shophound_web::{AppState, router};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn amazon_body(count: usize) -> Value {
    let results: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "title": format!("Amazon item {i}"),
                "link": format!("https://www.amazon.com/dp/B{i:07}"),
                "price": "$19.99",
                "rating": 4.5,
                "reviews": 100
            })
        })
        .collect();
    json!({
        "organic_results": results,
        "serpapi_pagination": {"next": "https://serpapi.com/search.json?page=2"}
    })
}

fn bestbuy_body(count: usize) -> Value {
    let products: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "name": format!("Best Buy item {i}"),
                "url": format!("https://www.bestbuy.com/site/{i}"),
                "salePrice": 17.99,
                "regularPrice": 19.99
            })
        })
        .collect();
    json!({"products": products, "currentPage": 1, "totalPages": 2})
}

/// Stubs both retailers and builds the app over real adapters.
async fn app_with_stubs(
    amazon: ResponseTemplate,
    bestbuy: ResponseTemplate,
    amazon_key: Option<&str>,
    bestbuy_key: Option<&str>,
) -> (Router, MockServer, MockServer) {
    let amazon_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(amazon)
        .mount(&amazon_server)
        .await;

    let bestbuy_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(bestbuy)
        .mount(&bestbuy_server)
        .await;

    let providers: Vec<Arc<dyn SearchProvider>> = vec![
        Arc::new(AmazonProvider::with_config(
            amazon_server.uri(),
            amazon_key.map(str::to_string),
        )),
        Arc::new(BestBuyProvider::with_config(
            bestbuy_server.uri(),
            bestbuy_key.map(str::to_string),
        )),
    ];

    let aggregator = SearchAggregator::new(
        providers,
        Arc::new(MemoryTier::new()),
        Some(Arc::new(MemoryTier::new())),
        &SearchConfig::for_testing(),
    );

    let app = router(AppState {
        aggregator: Arc::new(aggregator),
    });
    (app, amazon_server, bestbuy_server)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn scenario_a_cold_cache_live_fetch_from_both_providers() {
    let (app, _a, _b) = app_with_stubs(
        ResponseTemplate::new(200).set_body_json(amazon_body(2)),
        ResponseTemplate::new(200).set_body_json(bestbuy_body(2)),
        Some("serp-key"),
        Some("bby-key"),
    )
    .await;

    let (status, body) = get_json(app, "/api/search?q=AirPods+Pro&page=1&provider=all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cacheLayer"], "LIVE");
    assert_eq!(body["cached"], false);
    assert_eq!(body["hasMore"], true);

    let results = body["results"].as_array().unwrap();
    assert!(results.len() <= 30);
    let sources: Vec<&str> = results.iter().map(|r| r["source"].as_str().unwrap()).collect();
    assert!(sources.contains(&"amazon"));
    assert!(sources.contains(&"bestbuy"));
    // Call order: all Amazon entries precede all Best Buy entries.
    assert_eq!(sources, vec!["amazon", "amazon", "bestbuy", "bestbuy"]);
}

#[tokio::test]
async fn scenario_b_repeat_within_ttl_is_an_identical_l1_hit() {
    let (app, _a, _b) = app_with_stubs(
        ResponseTemplate::new(200).set_body_json(amazon_body(2)),
        ResponseTemplate::new(200).set_body_json(bestbuy_body(1)),
        Some("serp-key"),
        Some("bby-key"),
    )
    .await;

    let (_, first) = get_json(app.clone(), "/api/search?q=AirPods+Pro&provider=all").await;
    let (status, second) = get_json(app, "/api/search?q=AirPods+Pro&provider=all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["cacheLayer"], "LIVE");
    assert_eq!(second["cacheLayer"], "L1");
    assert_eq!(second["cached"], true);
    assert_eq!(first["results"], second["results"]);
    assert_eq!(first["hasMore"], second["hasMore"]);
}

#[tokio::test]
async fn scenario_c_no_matches_is_a_success_not_an_error() {
    let (app, _a, _b) = app_with_stubs(
        ResponseTemplate::new(200)
            .set_body_json(json!({"organic_results": [], "serpapi_pagination": {}})),
        ResponseTemplate::new(200)
            .set_body_json(json!({"products": [], "currentPage": 1, "totalPages": 1})),
        Some("serp-key"),
        Some("bby-key"),
    )
    .await;

    let (status, body) =
        get_json(app, "/api/search?q=xyzzynonexistentproduct123&provider=all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn scenario_d_unconfigured_provider_is_silently_excluded() {
    let (app, amazon_server, _b) = app_with_stubs(
        ResponseTemplate::new(200).set_body_json(amazon_body(2)),
        ResponseTemplate::new(200).set_body_json(bestbuy_body(2)),
        None,
        Some("bby-key"),
    )
    .await;

    let (status, body) = get_json(app, "/api/search?q=AirPods+Pro&provider=all").await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r["source"] == "bestbuy"));

    // The credential guard kept Amazon entirely off the wire.
    assert!(amazon_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn provider_outage_never_drops_the_healthy_provider() {
    let (app, _a, _b) = app_with_stubs(
        ResponseTemplate::new(503),
        ResponseTemplate::new(200).set_body_json(bestbuy_body(3)),
        Some("serp-key"),
        Some("bby-key"),
    )
    .await;

    let (status, body) = get_json(app, "/api/search?q=ssd&provider=all").await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r["source"] == "bestbuy"));
}

#[tokio::test]
async fn merged_results_are_capped_at_thirty() {
    let (app, _a, _b) = app_with_stubs(
        ResponseTemplate::new(200).set_body_json(amazon_body(25)),
        ResponseTemplate::new(200).set_body_json(bestbuy_body(25)),
        Some("serp-key"),
        Some("bby-key"),
    )
    .await;

    let (status, body) = get_json(app, "/api/search?q=hdmi+cable&provider=all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn single_provider_scope_queries_only_that_provider() {
    let (app, amazon_server, _b) = app_with_stubs(
        ResponseTemplate::new(200).set_body_json(amazon_body(2)),
        ResponseTemplate::new(200).set_body_json(bestbuy_body(2)),
        Some("serp-key"),
        Some("bby-key"),
    )
    .await;

    let (status, body) = get_json(app, "/api/search?q=tv&provider=bestbuy").await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert!(results.iter().all(|r| r["source"] == "bestbuy"));
    assert!(amazon_server.received_requests().await.unwrap().is_empty());
}
