//! API handlers for search aggregation and health.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use shophound_core::types::{ProviderScope, SearchRequest};
use shophound_search::SearchError;

use crate::server::AppState;

/// `GET /api/search?q=...&page=...&provider=...`
///
/// `q` is required and non-empty; `page` defaults to 1 when absent or
/// unparsable; `provider` is a known tag or `all`, defaulting to the first
/// configured provider's tag.
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let query = params.get("q").map(String::as_str).unwrap_or("");
    let page = SearchRequest::parse_page(params.get("page").map(String::as_str));

    let default_scope = state
        .aggregator
        .default_scope()
        .unwrap_or(ProviderScope::All);
    let scope = params
        .get("provider")
        .and_then(|raw| raw.parse::<ProviderScope>().ok())
        .unwrap_or(default_scope);

    let request = SearchRequest::new(query, page, scope);

    match state.aggregator.search(&request).await {
        Ok(response) => match serde_json::to_value(&response) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(e) => {
                tracing::error!("Response serialization failed: {e}");
                error_response(&SearchError::Internal {
                    reason: e.to_string(),
                })
            }
        },
        Err(e) => error_response(&e),
    }
}

/// `GET /health` - liveness probe with the configured provider set.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "providers": state.aggregator.configured_tags(),
    }))
}

/// Maps a search error to its HTTP status and client-safe message.
///
/// Internal reasons are logged, never leaked to the caller.
fn error_response(error: &SearchError) -> (StatusCode, Json<Value>) {
    let (status, message) = match error {
        SearchError::EmptyQuery => (StatusCode::BAD_REQUEST, "Missing search term"),
        SearchError::NoProvidersConfigured => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server is not configured with any provider API keys",
        ),
        SearchError::Internal { reason } => {
            tracing::error!("Search failed: {reason}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Search failed")
        }
    };

    (status, Json(json!({ "error": message })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use shophound_cache::MemoryTier;
    use shophound_core::config::SearchConfig;
    use shophound_core::types::ProviderTag;
    use shophound_search::providers::MockProvider;
    use shophound_search::{SearchAggregator, SearchProvider};
    use tower::ServiceExt;

    use super::*;
    use crate::server::router;

    fn app(providers: Vec<Arc<dyn SearchProvider>>) -> axum::Router {
        let aggregator = SearchAggregator::new(
            providers,
            Arc::new(MemoryTier::new()),
            None,
            &SearchConfig::for_testing(),
        );
        router(AppState {
            aggregator: Arc::new(aggregator),
        })
    }

    fn both_healthy() -> Vec<Arc<dyn SearchProvider>> {
        vec![
            Arc::new(MockProvider::healthy(ProviderTag::Amazon, 2, false)),
            Arc::new(MockProvider::healthy(ProviderTag::BestBuy, 2, false)),
        ]
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
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
    async fn missing_query_is_a_bad_request() {
        let (status, body) = get_json(app(both_healthy()), "/api/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing search term");

        let (status, _) = get_json(app(both_healthy()), "/api/search?q=%20%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unconfigured_server_is_an_internal_error() {
        let app = app(vec![
            Arc::new(MockProvider::unconfigured(ProviderTag::Amazon)),
            Arc::new(MockProvider::unconfigured(ProviderTag::BestBuy)),
        ]);
        let (status, body) = get_json(app, "/api/search?q=ssd&provider=all").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Server is not configured with any provider API keys"
        );
    }

    #[tokio::test]
    async fn live_search_reports_provenance_and_sources() {
        let (status, body) =
            get_json(app(both_healthy()), "/api/search?q=airpods+pro&provider=all").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cacheLayer"], "LIVE");
        assert_eq!(body["cached"], false);
        let sources: Vec<&str> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["source"].as_str().unwrap())
            .collect();
        assert_eq!(sources, vec!["amazon", "amazon", "bestbuy", "bestbuy"]);
    }

    #[tokio::test]
    async fn provider_param_defaults_to_first_configured() {
        let app = app(vec![
            Arc::new(MockProvider::unconfigured(ProviderTag::Amazon)),
            Arc::new(MockProvider::healthy(ProviderTag::BestBuy, 2, false)),
        ]);

        // No provider param: scope falls to Best Buy, the first configured.
        let (status, body) = get_json(app, "/api/search?q=tv").await;
        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r["source"] == "bestbuy"));
    }

    #[tokio::test]
    async fn unknown_provider_param_falls_back_to_default_scope() {
        let (status, body) =
            get_json(app(both_healthy()), "/api/search?q=tv&provider=walmart").await;
        assert_eq!(status, StatusCode::OK);
        // Default scope is the first configured provider (amazon).
        let results = body["results"].as_array().unwrap();
        assert!(results.iter().all(|r| r["source"] == "amazon"));
    }

    #[tokio::test]
    async fn unparsable_page_defaults_to_one() {
        let (status, body) =
            get_json(app(both_healthy()), "/api/search?q=tv&page=banana&provider=all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn health_reports_configured_providers() {
        let (status, body) = get_json(app(both_healthy()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["providers"], json!(["amazon", "bestbuy"]));
    }
}
