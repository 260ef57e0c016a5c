//! HTTP server wiring for the aggregation API.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use shophound_core::config::SearchConfig;
use shophound_search::SearchAggregator;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers::{api_search, health};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The aggregation orchestrator.
    pub aggregator: Arc<SearchAggregator>,
}

/// Builds the API router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(api_search))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Builds the production aggregator from `config` and serves the API on
/// `host:port` until the process is stopped.
///
/// # Errors
/// - `Box<dyn std::error::Error>` - The listener could not bind or the
///   server loop failed
pub async fn run_server(
    config: SearchConfig,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let aggregator = Arc::new(SearchAggregator::from_config(&config).await);
    info!(providers = ?aggregator.configured_tags(), "Search aggregator ready");

    let app = router(AppState { aggregator });

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
