//! The aggregation orchestrator: the request entry point tying providers,
//! timeout guard, merger, and cache tiers together.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use shophound_cache::{CacheTier, MemoryTier, RedisTier, cache_key};
use shophound_core::config::SearchConfig;
use shophound_core::types::{
    CacheLayer, ProviderOutcome, ProviderScope, ProviderTag, SearchPayload, SearchRequest,
    SearchResponse,
};
use tracing::{debug, warn};

use crate::errors::SearchError;
use crate::merge::merge_outcomes;
use crate::providers::{AmazonProvider, BestBuyProvider, SearchProvider};
use crate::timeout::with_deadline;

/// Search aggregation service.
///
/// One request flows: validate, L1 lookup, L2 lookup (with L1 backfill),
/// timeout-guarded parallel provider fan-out, merge, cache populate,
/// respond. Every provider- and cache-level failure degrades in place;
/// only input validation and total provider misconfiguration surface as
/// errors.
pub struct SearchAggregator {
    providers: Vec<Arc<dyn SearchProvider>>,
    l1: Arc<dyn CacheTier>,
    l2: Option<Arc<dyn CacheTier>>,
    provider_timeout: Duration,
    l1_ttl: Duration,
    l2_ttl: Duration,
    key_version: &'static str,
}

impl SearchAggregator {
    /// Builds the production aggregator: real adapters for every known
    /// provider, a fresh in-process L1, and a Redis L2 when configured.
    ///
    /// A failed Redis connection downgrades the service to L1-only rather
    /// than failing startup.
    pub async fn from_config(config: &SearchConfig) -> Self {
        let providers: Vec<Arc<dyn SearchProvider>> = vec![
            Arc::new(AmazonProvider::new(config)),
            Arc::new(BestBuyProvider::new(config)),
        ];

        let l2: Option<Arc<dyn CacheTier>> = match &config.cache.redis_url {
            Some(url) => match RedisTier::connect(url).await {
                Ok(tier) => Some(Arc::new(tier)),
                Err(e) => {
                    warn!("L2 cache disabled, continuing with L1 only: {e}");
                    None
                }
            },
            None => None,
        };

        Self::new(providers, Arc::new(MemoryTier::new()), l2, config)
    }

    /// Builds an aggregator from explicit parts; used by tests to inject
    /// mock providers and tiers.
    pub fn new(
        providers: Vec<Arc<dyn SearchProvider>>,
        l1: Arc<dyn CacheTier>,
        l2: Option<Arc<dyn CacheTier>>,
        config: &SearchConfig,
    ) -> Self {
        Self {
            providers,
            l1,
            l2,
            provider_timeout: config.fetch.provider_timeout,
            l1_ttl: config.cache.l1_ttl,
            l2_ttl: config.cache.l2_ttl,
            key_version: config.cache.key_version,
        }
    }

    /// Tags of all providers holding a credential.
    pub fn configured_tags(&self) -> Vec<ProviderTag> {
        self.providers
            .iter()
            .filter(|provider| provider.is_configured())
            .map(|provider| provider.tag())
            .collect()
    }

    /// Default provider scope: the first configured provider's tag.
    pub fn default_scope(&self) -> Option<ProviderScope> {
        self.configured_tags()
            .first()
            .copied()
            .map(ProviderScope::Single)
    }

    /// Runs one aggregated search.
    ///
    /// # Errors
    /// - `SearchError::EmptyQuery` - Query absent or whitespace-only
    /// - `SearchError::NoProvidersConfigured` - No provider has a credential
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        if request.query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        if self.configured_tags().is_empty() {
            return Err(SearchError::NoProvidersConfigured);
        }

        let key = cache_key(self.key_version, request);

        match self.l1.get(&key).await {
            Ok(Some(payload)) => {
                debug!(%key, "L1 hit");
                return Ok(SearchResponse::from_payload(payload, CacheLayer::L1));
            }
            Ok(None) => {}
            Err(e) => warn!("L1 read failed, treating as miss: {e}"),
        }

        if let Some(l2) = &self.l2 {
            match l2.get(&key).await {
                Ok(Some(payload)) => {
                    debug!(%key, "L2 hit");
                    // Backfill L1 so an immediate repeat is served locally.
                    if let Err(e) = self.l1.put(&key, &payload, self.l1_ttl).await {
                        warn!("L1 backfill failed: {e}");
                    }
                    return Ok(SearchResponse::from_payload(payload, CacheLayer::L2));
                }
                Ok(None) => {}
                Err(e) => warn!("L2 read failed, falling through to live fetch: {e}"),
            }
        }

        let payload = self.live_fetch(request).await;

        // L1 takes every payload, empties included, so a repeated empty
        // query does not hammer the providers.
        if let Err(e) = self.l1.put(&key, &payload, self.l1_ttl).await {
            warn!("L1 write failed: {e}");
        }

        // L2 never stores empty payloads: a transient provider outage must
        // not poison the durable layer for ten minutes.
        if !payload.results.is_empty()
            && let Some(l2) = &self.l2
            && let Err(e) = l2.put(&key, &payload, self.l2_ttl).await
        {
            warn!("L2 write failed: {e}");
        }

        Ok(SearchResponse::from_payload(payload, CacheLayer::Live))
    }

    /// Fans out to the scope's providers, each under its own deadline, and
    /// merges whatever settles.
    async fn live_fetch(&self, request: &SearchRequest) -> SearchPayload {
        let active: Vec<Arc<dyn SearchProvider>> = self
            .providers
            .iter()
            .filter(|provider| match request.scope {
                ProviderScope::All => true,
                ProviderScope::Single(tag) => provider.tag() == tag,
            })
            .cloned()
            .collect();

        let calls = active.into_iter().map(|provider| {
            let query = request.query.clone();
            let page = request.page;
            let deadline = self.provider_timeout;
            async move {
                match with_deadline(provider.fetch(&query, page), deadline).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!(provider = %provider.tag(), "{e}, substituting empty outcome");
                        ProviderOutcome::empty()
                    }
                }
            }
        });

        // Await all jointly: no early return on first success, and the
        // request completes when the slowest guarded call settles.
        let outcomes = join_all(calls).await;
        merge_outcomes(outcomes)
    }
}

impl std::fmt::Debug for SearchAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAggregator")
            .field("providers", &self.providers.len())
            .field("l2_enabled", &self.l2.is_some())
            .finish_non_exhaustive()
    }
}
