//! Unified data model shared across the aggregation pipeline.
//!
//! Every provider response is normalized into [`UnifiedResult`] values so the
//! merger, cache, and HTTP layer never see retailer-specific shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier for an integrated retail search provider.
///
/// This is a closed set: adding a retailer means adding a variant here and
/// an adapter implementing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTag {
    /// Amazon product search (via a SerpAPI-style search endpoint).
    Amazon,
    /// Best Buy products API.
    BestBuy,
}

impl ProviderTag {
    /// Stable string form used in cache keys and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderTag::Amazon => "amazon",
            ProviderTag::BestBuy => "bestbuy",
        }
    }
}

impl fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "amazon" => Ok(ProviderTag::Amazon),
            "bestbuy" => Ok(ProviderTag::BestBuy),
            _ => Err(format!("Unknown provider: {s}")),
        }
    }
}

/// One normalized search hit, provider-agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedResult {
    /// Which provider produced this hit.
    pub source: ProviderTag,
    /// Display name of the product.
    pub title: String,
    /// Formatted, currency-prefixed display price. Absent when the provider
    /// gave no usable price; never malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Canonical outbound URL to the product page.
    pub link: String,
    /// Product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Average rating on the provider's own scale (typically 0-5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Review count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u64>,
}

/// Result of querying one provider for one page.
///
/// Constructed fresh per provider call and never mutated afterwards; the
/// orchestrator folds outcomes into a merged [`SearchPayload`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderOutcome {
    /// Hits in provider-native order. No cross-provider ordering implied.
    pub results: Vec<UnifiedResult>,
    /// Whether the provider believes additional pages exist.
    pub has_more: bool,
}

impl ProviderOutcome {
    /// Creates an outcome from mapped results and a pagination signal.
    pub fn new(results: Vec<UnifiedResult>, has_more: bool) -> Self {
        Self { results, has_more }
    }

    /// The universal degraded value: no results, no further pages.
    ///
    /// Every adapter failure mode (missing credential, network error,
    /// non-success status, decode error, timeout) resolves to this.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The merged, cacheable unit: unified results plus the aggregate
/// "more pages available" signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    /// Merged results, capped by the merger.
    pub results: Vec<UnifiedResult>,
    /// True if any contributing provider reported more pages. Advisory, not
    /// authoritative: callers treat an empty page as end-of-results.
    pub has_more: bool,
}

impl SearchPayload {
    /// Payload with no results and no further pages.
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            has_more: false,
        }
    }
}

/// Which providers a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderScope {
    /// Fan out to every configured provider.
    All,
    /// Query a single named provider.
    Single(ProviderTag),
}

impl fmt::Display for ProviderScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderScope::All => write!(f, "all"),
            ProviderScope::Single(tag) => write!(f, "{tag}"),
        }
    }
}

impl FromStr for ProviderScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(ProviderScope::All)
        } else {
            s.parse::<ProviderTag>().map(ProviderScope::Single)
        }
    }
}

/// A validated search request, derived from caller input.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Free-text product query. Passed to providers verbatim; lowercased
    /// only for cache-key derivation.
    pub query: String,
    /// 1-based page number.
    pub page: u32,
    /// Provider targeting.
    pub scope: ProviderScope,
}

impl SearchRequest {
    /// Creates a request for the given query, page, and scope.
    pub fn new(query: impl Into<String>, page: u32, scope: ProviderScope) -> Self {
        Self {
            query: query.into(),
            page,
            scope,
        }
    }

    /// Parses a raw page parameter: positive integer, or 1 when absent or
    /// unparsable.
    pub fn parse_page(raw: Option<&str>) -> u32 {
        raw.and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }
}

/// Provenance tag: which stage produced the returned payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheLayer {
    /// Served from the process-local short-TTL cache.
    L1,
    /// Served from the shared durable cache.
    L2,
    /// Freshly fetched from the providers.
    #[serde(rename = "LIVE")]
    Live,
}

/// The HTTP response body: merged payload plus provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Merged, capped results.
    pub results: Vec<UnifiedResult>,
    /// Aggregate pagination signal.
    pub has_more: bool,
    /// True when the payload came from either cache tier.
    pub cached: bool,
    /// Which stage produced the payload.
    pub cache_layer: CacheLayer,
}

impl SearchResponse {
    /// Tags a payload with its provenance.
    pub fn from_payload(payload: SearchPayload, layer: CacheLayer) -> Self {
        Self {
            results: payload.results,
            has_more: payload.has_more,
            cached: layer != CacheLayer::Live,
            cache_layer: layer,
        }
    }
}
