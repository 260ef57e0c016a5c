//! Deterministic cache-key derivation.

use shophound_core::types::SearchRequest;

/// Derives the cache key for a request.
///
/// The key is a pure function of (query lowercased and trimmed, page,
/// provider scope), namespaced by a version tag so the payload shape can
/// change without colliding with stale entries. Both tiers use the same key.
pub fn cache_key(version: &str, request: &SearchRequest) -> String {
    format!(
        "search:{version}:{scope}:{page}:{query}",
        scope = request.scope,
        page = request.page,
        query = request.query.trim().to_lowercase(),
    )
}
