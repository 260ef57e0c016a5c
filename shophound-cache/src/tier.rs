//! The cache tier interface shared by L1 and L2.

use std::time::Duration;

use async_trait::async_trait;
use shophound_core::types::SearchPayload;

use crate::error::CacheError;

/// One cache tier: a fallible key-value store holding merged search
/// payloads with per-entry expiry.
///
/// Implementations must treat an expired entry exactly like an absent one.
#[async_trait]
pub trait CacheTier: Send + Sync {
    /// Short tier name for diagnostics (e.g. "memory", "redis").
    fn name(&self) -> &'static str;

    /// Returns the cached payload for `key`, or `None` on a miss.
    ///
    /// # Errors
    /// - `CacheError::Backend` - Store unreachable or operation rejected
    /// - `CacheError::Decode` - Stored entry did not match the payload shape
    async fn get(&self, key: &str) -> Result<Option<SearchPayload>, CacheError>;

    /// Stores `payload` under `key` for `ttl`, replacing any prior entry.
    ///
    /// # Errors
    /// - `CacheError::Backend` - Store unreachable or operation rejected
    async fn put(&self, key: &str, payload: &SearchPayload, ttl: Duration)
    -> Result<(), CacheError>;
}
