//! Redis-backed L2 cache tier.

use std::time::Duration;

use async_trait::async_trait;
use rustis::client::Client;
use rustis::commands::StringCommands;
use shophound_core::types::SearchPayload;
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::tier::CacheTier;

/// Shared cache tier backed by Redis.
///
/// Payloads are stored as JSON strings with the entry lifetime enforced
/// natively by the store (`SETEX`), so entries outlive any single process
/// and are visible to all server instances.
pub struct RedisTier {
    client: Client,
}

impl RedisTier {
    /// Connects to the Redis instance at `url`.
    ///
    /// # Errors
    /// - `CacheError::Backend` - Connection could not be established
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = Client::connect(url)
            .await
            .map_err(|e| CacheError::Backend {
                reason: format!("Redis connect failed: {e}"),
            })?;
        debug!("Connected to Redis L2");
        Ok(Self { client })
    }
}

impl std::fmt::Debug for RedisTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTier").finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheTier for RedisTier {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<SearchPayload>, CacheError> {
        let raw: Option<String> =
            self.client
                .get(key)
                .await
                .map_err(|e| CacheError::Backend {
                    reason: format!("Redis GET failed: {e}"),
                })?;

        match raw {
            Some(json) => {
                let payload = serde_json::from_str(&json).map_err(|e| {
                    warn!(%key, "Malformed Redis entry: {e}");
                    CacheError::Decode {
                        reason: format!("Malformed cache entry for '{key}': {e}"),
                    }
                })?;
                debug!(%key, "Redis hit");
                Ok(Some(payload))
            }
            None => {
                debug!(%key, "Redis miss");
                Ok(None)
            }
        }
    }

    async fn put(
        &self,
        key: &str,
        payload: &SearchPayload,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let json = serde_json::to_string(payload).map_err(|e| CacheError::Decode {
            reason: format!("Payload serialization failed: {e}"),
        })?;

        // SETEX rejects a zero expiry, so clamp to at least one second.
        let seconds = ttl.as_secs().max(1);
        self.client
            .setex(key, seconds, json)
            .await
            .map_err(|e| CacheError::Backend {
                reason: format!("Redis SETEX failed: {e}"),
            })
    }
}
