//! Process-local L1 cache tier.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use shophound_core::types::SearchPayload;

use crate::error::CacheError;
use crate::tier::CacheTier;

/// In-process cache tier backed by a plain map with absolute expiry times.
///
/// Owned by a single process and cleared on restart. Expired entries are
/// lazily evicted on the next access to their key; there is no background
/// sweep. Concurrent writes to the same key are last-write-wins, which is
/// acceptable because entries are idempotent recomputations, not
/// conflicting updates.
#[derive(Debug, Clone, Default)]
pub struct MemoryTier {
    entries: Arc<Mutex<HashMap<String, StoredEntry>>>,
}

#[derive(Debug, Clone)]
struct StoredEntry {
    payload: SearchPayload,
    expires_at: Instant,
}

impl MemoryTier {
    /// Creates an empty tier.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheTier for MemoryTier {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<SearchPayload>, CacheError> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Ok(Some(entry.payload.clone())),
            Some(_) => {
                // Lazy eviction of the expired entry
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        key: &str,
        payload: &SearchPayload,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let entry = StoredEntry {
            payload: payload.clone(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().insert(key.to_string(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use shophound_core::types::{ProviderTag, UnifiedResult};

    use super::*;

    fn payload(title: &str) -> SearchPayload {
        SearchPayload {
            results: vec![UnifiedResult {
                source: ProviderTag::Amazon,
                title: title.to_string(),
                price: Some("$19.99".to_string()),
                link: format!("https://example.com/{title}"),
                thumbnail: None,
                rating: None,
                reviews: None,
            }],
            has_more: false,
        }
    }

    #[tokio::test]
    async fn round_trips_a_payload() {
        let tier = MemoryTier::new();
        let stored = payload("keyboard");

        tier.put("k", &stored, Duration::from_secs(60)).await.unwrap();
        let fetched = tier.get("k").await.unwrap();

        assert_eq!(fetched, Some(stored));
    }

    #[tokio::test]
    async fn miss_on_unknown_key() {
        let tier = MemoryTier::new();
        assert_eq!(tier.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_entry_is_absent_and_evicted() {
        let tier = MemoryTier::new();
        tier.put("k", &payload("mouse"), Duration::ZERO).await.unwrap();

        assert_eq!(tier.get("k").await.unwrap(), None);
        // The expired entry is gone, not just hidden
        assert!(tier.entries.lock().is_empty());
    }

    #[tokio::test]
    async fn put_replaces_existing_entry() {
        let tier = MemoryTier::new();
        tier.put("k", &payload("old"), Duration::from_secs(60)).await.unwrap();
        tier.put("k", &payload("new"), Duration::from_secs(60)).await.unwrap();

        let fetched = tier.get("k").await.unwrap().unwrap();
        assert_eq!(fetched.results[0].title, "new");
    }

    #[tokio::test]
    async fn stores_empty_payloads() {
        // L1 accepts empty payloads; the skip-empties policy applies to L2 only.
        let tier = MemoryTier::new();
        tier.put("k", &SearchPayload::empty(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(tier.get("k").await.unwrap(), Some(SearchPayload::empty()));
    }
}
