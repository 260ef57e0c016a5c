//! Mock provider for testing the orchestrator and web layer.

use std::time::Duration;

use async_trait::async_trait;
use shophound_core::types::{ProviderOutcome, ProviderTag, UnifiedResult};

use super::SearchProvider;

/// Configurable in-memory provider.
///
/// Returns a canned outcome, optionally after an artificial delay, and can
/// pose as an unconfigured provider to exercise the credential guard.
#[derive(Debug, Clone)]
pub struct MockProvider {
    tag: ProviderTag,
    configured: bool,
    outcome: ProviderOutcome,
    delay: Option<Duration>,
}

impl MockProvider {
    /// A configured provider answering with `count` canned results.
    pub fn healthy(tag: ProviderTag, count: usize, has_more: bool) -> Self {
        let results = (0..count).map(|i| Self::canned_result(tag, i)).collect();
        Self {
            tag,
            configured: true,
            outcome: ProviderOutcome::new(results, has_more),
            delay: None,
        }
    }

    /// A configured provider that finds nothing.
    pub fn empty(tag: ProviderTag) -> Self {
        Self {
            tag,
            configured: true,
            outcome: ProviderOutcome::empty(),
            delay: None,
        }
    }

    /// A provider with no credential; answers empty without "network" work.
    pub fn unconfigured(tag: ProviderTag) -> Self {
        Self {
            tag,
            configured: false,
            outcome: ProviderOutcome::empty(),
            delay: None,
        }
    }

    /// A healthy provider that takes `delay` to answer.
    pub fn slow(tag: ProviderTag, count: usize, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::healthy(tag, count, false)
        }
    }

    /// One deterministic canned result for `tag`.
    pub fn canned_result(tag: ProviderTag, index: usize) -> UnifiedResult {
        UnifiedResult {
            source: tag,
            title: format!("{tag} result {index}"),
            price: Some(format!("${}.99", 10 + index)),
            link: format!("https://example.com/{tag}/{index}"),
            thumbnail: None,
            rating: Some(4.0),
            reviews: Some(100),
        }
    }
}

#[async_trait]
impl SearchProvider for MockProvider {
    fn tag(&self) -> ProviderTag {
        self.tag
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn fetch(&self, _query: &str, _page: u32) -> ProviderOutcome {
        if !self.configured {
            return ProviderOutcome::empty();
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}
