//! Provider adapters translating retailer-native search APIs into the
//! unified result shape.

use async_trait::async_trait;
use shophound_core::types::{ProviderOutcome, ProviderTag};

pub mod amazon;
pub mod bestbuy;
pub mod mock;

pub use amazon::AmazonProvider;
pub use bestbuy::BestBuyProvider;
pub use mock::MockProvider;

/// Builds the adapters' HTTP client with the configured user agent.
pub(crate) fn http_client(user_agent: &str) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Trait for retail search providers.
///
/// `fetch` never fails past the adapter boundary: a missing credential,
/// network error, non-success status, or undecodable body all resolve to
/// [`ProviderOutcome::empty`] plus a logged diagnostic, so one flaky
/// retailer can never abort the whole aggregation.
#[async_trait]
pub trait SearchProvider: Send + Sync + std::fmt::Debug {
    /// The provider's stable identifier.
    fn tag(&self) -> ProviderTag;

    /// Whether the adapter has the credential it needs to make live calls.
    fn is_configured(&self) -> bool;

    /// Searches one page of results for `query`.
    async fn fetch(&self, query: &str, page: u32) -> ProviderOutcome;
}
