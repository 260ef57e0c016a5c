//! Centralized configuration for Shophound.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Shophound components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    pub providers: ProvidersConfig,
    pub cache: CacheConfig,
    pub fetch: FetchConfig,
}

/// Per-provider credentials and endpoints.
///
/// A provider whose credential is `None` stays registered but answers every
/// query with an empty outcome, so the service runs with any subset of
/// providers configured.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    /// API key for the Amazon search endpoint (SerpAPI-style).
    pub serpapi_key: Option<String>,
    /// Base URL for the Amazon search endpoint.
    pub serpapi_base_url: String,
    /// API key for the Best Buy products API.
    pub bestbuy_key: Option<String>,
    /// Base URL for the Best Buy products API.
    pub bestbuy_base_url: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            serpapi_key: None,
            serpapi_base_url: "https://serpapi.com".to_string(),
            bestbuy_key: None,
            bestbuy_base_url: "https://api.bestbuy.com".to_string(),
        }
    }
}

/// Two-tier cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Process-local (L1) entry lifetime, measured from write time.
    pub l1_ttl: Duration,
    /// Shared store (L2) entry lifetime, enforced natively by the store.
    pub l2_ttl: Duration,
    /// Redis connection URL for the L2 tier. `None` runs L1-only.
    pub redis_url: Option<String>,
    /// Version tag namespacing cache keys, bumped when the payload shape
    /// changes.
    pub key_version: &'static str,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            l1_ttl: Duration::from_secs(60),
            l2_ttl: Duration::from_secs(600),
            redis_url: None,
            key_version: "v1",
        }
    }
}

/// Provider fan-out configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-provider deadline, applied independently to each concurrent call.
    pub provider_timeout: Duration,
    /// User agent for outbound HTTP requests.
    pub user_agent: &'static str,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_millis(4000),
            user_agent: "shophound/0.1.0",
        }
    }
}

impl SearchConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Provider credentials and endpoint overrides
        if let Ok(key) = std::env::var("SHOPHOUND_SERPAPI_KEY") {
            if !key.is_empty() {
                config.providers.serpapi_key = Some(key);
            }
        }

        if let Ok(url) = std::env::var("SHOPHOUND_SERPAPI_BASE_URL") {
            config.providers.serpapi_base_url = url;
        }

        if let Ok(key) = std::env::var("SHOPHOUND_BESTBUY_KEY") {
            if !key.is_empty() {
                config.providers.bestbuy_key = Some(key);
            }
        }

        if let Ok(url) = std::env::var("SHOPHOUND_BESTBUY_BASE_URL") {
            config.providers.bestbuy_base_url = url;
        }

        // Cache configuration overrides
        if let Ok(url) = std::env::var("SHOPHOUND_REDIS_URL") {
            if !url.is_empty() {
                config.cache.redis_url = Some(url);
            }
        }

        if let Ok(ttl) = std::env::var("SHOPHOUND_L1_TTL_SECS") {
            if let Ok(seconds) = ttl.parse::<u64>() {
                config.cache.l1_ttl = Duration::from_secs(seconds);
            }
        }

        if let Ok(ttl) = std::env::var("SHOPHOUND_L2_TTL_SECS") {
            if let Ok(seconds) = ttl.parse::<u64>() {
                config.cache.l2_ttl = Duration::from_secs(seconds);
            }
        }

        // Fan-out configuration overrides
        if let Ok(timeout) = std::env::var("SHOPHOUND_PROVIDER_TIMEOUT_MS") {
            if let Ok(millis) = timeout.parse::<u64>() {
                config.fetch.provider_timeout = Duration::from_millis(millis);
            }
        }

        config
    }

    /// Creates a configuration optimized for testing: short deadlines and
    /// TTLs, no external cache store.
    pub fn for_testing() -> Self {
        Self {
            cache: CacheConfig {
                l1_ttl: Duration::from_secs(2),
                l2_ttl: Duration::from_secs(10),
                redis_url: None,
                key_version: "v1",
            },
            fetch: FetchConfig {
                provider_timeout: Duration::from_millis(250),
                user_agent: "shophound-test/0.1.0",
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = SearchConfig::default();

        assert_eq!(config.cache.l1_ttl, Duration::from_secs(60));
        assert_eq!(config.cache.l2_ttl, Duration::from_secs(600));
        assert_eq!(config.cache.key_version, "v1");
        assert_eq!(config.fetch.provider_timeout, Duration::from_millis(4000));
        assert!(config.providers.serpapi_key.is_none());
        assert!(config.providers.bestbuy_key.is_none());
        assert!(config.cache.redis_url.is_none());
    }

    #[test]
    fn test_testing_preset() {
        let config = SearchConfig::for_testing();
        assert!(config.fetch.provider_timeout < Duration::from_secs(1));
        assert!(config.cache.redis_url.is_none());
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("SHOPHOUND_SERPAPI_KEY", "test-serp-key");
            std::env::set_var("SHOPHOUND_BESTBUY_KEY", "test-bby-key");
            std::env::set_var("SHOPHOUND_REDIS_URL", "redis://localhost:6379");
            std::env::set_var("SHOPHOUND_PROVIDER_TIMEOUT_MS", "1500");
            std::env::set_var("SHOPHOUND_L1_TTL_SECS", "30");
        }

        let config = SearchConfig::from_env();

        assert_eq!(config.providers.serpapi_key.as_deref(), Some("test-serp-key"));
        assert_eq!(config.providers.bestbuy_key.as_deref(), Some("test-bby-key"));
        assert_eq!(
            config.cache.redis_url.as_deref(),
            Some("redis://localhost:6379")
        );
        assert_eq!(config.fetch.provider_timeout, Duration::from_millis(1500));
        assert_eq!(config.cache.l1_ttl, Duration::from_secs(30));

        // Cleanup
        unsafe {
            std::env::remove_var("SHOPHOUND_SERPAPI_KEY");
            std::env::remove_var("SHOPHOUND_BESTBUY_KEY");
            std::env::remove_var("SHOPHOUND_REDIS_URL");
            std::env::remove_var("SHOPHOUND_PROVIDER_TIMEOUT_MS");
            std::env::remove_var("SHOPHOUND_L1_TTL_SECS");
        }
    }
}
