//! Shophound Cache - two-tier result caching
//!
//! A fast, process-local, short-TTL tier (L1) backed by a slower, shared,
//! longer-TTL Redis tier (L2). The tiers share one [`CacheTier`] interface;
//! the distinct write policies (L1 stores empty payloads, L2 never does)
//! live at the orchestrator call site, not in here.

pub mod error;
pub mod key;
pub mod memory;
pub mod redis;
pub mod tier;

// Re-export main types
pub use error::CacheError;
pub use key::cache_key;
pub use memory::MemoryTier;
pub use redis::RedisTier;
pub use tier::CacheTier;
