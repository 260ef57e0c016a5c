//! Shophound Core - configuration and shared data model
//!
//! This crate provides the building blocks shared by every Shophound
//! component: the unified search result model, provider identifiers,
//! request/response types, and centralized configuration.

pub mod config;
pub mod tracing_setup;
pub mod types;

// Re-export main types for convenient access
pub use config::SearchConfig;
pub use types::{
    CacheLayer, ProviderOutcome, ProviderScope, ProviderTag, SearchPayload, SearchRequest,
    SearchResponse, UnifiedResult,
};
