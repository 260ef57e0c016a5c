//! Integration tests for Shophound
//!
//! These tests verify the interaction between components: provider adapters
//! against stubbed retailer APIs, the two-tier cache under the orchestrator,
//! and the full HTTP endpoint contract.

#[path = "integration/provider_adapters.rs"]
mod provider_adapters;

#[path = "integration/cache_tiers.rs"]
mod cache_tiers;

#[path = "integration/endpoint_scenarios.rs"]
mod endpoint_scenarios;
