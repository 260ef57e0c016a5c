//! Error types for search aggregation.

use shophound_core::types::ProviderTag;
use thiserror::Error;

/// Errors surfaced to the caller of the aggregation entry point.
///
/// Provider- and cache-level failures never appear here: they are absorbed
/// at their own boundaries and degrade to empty outcomes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The query was absent, empty, or whitespace-only.
    #[error("Missing search term")]
    EmptyQuery,

    /// No provider has a credential configured, so a live fetch could never
    /// return anything. Operator-actionable.
    #[error("Server is not configured with any provider API keys")]
    NoProvidersConfigured,

    /// Unexpected internal fault after fan-out began.
    #[error("Search failed: {reason}")]
    Internal {
        /// The reason for the internal fault
        reason: String,
    },
}

/// Failure modes recovered at a provider adapter's boundary.
///
/// Every variant resolves to an empty outcome plus a logged diagnostic;
/// none propagates to the orchestrator.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The adapter's required credential is absent; no network call is made.
    #[error("No API key configured for {provider}")]
    MissingCredential {
        /// The provider lacking a credential
        provider: ProviderTag,
    },

    /// Network communication failed.
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// The provider answered with a non-success status.
    #[error("Provider returned HTTP {status}")]
    Http {
        /// The HTTP status code
        status: u16,
    },

    /// The response body did not match the provider's expected shape.
    #[error("Decode error: {reason}")]
    Decode {
        /// The reason for the decode error
        reason: String,
    },
}
