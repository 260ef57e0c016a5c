//! Error types for cache tiers.

use thiserror::Error;

/// Errors that can occur while reading or writing a cache tier.
///
/// These are always recoverable at the orchestrator: a failing tier is
/// logged and treated as a miss, never surfaced to the caller.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store was unreachable or rejected the operation.
    #[error("Cache backend error: {reason}")]
    Backend {
        /// The reason for the backend failure
        reason: String,
    },

    /// A stored entry could not be decoded into the payload shape.
    #[error("Cache entry decode error: {reason}")]
    Decode {
        /// The reason for the decode failure
        reason: String,
    },
}
