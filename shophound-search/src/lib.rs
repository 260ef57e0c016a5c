//! Shophound Search - provider fan-out and result aggregation
//!
//! Fans a product query out to multiple retail search providers under
//! independent deadlines, normalizes and merges their responses, and serves
//! repeats from a two-tier cache.

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![warn(clippy::too_many_lines)]

pub mod errors;
pub mod merge;
pub mod providers;
pub mod service;
pub mod timeout;

// Re-export main types
pub use errors::{ProviderError, SearchError};
pub use merge::{MAX_MERGED_RESULTS, merge_outcomes};
pub use providers::{AmazonProvider, BestBuyProvider, MockProvider, SearchProvider};
pub use service::SearchAggregator;
pub use timeout::{TimeoutError, with_deadline};

/// Convenience type alias for Results with SearchError.
pub type Result<T> = std::result::Result<T, SearchError>;
