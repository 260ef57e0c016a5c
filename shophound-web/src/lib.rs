//! Shophound Web - HTTP API for the search aggregator
//!
//! Exposes the aggregation endpoint (`GET /api/search`) and a health probe.
//! The UI is an external consumer: it sends a query string, a page number,
//! and an optional provider filter, and renders whatever unified list comes
//! back.

pub mod handlers;
pub mod server;

pub use server::{AppState, router, run_server};
