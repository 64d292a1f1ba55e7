//! Client-side state for ReviewLens.
//!
//! - [`controller`]: per-product streaming summary sessions with stale-run suppression
//! - [`registry`]: one session per bound product
//! - [`query`]: cached catalog and review queries with bounded retry

pub mod controller;
pub mod query;
pub mod registry;
pub mod retry;

#[cfg(test)]
mod testing;

pub use controller::{ControllerOptions, SummaryController, SummaryState};
pub use query::{products_query, reviews_query, Query, QueryState};
pub use registry::SessionRegistry;
pub use retry::RetryPolicy;
