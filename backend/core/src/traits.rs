use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{Product, ProductId, ReviewSet};

/// Callback receiving decoded text fragments, in arrival order.
pub type FragmentSink<'a> = dyn FnMut(&str) + Send + 'a;

/// Typed access to the reviews API.
///
/// Implemented over HTTP by `reviewlens-client`; the session layer only ever
/// talks to this trait, so tests can script responses and timing.
#[async_trait]
pub trait ReviewsBackend: Send + Sync {
    /// List the catalog.
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Reviews and any previously computed summary for one product.
    async fn fetch_reviews(&self, product_id: ProductId) -> Result<ReviewSet, ApiError>;

    /// Blocking summary generation. Fallback path only.
    async fn summarize_reviews(&self, product_id: ProductId) -> Result<String, ApiError>;

    /// Open the summary stream and push every decoded fragment into
    /// `on_fragment`. Each call starts an independent generation run.
    async fn stream_summary(
        &self,
        product_id: ProductId,
        on_fragment: &mut FragmentSink<'_>,
    ) -> Result<(), ApiError>;
}
