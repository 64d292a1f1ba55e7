//! Cached catalog queries.
//!
//! A small `{ is_loading, is_error, data, refetch() }` accessor over a fetch
//! function, with bounded retry. Data from the last success is kept while a
//! refetch runs and after a failed one.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::watch;
use tracing::{debug, warn};

use reviewlens_core::{ApiError, Product, ProductId, ReviewSet, ReviewsBackend};

use crate::retry::RetryPolicy;

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// Snapshot of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub is_loading: bool,
    /// Failed attempts in the most recent fetch.
    pub failure_count: u32,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
            failure_count: 0,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_success(&self) -> bool {
        self.data.is_some() && self.error.is_none()
    }
}

/// A cached, refetchable query.
pub struct Query<T> {
    key: String,
    fetcher: Fetcher<T>,
    policy: RetryPolicy,
    state: watch::Sender<QueryState<T>>,
}

impl<T> Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F>(key: impl Into<String>, policy: RetryPolicy, fetch: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync + 'static,
    {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            key: key.into(),
            fetcher: Arc::new(fetch),
            policy,
            state,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn snapshot(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.state.subscribe()
    }

    /// Cached data if there is any, otherwise fetch.
    pub async fn get(&self) -> QueryState<T> {
        if self.state.borrow().is_success() {
            return self.snapshot();
        }
        self.refetch().await
    }

    /// Fetch again, retrying retryable failures per the policy.
    pub async fn refetch(&self) -> QueryState<T> {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.failure_count = 0;
        });

        let mut failures = 0u32;
        let outcome = loop {
            match (self.fetcher)().await {
                Ok(data) => break Ok(data),
                Err(err) => {
                    failures += 1;
                    self.state.send_modify(|s| s.failure_count = failures);
                    if !err.is_retryable() || !self.policy.should_retry(failures) {
                        break Err(err);
                    }
                    let delay = self.policy.delay_for(failures);
                    warn!(
                        key = %self.key,
                        attempt = failures,
                        max = self.policy.max_attempts(),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Query failed, will retry"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        };

        self.state.send_modify(|s| {
            s.is_loading = false;
            match outcome {
                Ok(data) => {
                    debug!(key = %self.key, "Query succeeded");
                    s.data = Some(data);
                    s.error = None;
                }
                Err(err) => {
                    warn!(key = %self.key, error = %err, "Query failed");
                    s.error = Some(err.to_string());
                }
            }
        });
        self.snapshot()
    }
}

/// The product catalog query.
pub fn products_query(backend: Arc<dyn ReviewsBackend>, policy: RetryPolicy) -> Query<Vec<Product>> {
    Query::new("products", policy, move || {
        let backend = Arc::clone(&backend);
        Box::pin(async move { backend.fetch_products().await })
    })
}

/// Reviews for one product.
pub fn reviews_query(
    backend: Arc<dyn ReviewsBackend>,
    product_id: ProductId,
    policy: RetryPolicy,
) -> Query<ReviewSet> {
    Query::new(format!("reviews/{product_id}"), policy, move || {
        let backend = Arc::clone(&backend);
        Box::pin(async move { backend.fetch_reviews(product_id).await })
    })
}
