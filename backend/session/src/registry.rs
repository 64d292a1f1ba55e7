//! Summary session registry.
//!
//! Keeps one controller per bound product. Binding a different product never
//! reuses another product's state; unbinding tears the session down.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use reviewlens_core::{ProductId, ReviewsBackend};

use crate::controller::{ControllerOptions, SummaryController};

/// Manages the live summary sessions, keyed by product.
#[derive(Clone)]
pub struct SessionRegistry {
    backend: Arc<dyn ReviewsBackend>,
    options: ControllerOptions,
    sessions: Arc<RwLock<HashMap<ProductId, Arc<SummaryController>>>>,
}

impl SessionRegistry {
    pub fn new(backend: Arc<dyn ReviewsBackend>, options: ControllerOptions) -> Self {
        Self {
            backend,
            options,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Controller for `product_id`, created on first use.
    pub async fn bind(&self, product_id: ProductId) -> Arc<SummaryController> {
        if let Some(existing) = self.sessions.read().await.get(&product_id) {
            return Arc::clone(existing);
        }
        let mut w = self.sessions.write().await;
        let controller = w.entry(product_id).or_insert_with(|| {
            debug!(%product_id, "Creating summary session");
            Arc::new(SummaryController::with_options(
                product_id,
                Arc::clone(&self.backend),
                self.options,
            ))
        });
        Arc::clone(controller)
    }

    /// Drop the session for `product_id`. A stream still running for it
    /// finishes in the background and is never observed again.
    pub async fn unbind(&self, product_id: ProductId) -> bool {
        let removed = self.sessions.write().await.remove(&product_id).is_some();
        if removed {
            debug!(%product_id, "Summary session torn down");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
