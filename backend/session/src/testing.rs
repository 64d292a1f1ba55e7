//! Scripted backend for session tests.
//!
//! Each `stream_summary` call takes the next queued script and replays it as
//! the test feeds steps in. Dropping the sender ends that stream cleanly.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use reviewlens_core::{
    ApiError, FragmentSink, Product, ProductId, ReviewSet, ReviewsBackend, StreamError,
};

#[derive(Debug)]
pub enum Step {
    Fragment(&'static str),
    Fail,
    NoBody,
}

#[derive(Default)]
pub struct ScriptedBackend {
    streams: Mutex<VecDeque<mpsc::UnboundedReceiver<Step>>>,
    /// Number of leading `fetch_*` calls that fail before one succeeds.
    pub fetch_failures: AtomicU32,
    pub fetch_calls: AtomicU32,
    pub products: Vec<Product>,
}

impl ScriptedBackend {
    pub fn with_streams(count: usize) -> (Arc<Self>, Vec<mpsc::UnboundedSender<Step>>) {
        let mut senders = Vec::with_capacity(count);
        let mut receivers = VecDeque::with_capacity(count);
        for _ in 0..count {
            let (tx, rx) = mpsc::unbounded_channel();
            senders.push(tx);
            receivers.push_back(rx);
        }
        let backend = Self {
            streams: Mutex::new(receivers),
            ..Self::default()
        };
        (Arc::new(backend), senders)
    }

    pub fn failing_fetches(failures: u32, products: Vec<Product>) -> Arc<Self> {
        Arc::new(Self {
            fetch_failures: AtomicU32::new(failures),
            products,
            ..Self::default()
        })
    }

    fn next_fetch(&self) -> Result<(), ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.fetch_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fetch_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(ApiError::status("http://test/products", 503, "unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewsBackend for ScriptedBackend {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        self.next_fetch()?;
        Ok(self.products.clone())
    }

    async fn fetch_reviews(&self, _product_id: ProductId) -> Result<ReviewSet, ApiError> {
        self.next_fetch()?;
        Ok(ReviewSet::default())
    }

    async fn summarize_reviews(&self, product_id: ProductId) -> Result<String, ApiError> {
        Ok(format!("summary of {product_id}"))
    }

    async fn stream_summary(
        &self,
        _product_id: ProductId,
        on_fragment: &mut FragmentSink<'_>,
    ) -> Result<(), ApiError> {
        let next = self
            .streams
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();
        let Some(mut rx) = next else {
            return Err(StreamError::NoBody.into());
        };
        while let Some(step) = rx.recv().await {
            match step {
                Step::Fragment(text) => on_fragment(text),
                Step::Fail => return Err(StreamError::transport("connection dropped").into()),
                Step::NoBody => return Err(StreamError::NoBody.into()),
            }
        }
        Ok(())
    }
}
