//! Streaming Session Controller
//!
//! Owns the summary session for one product: the accumulated text, the busy
//! flag, and the generation counter that keeps a superseded stream from
//! writing into a newer one. State is published through a `watch` channel so
//! any number of views can follow it.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use reviewlens_core::{ProductId, ReviewsBackend};

/// Observable state of one product's summary session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryState {
    /// Text accumulated by the current generation. Empty if none.
    pub summary_text: String,
    pub is_loading: bool,
    /// `None` until the first `start()`.
    pub generation: Option<u64>,
    /// Error that ended the current generation, if any.
    pub last_error: Option<String>,
}

/// Behaviour switches for [`SummaryController`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Abort the task of a superseded generation instead of letting it run
    /// to completion in the background. Output is the same either way.
    pub abort_superseded: bool,
}

/// Binds one product to its streaming summary session.
pub struct SummaryController {
    product_id: ProductId,
    backend: Arc<dyn ReviewsBackend>,
    state: Arc<watch::Sender<SummaryState>>,
    options: ControllerOptions,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl SummaryController {
    pub fn new(product_id: ProductId, backend: Arc<dyn ReviewsBackend>) -> Self {
        Self::with_options(product_id, backend, ControllerOptions::default())
    }

    pub fn with_options(
        product_id: ProductId,
        backend: Arc<dyn ReviewsBackend>,
        options: ControllerOptions,
    ) -> Self {
        let (state, _) = watch::channel(SummaryState::default());
        Self {
            product_id,
            backend,
            state: Arc::new(state),
            options,
            in_flight: Mutex::new(None),
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn snapshot(&self) -> SummaryState {
        self.state.borrow().clone()
    }

    pub fn summary_text(&self) -> String {
        self.state.borrow().summary_text.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Follow state changes. The receiver sees the current value first.
    pub fn subscribe(&self) -> watch::Receiver<SummaryState> {
        self.state.subscribe()
    }

    /// Start (or restart) streaming the summary.
    ///
    /// The reset is immediate: when this returns the text is empty and the
    /// session is loading. The returned handle resolves once this
    /// generation's stream has ended; failures are recorded in the state and
    /// never propagated. Must be called from within a Tokio runtime.
    pub fn start(&self) -> JoinHandle<()> {
        let mut generation = 0;
        self.state.send_modify(|s| {
            generation = s.generation.map_or(0, |g| g + 1);
            s.generation = Some(generation);
            s.summary_text.clear();
            s.is_loading = true;
            s.last_error = None;
        });
        info!(product_id = %self.product_id, generation, "Starting summary stream");

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let product_id = self.product_id;

        let handle = tokio::spawn(async move {
            let result = backend
                .stream_summary(product_id, &mut |fragment: &str| {
                    let accepted = state.send_if_modified(|s| {
                        if s.generation != Some(generation) {
                            return false;
                        }
                        s.summary_text.push_str(fragment);
                        true
                    });
                    if !accepted {
                        debug!(%product_id, generation, "Discarding fragment from superseded stream");
                    }
                })
                .await;

            let current = state.send_if_modified(|s| {
                if s.generation != Some(generation) {
                    return false;
                }
                s.is_loading = false;
                s.last_error = result.as_ref().err().map(ToString::to_string);
                true
            });

            match (&result, current) {
                (Ok(()), true) => debug!(%product_id, generation, "Summary stream completed"),
                (Err(e), true) => {
                    warn!(%product_id, generation, error = %e, "Summary stream failed")
                }
                (_, false) => {
                    debug!(%product_id, generation, "Superseded summary stream ended")
                }
            }
        });

        if self.options.abort_superseded {
            let previous = self
                .in_flight
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .replace(handle.abort_handle());
            if let Some(previous) = previous {
                previous.abort();
            }
        }

        handle
    }
}
