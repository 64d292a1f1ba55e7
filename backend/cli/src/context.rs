//! Wires the loaded config into the objects the commands use.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use reviewlens_client::ReviewsApi;
use reviewlens_config::ReviewLensConfig;
use reviewlens_core::ReviewsBackend;
use reviewlens_logging::{redact_url, LogSettings};
use reviewlens_session::{ControllerOptions, RetryPolicy};

/// Everything a command needs to talk to the API.
pub struct AppContext {
    pub backend: Arc<dyn ReviewsBackend>,
    pub retry: RetryPolicy,
    pub controller_options: ControllerOptions,
}

impl AppContext {
    pub fn from_config(config: &ReviewLensConfig) -> Result<Self> {
        let base_url = config
            .api
            .resolved_base_url()
            .context("API base URL is relative and no origin is configured")?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.api.connect_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        info!(base_url = %redact_url(&base_url), "Using reviews API");
        let api = ReviewsApi::new(base_url)
            .with_client(client)
            .with_request_timeout(Duration::from_secs(config.api.request_timeout_secs));

        Ok(Self::with_backend(Arc::new(api), config))
    }

    pub fn with_backend(backend: Arc<dyn ReviewsBackend>, config: &ReviewLensConfig) -> Self {
        Self {
            backend,
            retry: retry_policy(config),
            controller_options: ControllerOptions {
                abort_superseded: config.streaming.abort_superseded,
            },
        }
    }
}

pub fn retry_policy(config: &ReviewLensConfig) -> RetryPolicy {
    RetryPolicy {
        retries: config.catalog.retries,
        base_delay_ms: config.catalog.retry_base_delay_ms,
        max_delay_ms: config.catalog.retry_max_delay_ms,
        ..RetryPolicy::default()
    }
}

pub fn log_settings(config: &ReviewLensConfig) -> LogSettings {
    LogSettings {
        level: config.logging.level.clone(),
        json: config.logging.json,
        log_dir: config.logging.log_dir.as_ref().map(PathBuf::from),
    }
}
