//! Structured Logger
//!
//! Wraps `tracing` to provide console output (text or JSON), an optional
//! rolling NDJSON file, and environment-based level control.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

const LOG_FILE_PREFIX: &str = "reviewlens.log";
const FALLBACK_LEVEL: &str = "warn";

/// What to log and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// JSON lines on the console instead of text.
    pub json: bool,
    /// Directory for `reviewlens.log.YYYY-MM-DD`; no file logging when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: FALLBACK_LEVEL.to_string(),
            json: false,
            log_dir: None,
        }
    }
}

/// Initialize the global structured logger.
///
/// Safe to call more than once; later calls are no-ops. Fails only when the
/// log directory cannot be created, before anything is installed.
pub fn init_logger(settings: &LogSettings) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = EnvFilter::try_new(filter_directive(rust_log.as_deref(), &settings.level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL));

    let console_layer: Box<dyn Layer<Registry> + Send + Sync> = if settings.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
            .boxed()
    };

    // Rolling file appender: writes NDJSON to `<dir>/reviewlens.log.YYYY-MM-DD`
    let file_layer = settings
        .log_dir
        .as_ref()
        .map(|dir| {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .build(dir)
                .with_context(|| format!("Failed to open log directory {}", dir.display()))?;
            Ok::<_, anyhow::Error>(
                fmt::layer()
                    .json()
                    .with_writer(file_appender)
                    .with_ansi(false),
            )
        })
        .transpose()?;

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(env_filter)
        .try_init();
    Ok(())
}

/// `RUST_LOG` wins over the configured level; a blank level falls back to `warn`.
fn filter_directive<'a>(rust_log: Option<&'a str>, level: &'a str) -> &'a str {
    match rust_log.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directive) => directive,
        None if level.trim().is_empty() => FALLBACK_LEVEL,
        None => level.trim(),
    }
}
