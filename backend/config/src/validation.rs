//! Config validation with path-tagged errors and warnings.

use crate::schema::ReviewLensConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &ReviewLensConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_api(config, &mut report);
    validate_catalog(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_api(config: &ReviewLensConfig, report: &mut ValidationReport) {
    let api = &config.api;
    let base = api.base_url.trim();
    if base.is_empty() {
        report.error("api.baseUrl", "API base URL cannot be empty");
    } else if api.is_relative() {
        if api.resolved_base_url().is_none() {
            report.error(
                "api.origin",
                format!("Relative baseUrl '{base}' needs an origin, e.g. http://localhost:3000"),
            );
        }
    } else if !(base.starts_with("http://") || base.starts_with("https://")) {
        report.error("api.baseUrl", format!("'{base}' must be http(s) or start with '/'"));
    }
    if config.api.request_timeout_secs == 0 {
        report.error("api.requestTimeoutSecs", "requestTimeoutSecs must be >= 1");
    }
    if config.api.connect_timeout_secs == 0 {
        report.error("api.connectTimeoutSecs", "connectTimeoutSecs must be >= 1");
    }
}

fn validate_catalog(config: &ReviewLensConfig, report: &mut ValidationReport) {
    let catalog = &config.catalog;
    if catalog.retries > 10 {
        report.warn(
            "catalog.retries",
            format!("{} retries is unusually high for interactive use", catalog.retries),
        );
    }
    if catalog.retry_max_delay_ms < catalog.retry_base_delay_ms {
        report.error(
            "catalog.retryMaxDelayMs",
            "retryMaxDelayMs must be >= retryBaseDelayMs",
        );
    }
}

fn validate_logging(config: &ReviewLensConfig, report: &mut ValidationReport) {
    if config.logging.level.trim().is_empty() {
        report.warn("logging.level", "Empty log level; falling back to 'warn'");
    }
    if let Some(dir) = &config.logging.log_dir {
        if dir.trim().is_empty() {
            report.error("logging.logDir", "logDir cannot be empty when set");
        }
    }
}
