//! ReviewLens runtime configuration schema.
//!
//! Every section has defaults, so an empty or partial YAML file is valid.

use serde::{Deserialize, Serialize};

/// Default API base, matching the dev server's `/api` prefix.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewLensConfig {
    pub api: ApiConfig,
    pub streaming: StreamingConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to. Either absolute, or a
    /// path such as `/api` served from `origin`.
    pub base_url: String,
    /// Origin a relative `base_url` is resolved against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Total timeout for non-streaming calls.
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            origin: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn is_relative(&self) -> bool {
        self.base_url.trim().starts_with('/')
    }

    /// Absolute base URL, or `None` for a relative base without an origin.
    pub fn resolved_base_url(&self) -> Option<String> {
        let base = self.base_url.trim();
        if !self.is_relative() {
            return Some(base.to_string());
        }
        let origin = self.origin.as_deref().map(str::trim).filter(|o| !o.is_empty())?;
        Some(format!("{}{}", origin.trim_end_matches('/'), base))
    }
}

// ---------------------------------------------------------------------------
// Streaming
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamingConfig {
    /// Abort a superseded summary stream instead of letting it finish.
    pub abort_superseded: bool,
}

// ---------------------------------------------------------------------------
// Catalog queries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogConfig {
    /// Retries after a failed product/review fetch.
    pub retries: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            retries: 2,
            retry_base_delay_ms: 1_000,
            retry_max_delay_ms: 30_000,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines on the console instead of human-readable text.
    pub json: bool,
    /// Directory for daily rolling NDJSON logs. No file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let cfg: ReviewLensConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, ReviewLensConfig::default());
        assert_eq!(cfg.api.base_url, DEFAULT_API_BASE);
        assert_eq!(cfg.catalog.retries, 2);
        assert!(!cfg.streaming.abort_superseded);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let yaml = "
api:
  baseUrl: https://shop.example.com/api
streaming:
  abortSuperseded: true
";
        let cfg: ReviewLensConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.api.base_url, "https://shop.example.com/api");
        assert_eq!(cfg.api.request_timeout_secs, 30);
        assert!(cfg.streaming.abort_superseded);
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn relative_base_resolves_against_origin() {
        let mut api = ApiConfig {
            base_url: "/api".to_string(),
            ..ApiConfig::default()
        };
        assert!(api.is_relative());
        assert_eq!(api.resolved_base_url(), None);

        api.origin = Some("https://shop.example.com/".to_string());
        assert_eq!(
            api.resolved_base_url().as_deref(),
            Some("https://shop.example.com/api")
        );
    }

    #[test]
    fn absolute_base_is_used_as_is() {
        assert_eq!(
            ApiConfig::default().resolved_base_url().as_deref(),
            Some(DEFAULT_API_BASE)
        );
    }
}
