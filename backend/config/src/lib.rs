//! `reviewlens-config`: ReviewLens runtime configuration.
//!
//! Provides:
//! - Typed config schema with defaults for every section
//! - YAML loading from an explicit path, `REVIEWLENS_CONFIG`, or the platform config dir
//! - `REVIEWLENS_*` environment overrides
//! - Validation with path-tagged errors and warnings

pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use env::{apply_env_overrides, apply_env_overrides_with};
pub use io::{config_dir, config_file_path, load_config, resolve_config_path};
pub use schema::{
    ApiConfig, CatalogConfig, LoggingConfig, ReviewLensConfig, StreamingConfig, DEFAULT_API_BASE,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// A config ready for use, plus the warnings found while validating it.
///
/// Warnings are returned rather than logged because loading happens before
/// the logger exists; the caller logs them once tracing is up.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: ReviewLensConfig,
    pub path: PathBuf,
    pub warnings: Vec<ConfigValidationError>,
}

/// Load, apply env overrides, apply caller overrides, and validate.
///
/// This is the main entry point for loading a config at runtime. Any
/// validation error aborts with every error listed.
pub async fn load_and_prepare<F>(path: Option<&Path>, overrides: F) -> Result<LoadedConfig>
where
    F: FnOnce(&mut ReviewLensConfig),
{
    let path = resolve_config_path(path);
    let mut config = load_config(&path).await?;
    apply_env_overrides(&mut config)?;
    overrides(&mut config);
    finish(config, path)
}

fn finish(config: ReviewLensConfig, path: PathBuf) -> Result<LoadedConfig> {
    let report = validate(&config);
    if !report.is_valid() {
        let details: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
        bail!(
            "Invalid config ({}):\n  {}",
            path.display(),
            details.join("\n  ")
        );
    }
    Ok(LoadedConfig {
        config,
        path,
        warnings: report.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn overrides_apply_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api:\n  baseUrl: http://file.example/api\n").unwrap();

        let loaded = load_and_prepare(Some(path.as_path()), |cfg| {
            cfg.api.base_url = "http://flag.example/api".to_string();
        })
        .await
        .unwrap();
        assert_eq!(loaded.config.api.base_url, "http://flag.example/api");
        assert_eq!(loaded.path, path);
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_with_all_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api:\n  baseUrl: /api\n  requestTimeoutSecs: 0\n").unwrap();

        let err = load_and_prepare(Some(path.as_path()), |_| {}).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("api.origin"), "{msg}");
        assert!(msg.contains("api.requestTimeoutSecs"), "{msg}");
    }

    #[test]
    fn warnings_are_returned() {
        let mut cfg = ReviewLensConfig::default();
        cfg.catalog.retries = 20;
        let loaded = finish(cfg, PathBuf::from("config.yaml")).unwrap();
        assert_eq!(loaded.warnings.len(), 1);
    }
}
