//! Config file location and loading.

use crate::schema::ReviewLensConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

pub const ENV_CONFIG_DIR: &str = "REVIEWLENS_CONFIG_DIR";
pub const ENV_CONFIG_FILE: &str = "REVIEWLENS_CONFIG";

/// Resolve the ReviewLens config directory.
/// Priority: `REVIEWLENS_CONFIG_DIR` env > `<platform config dir>/reviewlens` > `./.reviewlens`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    match dirs::config_dir() {
        Some(base) => base.join("reviewlens"),
        None => PathBuf::from(".reviewlens"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Pick the config file: explicit path, then `REVIEWLENS_CONFIG`, then the default location.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var(ENV_CONFIG_FILE) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => config_file_path(&config_dir()),
    }
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_config(path: &Path) -> Result<ReviewLensConfig> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(ReviewLensConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file is a valid "all defaults" config.
    if raw.trim().is_empty() {
        return Ok(ReviewLensConfig::default());
    }

    let config: ReviewLensConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}
