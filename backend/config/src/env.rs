//! Environment variable overrides.
//!
//! Applied after the config file. Unset or blank variables leave the file
//! value alone; unparsable ones are reported instead of silently ignored.

use anyhow::{anyhow, Result};
use std::collections::HashMap;

use crate::schema::ReviewLensConfig;

pub const ENV_API_BASE: &str = "REVIEWLENS_API_BASE";
pub const ENV_API_ORIGIN: &str = "REVIEWLENS_API_ORIGIN";
pub const ENV_LOG_LEVEL: &str = "REVIEWLENS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "REVIEWLENS_LOG_DIR";
pub const ENV_ABORT_SUPERSEDED: &str = "REVIEWLENS_ABORT_SUPERSEDED";
pub const ENV_CATALOG_RETRIES: &str = "REVIEWLENS_CATALOG_RETRIES";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut ReviewLensConfig) -> Result<()> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
pub fn apply_env_overrides_with(
    config: &mut ReviewLensConfig,
    env: &HashMap<String, String>,
) -> Result<()> {
    if let Some(base) = non_empty(env, ENV_API_BASE) {
        config.api.base_url = base.to_string();
    }
    if let Some(origin) = non_empty(env, ENV_API_ORIGIN) {
        config.api.origin = Some(origin.to_string());
    }
    if let Some(level) = non_empty(env, ENV_LOG_LEVEL) {
        config.logging.level = level.to_string();
    }
    if let Some(dir) = non_empty(env, ENV_LOG_DIR) {
        config.logging.log_dir = Some(dir.to_string());
    }
    if let Some(raw) = non_empty(env, ENV_ABORT_SUPERSEDED) {
        config.streaming.abort_superseded = parse_bool(raw)
            .ok_or_else(|| anyhow!("{ENV_ABORT_SUPERSEDED} must be a boolean, got {raw:?}"))?;
    }
    if let Some(raw) = non_empty(env, ENV_CATALOG_RETRIES) {
        config.catalog.retries = raw
            .parse()
            .map_err(|_| anyhow!("{ENV_CATALOG_RETRIES} must be a number, got {raw:?}"))?;
    }
    Ok(())
}

fn non_empty<'a>(env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
