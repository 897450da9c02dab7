//! Statute API configuration for the CLI.
//!
//! `--config FILE` reads a YAML document with the `LawApiConfig` fields;
//! without it, configuration comes from the environment.

use std::path::Path;

use anyhow::{Context, Result};
use lawlens_fetch::LawApiConfig;

/// Load the API configuration from `path`, or from the environment.
pub fn load_api_config(path: Option<&Path>) -> Result<LawApiConfig> {
    let Some(path) = path else {
        return LawApiConfig::from_env().context("invalid statute API environment configuration");
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: LawApiConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse YAML: {}", path.display()))?;
    config
        .parsed_base_url()
        .with_context(|| format!("invalid base_url in {}", path.display()))?;

    tracing::debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "loaded config file");
    Ok(config)
}
