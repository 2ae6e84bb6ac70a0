//! CLI-specific configuration wrappers.
//!
//! Loads settings through `statuspage-config` and layers the global flags
//! (`--api-url`, `--api-key`, `--timeout`) on top.

use std::path::PathBuf;

use statuspage_config::ProviderSettings;
use statuspage_core::ProviderConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The config file this invocation reads and writes.
pub fn active_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(statuspage_config::config_path)
}

/// Effective settings: file + environment, then flag overrides.
pub fn effective_settings(global: &GlobalOpts) -> Result<ProviderSettings, CliError> {
    let path = active_path(global);
    let mut settings = statuspage_config::load_settings(Some(&path))?;

    if let Some(ref url) = global.api_url {
        settings.api_url.clone_from(url);
    }
    if let Some(ref key) = global.api_key {
        settings.api_key = Some(key.clone());
    }
    if let Some(timeout) = global.timeout {
        settings.timeout_secs = timeout;
    }

    Ok(settings)
}

/// Build a validated `ProviderConfig` for commands that talk to the API.
pub fn provider_config(global: &GlobalOpts) -> Result<ProviderConfig, CliError> {
    Ok(effective_settings(global)?.into_provider_config()?)
}
