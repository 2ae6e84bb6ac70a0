//! Configuration for the Statuspage provider.
//!
//! Layered loading (defaults, TOML file, `STATUSPAGEIO_*` environment),
//! validation, and translation to `statuspage_core::ProviderConfig`.
//! The CLI applies its own flag overrides on top of [`ProviderSettings`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use statuspage_core::{ProviderConfig, RetryPolicy, TransportConfig};

/// Environment prefix; `STATUSPAGEIO_API_KEY` maps to `api_key`.
pub const ENV_PREFIX: &str = "STATUSPAGEIO_";

pub const DEFAULT_API_URL: &str = "https://api.statuspage.io/v1";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{field} is not configured (set it in the config file or {env})")]
    MissingField { field: &'static str, env: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Provider settings as read from file and environment.
#[derive(Clone, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key. Prefer `STATUSPAGEIO_API_KEY` over writing it to disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub retry: RetrySettings,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            retry: RetrySettings::default(),
        }
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Throttle (HTTP 420) retry tuning. Waits grow linearly per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_min_wait")]
    pub min_wait_secs: u64,
    #[serde(default = "default_max_wait")]
    pub max_wait_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            min_wait_secs: default_min_wait(),
            max_wait_secs: default_max_wait(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    10
}
fn default_min_wait() -> u64 {
    30
}
fn default_max_wait() -> u64 {
    120
}

impl RetrySettings {
    pub fn to_policy(self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            min_wait: Duration::from_secs(self.min_wait_secs),
            max_wait: Duration::from_secs(self.max_wait_secs),
            ..RetryPolicy::default()
        }
    }
}

impl ProviderSettings {
    /// Validate and translate into a runtime [`ProviderConfig`].
    pub fn into_provider_config(self) -> Result<ProviderConfig, ConfigError> {
        let api_url = self.api_url.trim();
        if api_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_url",
                env: format!("{ENV_PREFIX}API_URL"),
            });
        }
        Url::parse(api_url).map_err(|e| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("'{api_url}' is not a valid URL: {e}"),
        })?;

        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField {
                field: "api_key",
                env: format!("{ENV_PREFIX}API_KEY"),
            })?;

        if self.retry.min_wait_secs > self.retry.max_wait_secs {
            return Err(ConfigError::Validation {
                field: "retry".into(),
                reason: "min_wait_secs must not exceed max_wait_secs".into(),
            });
        }

        let transport = TransportConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            ..TransportConfig::default()
        }
        .with_retry(self.retry.to_policy());

        Ok(ProviderConfig::new(api_url, SecretString::from(api_key)).with_transport(transport))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "statuspage", "statuspage").map_or_else(
        || PathBuf::from(".statuspage.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Layered figment: defaults, then the TOML file, then the environment.
///
/// `path` overrides the platform config path. A missing file is not an
/// error; figment simply contributes nothing for it.
pub fn figment(path: Option<&Path>) -> Figment {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    Figment::new()
        .merge(Serialized::defaults(ProviderSettings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load settings from file + environment.
pub fn load_settings(path: Option<&Path>) -> Result<ProviderSettings, ConfigError> {
    Ok(figment(path).extract()?)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Render settings as TOML. The API key is left out unless `include_key`.
pub fn to_toml(settings: &ProviderSettings, include_key: bool) -> Result<String, ConfigError> {
    if include_key {
        return Ok(toml::to_string_pretty(settings)?);
    }
    let redacted = ProviderSettings {
        api_key: None,
        ..settings.clone()
    };
    Ok(toml::to_string_pretty(&redacted)?)
}

/// Write settings to `path`, creating parent directories.
pub fn save_settings(settings: &ProviderSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_toml(settings, true)?)?;
    Ok(())
}
