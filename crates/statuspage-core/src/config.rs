// ── Runtime provider configuration ──
//
// Describes how to reach the Statuspage API. Carries credential data and
// transport tuning, but never touches disk: `statuspage-config` (or the
// orchestration host) builds a `ProviderConfig` and hands it in.

use secrecy::{ExposeSecret, SecretString};
use statuspage_api::TransportConfig;
use url::Url;

use crate::error::CoreError;

/// Configuration for a single provider instance.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API base URL (e.g., `https://api.statuspage.io/v1`).
    pub api_url: String,
    /// API key, sent as `Authorization: OAuth <api_key>`.
    pub api_key: SecretString,
    /// Timeout, user agent, and throttle retry policy.
    pub transport: TransportConfig,
}

impl ProviderConfig {
    pub fn new(api_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            api_url: api_url.into(),
            api_key,
            transport: TransportConfig::default(),
        }
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Check both required fields before any network traffic.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api_url.trim().is_empty() {
            return Err(CoreError::Config {
                message: "api_url is required".into(),
            });
        }
        Url::parse(&self.api_url).map_err(|e| CoreError::Config {
            message: format!("invalid api_url '{}': {e}", self.api_url),
        })?;
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(CoreError::Config {
                message: "api_key is required".into(),
            });
        }
        Ok(())
    }
}
