//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use statuspage_config::ConfigError;
use statuspage_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const THROTTLED: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Statuspage API")]
    #[diagnostic(
        code(statuspage::connection_failed),
        help(
            "Check network access and the API URL.\n\
             Override it with --api-url or STATUSPAGEIO_API_URL."
        )
    )]
    ConnectionFailed {
        #[source]
        source: CoreError,
    },

    #[error("Statuspage kept throttling the request")]
    #[diagnostic(
        code(statuspage::throttled),
        help("The API answered 420 on every attempt. Wait a while and try again.")
    )]
    Throttled {
        #[source]
        source: CoreError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(statuspage::auth_failed),
        help("Verify the API key in your Statuspage account settings.")
    )]
    AuthFailed {
        #[source]
        source: CoreError,
    },

    #[error("No API key configured")]
    #[diagnostic(
        code(statuspage::no_credentials),
        help(
            "Pass --api-key, set STATUSPAGEIO_API_KEY, or add api_key to {path}"
        )
    )]
    NoCredentials { path: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(statuspage::not_found),
        help("The remote object is gone. Check the page and id.")
    )]
    NotFound { message: String },

    #[error(transparent)]
    #[diagnostic(code(statuspage::api_error))]
    Api(CoreError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(statuspage::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(
        code(statuspage::declaration),
        help("Run: statuspage schema  to list accepted attributes")
    )]
    Declaration(CoreError),

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(statuspage::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(statuspage::config))]
    Config(ConfigError),

    // ── Serialization ────────────────────────────────────────────────
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Throttled { .. } => exit_code::THROTTLED,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::Declaration(_) | Self::ConfigExists { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        if err.is_transport() {
            return Self::ConnectionFailed { source: err };
        }
        if err.is_throttled() {
            return Self::Throttled { source: err };
        }
        if err.is_unauthorized() {
            return Self::AuthFailed { source: err };
        }
        if err.is_not_found() {
            return Self::NotFound {
                message: err.to_string(),
            };
        }

        match err {
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Validation { .. }
            | CoreError::RequiresReplacement { .. }
            | CoreError::UnknownResourceType(_)
            | CoreError::InvalidImportId { .. }
            | CoreError::MissingId { .. } => Self::Declaration(err),
            other => Self::Api(other),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingField {
                field: "api_key", ..
            } => Self::NoCredentials {
                path: statuspage_config::config_path().display().to_string(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
