// ── Core error types ──
//
// Errors surfaced to whatever drives the resource lifecycle. API failures
// are wrapped with the operation and the local resource identifier so the
// message reads like "error reading component abc123/comp_1: HTTP 500: ...".

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote errors ────────────────────────────────────────────────
    #[error("error {action} {resource} {target}: {source}")]
    Request {
        /// Present participle of the operation ("reading", "creating", ...).
        action: &'static str,
        /// Human name of the entity ("component", "component group").
        resource: &'static str,
        /// `{page}/{id}` for existing resources, `{page}` for creates.
        target: String,
        source: statuspage_api::Error,
    },

    #[error("provider validation failed: {0}")]
    Configure(#[source] statuspage_api::Error),

    // ── Declaration errors ───────────────────────────────────────────
    #[error("invalid attribute '{attribute}' on {resource}: {reason}")]
    Validation {
        resource: String,
        attribute: String,
        reason: String,
    },

    #[error("changing '{attribute}' on {resource} {id} requires replacing the resource")]
    RequiresReplacement {
        resource: String,
        attribute: String,
        id: String,
    },

    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("invalid import id '{id}': expected '<page>/<id>'")]
    InvalidImportId { id: String },

    #[error("{resource} state has no id")]
    MissingId { resource: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The wrapped API error, if this came from a remote call.
    pub fn api_error(&self) -> Option<&statuspage_api::Error> {
        match self {
            Self::Request { source, .. } | Self::Configure(source) => Some(source),
            _ => None,
        }
    }

    /// Returns `true` if the remote answered 404.
    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(statuspage_api::Error::is_not_found)
    }

    /// Returns `true` if the request kept being throttled.
    pub fn is_throttled(&self) -> bool {
        matches!(
            self.api_error(),
            Some(statuspage_api::Error::Throttled { .. })
        )
    }

    /// Returns `true` if the error is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self.api_error(), Some(statuspage_api::Error::Transport(_)))
    }

    /// Returns `true` if the API rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.api_error()
            .is_some_and(statuspage_api::Error::is_unauthorized)
    }
}
