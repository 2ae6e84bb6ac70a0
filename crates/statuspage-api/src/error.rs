use thiserror::Error;

/// Top-level error type for the `statuspage-api` crate.
///
/// Covers every failure mode of a single HTTP exchange: transport,
/// URL construction, throttling, API rejections, and body decoding.
/// `statuspage-core` wraps these with the operation and resource id.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The API key cannot be encoded as a header value.
    #[error("Invalid API key: {message}")]
    InvalidApiKey { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to build the underlying HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Throttling ──────────────────────────────────────────────────
    /// The API kept answering with the throttle status after every retry.
    #[error("Throttled by the API after {attempts} attempts: {message}")]
    Throttled { attempts: u32, message: String },

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx answer, carrying the parsed `{error, message}` body.
    #[error("HTTP {status}: {}", describe(.error.as_deref(), .message))]
    Api {
        status: u16,
        error: Option<String>,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn describe(error: Option<&str>, message: &str) -> String {
    match error {
        Some(code) if !code.is_empty() => format!("{code}: {message}"),
        _ => message.to_owned(),
    }
}

impl Error {
    /// Returns `true` if the API answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Returns `true` if the API rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }

    /// HTTP status of an API rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
