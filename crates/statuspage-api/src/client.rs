// Async HTTP client for the Statuspage.io REST API.
//
// Base path: whatever `api_url` points at (e.g. https://api.statuspage.io/v1/)
// Auth: `Authorization: OAuth <api_key>` header

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::Error;
use crate::models::ApiErrorBody;
use crate::transport::{RetryPolicy, TransportConfig};

/// Path probed to validate credentials.
const HEALTH_CHECK_PATH: &str = "pages";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Statuspage REST API.
///
/// Immutable after construction: it holds the base URL, an HTTP client with
/// the auth header baked in, and the throttle retry policy. Share it behind
/// an `Arc` across as many resources as needed.
#[derive(Debug, Clone)]
pub struct StatuspageClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl StatuspageClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config without touching the network.
    ///
    /// Injects `Authorization: OAuth <api_key>` as a default header.
    pub fn new(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("OAuth {}", api_key.expose_secret()))
            .map_err(|e| Error::InvalidApiKey {
                message: format!("invalid header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = transport.build_client_with_headers(headers)?;
        Self::from_reqwest(base_url, http, transport.retry)
    }

    /// Build the client and validate it with one `GET pages` round trip.
    pub async fn connect(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let client = Self::new(base_url, api_key, transport)?;
        info!(base_url = %client.base_url, "statuspage client initialized, now validating");
        client.validate().await?;
        info!("statuspage client successfully validated");
        Ok(client)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        retry: RetryPolicy,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            retry,
        })
    }

    /// Parse the base URL and make sure it ends with `/` so relative
    /// segments append instead of replacing the last path component.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The retry policy applied to throttled responses.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append percent-encoded path segments onto the base URL.
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Base URLs are checked in `normalize_base_url`, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let resp = self.send(Method::GET, segments, None::<&()>).await?;
        handle_response(resp).await
    }

    pub(crate) async fn get_status(&self, segments: &[&str]) -> Result<(), Error> {
        let resp = self.send(Method::GET, segments, None::<&()>).await?;
        handle_empty(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.send(Method::POST, segments, Some(body)).await?;
        handle_response(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.send(Method::PATCH, segments, Some(body)).await?;
        handle_response(resp).await
    }

    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<(), Error> {
        let resp = self.send(Method::DELETE, segments, None::<&()>).await?;
        handle_empty(resp).await
    }

    /// Issue a request, retrying while the API answers with the throttle status.
    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.url(segments);
        let mut retries: u32 = 0;

        loop {
            debug!("{method} {url}");

            let mut builder = self.http.request(method.clone(), url.clone());
            if let Some(body) = body {
                builder = builder.json(body);
            }
            let resp = builder.send().await?;

            if !self.retry.should_retry(resp.status()) {
                return Ok(resp);
            }

            if retries >= self.retry.max_retries {
                let status = resp.status();
                let message = parse_error(status, resp).await.to_string();
                return Err(Error::Throttled {
                    attempts: retries + 1,
                    message,
                });
            }

            retries += 1;
            let delay = self.retry.delay_for(retries);
            warn!(
                %url,
                retry = retries,
                max_retries = self.retry.max_retries,
                delay_secs = delay.as_secs_f64(),
                "throttled by API, backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Credential probe: `GET pages` must answer 2xx.
    pub async fn validate(&self) -> Result<(), Error> {
        self.get_status(&[HEALTH_CHECK_PATH]).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();
    let reason = || {
        status
            .canonical_reason()
            .map_or_else(|| status.to_string(), str::to_owned)
    };

    match serde_json::from_str::<ApiErrorBody>(&raw) {
        Ok(body) if body.error.is_some() || body.message.is_some() => Error::Api {
            status: status.as_u16(),
            message: body.message.unwrap_or_else(reason),
            error: body.error,
        },
        _ => Error::Api {
            status: status.as_u16(),
            message: if raw.trim().is_empty() { reason() } else { raw },
            error: None,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> StatuspageClient {
        StatuspageClient::from_reqwest(base, reqwest::Client::new(), RetryPolicy::none()).unwrap()
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let c = client("https://api.statuspage.io/v1");
        assert_eq!(c.base_url().as_str(), "https://api.statuspage.io/v1/");
    }

    #[test]
    fn segments_append_to_base_path() {
        let c = client("https://api.statuspage.io/v1/");
        let url = c.url(&["pages", "abc123", "components", "comp_1"]);
        assert_eq!(
            url.as_str(),
            "https://api.statuspage.io/v1/pages/abc123/components/comp_1"
        );
    }

    #[test]
    fn segments_are_percent_encoded() {
        let c = client("http://localhost:8080");
        let url = c.url(&["pages", "a/b", "components"]);
        assert_eq!(url.as_str(), "http://localhost:8080/pages/a%2Fb/components");
    }

    #[test]
    fn rejects_non_base_urls() {
        let result =
            StatuspageClient::from_reqwest("mailto:ops@example.com", reqwest::Client::new(), RetryPolicy::none());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
