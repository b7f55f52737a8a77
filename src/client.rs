use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, RETRY_AFTER, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::errors::{MediaError, Result};
use crate::validation;

const DEFAULT_BASE_URL: &str = "https://management.azure.com";
const DEFAULT_API_VERSION: &str = "2023-01-01";
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub(crate) const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub(crate) const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(60 * 60);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

const USER_AGENT_VALUE: &str = concat!("mediaservices-rust/", env!("CARGO_PKG_VERSION"));

pub(crate) const PROVIDER_NAMESPACE: &str = "Microsoft.Media";

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use mediaservices::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> mediaservices::Result<()> {
/// let client = ClientBuilder::new()
///     .access_token("eyJ0eXAi...")
///     .subscription_id("00000000-0000-0000-0000-000000000000")
///     .max_retries(5)
///     .poll_interval(Duration::from_secs(2))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    access_token: Option<String>,
    subscription_id: Option<String>,
    base_url: String,
    api_version: String,
    max_retries: u32,
    timeout: Duration,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            access_token: None,
            subscription_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Set the bearer token sent with every request.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the subscription that owns the media resources.
    pub fn subscription_id(mut self, id: impl Into<String>) -> Self {
        self.subscription_id = Some(id.into());
        self
    }

    /// Override the management endpoint (defaults to `https://management.azure.com`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the `api-version` query parameter (defaults to `2023-01-01`).
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the maximum number of retries for transient errors (defaults to 3).
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set the HTTP request timeout (defaults to 60 seconds).
    pub fn timeout(mut self, d: Duration) -> Self {
        self.timeout = d;
        self
    }

    /// Delay between long-running operation polls when the service sends no
    /// `Retry-After` (defaults to 5 seconds).
    pub fn poll_interval(mut self, d: Duration) -> Self {
        self.poll_interval = d;
        self
    }

    /// Give up on a long-running operation after this long (defaults to 1 hour).
    pub fn poll_timeout(mut self, d: Duration) -> Self {
        self.poll_timeout = d;
        self
    }

    /// Build the [`Client`].
    ///
    /// Unset credentials fall back to the `AZURE_ACCESS_TOKEN` and
    /// `AZURE_SUBSCRIPTION_ID` environment variables.
    ///
    /// Returns [`MediaError::Authentication`] if no token is available and
    /// [`MediaError::Validation`] for a malformed subscription id or base URL.
    pub fn build(self) -> Result<Client> {
        let access_token = self
            .access_token
            .or_else(|| std::env::var("AZURE_ACCESS_TOKEN").ok())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MediaError::Authentication {
                message: "access token is required. Pass it to ClientBuilder::access_token() \
                          or set the AZURE_ACCESS_TOKEN environment variable."
                    .into(),
            })?;

        let subscription_id = self
            .subscription_id
            .or_else(|| std::env::var("AZURE_SUBSCRIPTION_ID").ok())
            .unwrap_or_default();
        validation::subscription_id(&subscription_id)?;

        if self.api_version.is_empty() {
            return Err(MediaError::validation("apiVersion", "must not be empty"));
        }
        if self.poll_interval.is_zero() {
            return Err(MediaError::validation("pollInterval", "must be greater than zero"));
        }

        let base_url = Url::parse(self.base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(MediaError::validation(
                "baseUrl",
                "must be an absolute http(s) URL",
            ));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(MediaError::Http)?;

        Ok(Client {
            base_url,
            subscription_id,
            access_token,
            api_version: self.api_version,
            http,
            max_retries: self.max_retries,
            poll_interval: self.poll_interval,
            poll_timeout: self.poll_timeout,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The media services management client.
///
/// Use [`Client::new`] for quick construction or [`ClientBuilder`] for full control.
/// Resource operations live in per-resource `impl` blocks; every method validates
/// its arguments before sending anything.
///
/// # Example
///
/// ```no_run
/// use mediaservices::Client;
///
/// # async fn example() -> mediaservices::Result<()> {
/// let client = Client::new("00000000-0000-0000-0000-000000000000", "eyJ0eXAi...")?;
///
/// let asset = client.get_asset("media-rg", "contosomedia", "input-asset").await?;
/// println!("container: {:?}", asset.properties.container);
/// # Ok(())
/// # }
/// ```
pub struct Client {
    base_url: Url,
    subscription_id: String,
    access_token: String,
    api_version: String,
    http: reqwest::Client,
    max_retries: u32,
    pub(crate) poll_interval: Duration,
    pub(crate) poll_timeout: Duration,
}

/// A fully-read HTTP response.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub text: String,
}

impl RawResponse {
    pub(crate) fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        decode_body(&self.text)
    }
}

impl Client {
    /// Create a new client with the given subscription and bearer token and
    /// default settings.
    ///
    /// For customization, use [`ClientBuilder`] instead.
    pub fn new(subscription_id: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        ClientBuilder::new()
            .subscription_id(subscription_id)
            .access_token(access_token)
            .build()
    }

    /// The subscription this client operates on.
    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// The `api-version` sent with every request.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    // -----------------------------------------------------------------------
    // URL construction
    // -----------------------------------------------------------------------

    /// `{base}/{segments...}?api-version=...` with each segment percent-encoded.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MediaError::validation("baseUrl", "must be an absolute http(s) URL"))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    /// URL below `/subscriptions/{subscriptionId}`.
    pub(crate) fn subscription_url(&self, segments: &[&str]) -> Result<Url> {
        let mut all = vec!["subscriptions", self.subscription_id.as_str()];
        all.extend_from_slice(segments);
        self.url(&all)
    }

    /// URL below a media services account; validates the resource group and
    /// account name.
    pub(crate) fn account_url(
        &self,
        resource_group: &str,
        account_name: &str,
        segments: &[&str],
    ) -> Result<Url> {
        validation::resource_group(resource_group)?;
        validation::account_name(account_name)?;

        let mut all = vec![
            "resourceGroups",
            resource_group,
            "providers",
            PROVIDER_NAMESPACE,
            "mediaServices",
            account_name,
        ];
        all.extend_from_slice(segments);
        self.subscription_url(&all)
    }

    /// Parse an absolute URL handed out by the service (next-links, operation
    /// status URLs) and make sure it carries an `api-version`.
    pub(crate) fn service_url(&self, raw: &str) -> Result<Url> {
        let mut url = Url::parse(raw)?;
        let has_version = url.query_pairs().any(|(k, _)| k == "api-version");
        if !has_version {
            url.query_pairs_mut()
                .append_pair("api-version", &self.api_version);
        }
        Ok(url)
    }

    // -----------------------------------------------------------------------
    // Typed request helpers
    // -----------------------------------------------------------------------

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.execute(Method::GET, url, None).await?.decode()
    }

    pub(crate) async fn put<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PUT, url, Some(body)).await?.decode()
    }

    pub(crate) async fn patch<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PATCH, url, Some(body)).await?.decode()
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        self.execute(Method::POST, url, body).await?.decode()
    }

    /// DELETE; 200 and 204 both count as success.
    pub(crate) async fn delete(&self, url: Url) -> Result<()> {
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Execute an HTTP request with automatic retry for transient failures.
    ///
    /// Retries are performed for:
    /// - HTTP 5xx server errors
    /// - HTTP 429 rate-limit responses (honoring `Retry-After`)
    /// - Network-level errors (connection refused, timeout, etc.)
    ///
    /// Exponential backoff is applied: 1s, 2s, 4s, ... capped at 30s.
    pub(crate) async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse> {
        let mut attempt = 0;

        loop {
            let err = match self.execute_once(method.clone(), url.clone(), body.as_ref()).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.max_retries => e,
                Err(e) => return Err(e),
            };

            attempt += 1;
            let backoff = match &err {
                MediaError::RateLimit {
                    retry_after: Some(after),
                    ..
                } => *after,
                _ => Duration::from_secs(1 << (attempt - 1).min(5)),
            }
            .min(MAX_BACKOFF);

            warn!(
                error = %err,
                %method,
                retry = attempt,
                max_retries = self.max_retries,
                backoff_ms = backoff.as_millis() as u64,
                "retrying request"
            );

            tokio::time::sleep(backoff).await;
        }
    }

    /// Make a single request without retry.
    async fn execute_once(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<RawResponse> {
        debug!(%method, url = %url, "sending request");

        let mut req = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token));

        if let Some(b) = body {
            req = req.json(b);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let text = response.text().await?;

        if (200..300).contains(&status) {
            return Ok(RawResponse {
                status,
                headers,
                text,
            });
        }

        debug!(status, "request failed");
        Err(MediaError::from_response(status, &text, retry_after(&headers)))
    }
}

/// Parse a `Retry-After` header given in whole seconds.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Deserialize a response body; an empty body reads as JSON `null` so that
/// `()` and `Option<T>` targets accept 202/204 responses.
pub(crate) fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    let text = if text.trim().is_empty() { "null" } else { text };
    Ok(serde_json::from_str(text)?)
}
