//! Long-running operation polling.
//!
//! Mutating calls on live events, streaming endpoints and accounts answer
//! `201`/`202` with a status URL instead of the final resource. The URL comes
//! from `Azure-AsyncOperation` when present, else from `Location`. The client
//! polls it until the operation settles, then (for PUT/PATCH) re-reads the
//! resource.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;
use url::Url;

use crate::client::{
    decode_body, retry_after, Client, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT,
};
use crate::errors::{ErrorDetail, MediaError, Result};

const ASYNC_OPERATION: &str = "azure-asyncoperation";

/// Status reported by an `Azure-AsyncOperation` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum OperationState {
    InProgress,
    Succeeded,
    Failed,
    Canceled,
    /// Any status this client does not know; treated as still running.
    #[serde(other)]
    Unknown,
}

impl OperationState {
    /// Succeeded, Failed or Canceled.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperationState::Succeeded | OperationState::Failed | OperationState::Canceled
        )
    }
}

/// Body of an `Azure-AsyncOperation` poll.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStatus {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub status: OperationState,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub percent_complete: Option<f64>,
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

/// Polling config for long-running operations and [`Client::wait_for_job`].
pub struct PollOptions<T> {
    /// Used when the service sends no `Retry-After`.
    pub interval: Duration,
    pub timeout: Duration,
    /// Called on each poll iteration with the latest state.
    #[allow(clippy::type_complexity)]
    pub on_progress: Option<Box<dyn Fn(&T) + Send + Sync>>,
}

impl<T> PollOptions<T> {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval,
            timeout,
            on_progress: None,
        }
    }

    pub fn on_progress(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    fn report(&self, value: &T) {
        if let Some(ref cb) = self.on_progress {
            cb(value);
        }
    }
}

impl<T> Default for PollOptions<T> {
    /// Same interval and timeout as a [`ClientBuilder`](crate::ClientBuilder) left at its defaults.
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollKind {
    AsyncOperation,
    Location,
}

#[derive(Debug, Clone)]
struct PollTarget {
    kind: PollKind,
    url: Url,
}

impl Client {
    /// Fetch the current state of an operation from its status URL.
    pub async fn get_operation_status(&self, status_url: &str) -> Result<OperationStatus> {
        let url = self.service_url(status_url)?;
        self.get(url).await
    }

    /// Poll an `Azure-AsyncOperation` status URL until it settles.
    ///
    /// # Errors
    ///
    /// - [`MediaError::OperationFailed`] if the operation ends `Failed` or `Canceled`.
    /// - [`MediaError::Timeout`] if polling exceeds `opts.timeout`.
    pub async fn poll_operation(
        &self,
        status_url: &str,
        opts: &PollOptions<OperationStatus>,
    ) -> Result<OperationStatus> {
        let url = self.service_url(status_url)?;
        self.drive_operation(url, opts.interval, opts.timeout, None, |status| {
            opts.report(status)
        })
        .await
    }

    /// PUT or PATCH a resource through a long-running operation and return the
    /// settled resource.
    pub(crate) async fn upsert_long_running<B, T>(
        &self,
        method: Method,
        url: Url,
        resource_url: Url,
        body: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let settled = self
            .send_long_running(method, url, Some(body), Some(resource_url))
            .await?;
        match settled {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(MediaError::InvalidResponse(
                "long-running operation finished without a resource".into(),
            )),
        }
    }

    /// POST or DELETE through a long-running operation; the final body, if
    /// any, is discarded.
    pub(crate) async fn action_long_running(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        self.send_long_running(method, url, body, None).await?;
        Ok(())
    }

    /// Send a request and, when the service answers with a polling header,
    /// poll until the operation settles.
    ///
    /// When `final_url` is set, a successful operation is followed by a GET on
    /// it and that body is returned. Otherwise the last response body (if
    /// any) is returned.
    pub(crate) async fn send_long_running(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
        final_url: Option<Url>,
    ) -> Result<Option<serde_json::Value>> {
        let response = self.execute(method.clone(), url, body).await?;

        let Some(target) = poll_target(&response.headers)? else {
            if response.status == 202 {
                return Err(MediaError::InvalidResponse(format!(
                    "{method} accepted without Azure-AsyncOperation or Location header"
                )));
            }
            return response.decode();
        };

        debug!(%method, kind = ?target.kind, url = %target.url, "waiting on long-running operation");

        let first_delay = retry_after(&response.headers).unwrap_or(self.poll_interval);
        let url = self.service_url(target.url.as_str())?;
        let last_body = match target.kind {
            PollKind::AsyncOperation => {
                self.drive_operation(
                    url,
                    self.poll_interval,
                    self.poll_timeout,
                    Some(first_delay),
                    |_| {},
                )
                .await?;
                None
            }
            PollKind::Location => self.drive_location(url, first_delay).await?,
        };

        match final_url {
            Some(url) => Ok(Some(self.get(url).await?)),
            None => Ok(last_body),
        }
    }

    /// Poll an async-operation URL until it reaches a terminal state.
    ///
    /// `first_delay` is waited before the first poll; `None` polls at once.
    async fn drive_operation<F>(
        &self,
        url: Url,
        interval: Duration,
        timeout: Duration,
        first_delay: Option<Duration>,
        report: F,
    ) -> Result<OperationStatus>
    where
        F: Fn(&OperationStatus),
    {
        let deadline = Instant::now() + timeout;
        let mut delay = first_delay;

        loop {
            if let Some(delay) = delay {
                pause(deadline, delay, timeout).await?;
            }

            let response = self.execute(Method::GET, url.clone(), None).await?;
            let status: OperationStatus = response.decode()?;
            debug!(url = %url, status = ?status.status, "polled operation");
            report(&status);

            match status.status {
                OperationState::Succeeded => return Ok(status),
                OperationState::Failed | OperationState::Canceled => {
                    return Err(MediaError::OperationFailed {
                        status: status.status,
                        error: status.error,
                    })
                }
                OperationState::InProgress | OperationState::Unknown => {}
            }

            delay = Some(retry_after(&response.headers).unwrap_or(interval));
        }
    }

    /// Poll a `Location` URL until it stops answering `202`, returning the
    /// final body.
    async fn drive_location(
        &self,
        url: Url,
        first_delay: Duration,
    ) -> Result<Option<serde_json::Value>> {
        let deadline = Instant::now() + self.poll_timeout;
        let mut delay = first_delay;

        loop {
            pause(deadline, delay, self.poll_timeout).await?;

            let response = self.execute(Method::GET, url.clone(), None).await?;
            debug!(url = %url, status = response.status, "polled location");
            if response.status != 202 {
                return decode_body(&response.text);
            }

            delay = retry_after(&response.headers).unwrap_or(self.poll_interval);
        }
    }
}

/// Sleep for `delay`, cut short at `deadline`. Fails with `Timeout` only once
/// the deadline has already passed, so a clamped sleep is always followed by
/// one more poll.
pub(crate) async fn pause(deadline: Instant, delay: Duration, timeout: Duration) -> Result<()> {
    let now = Instant::now();
    if now >= deadline {
        return Err(MediaError::Timeout(timeout));
    }
    tokio::time::sleep(delay.min(deadline - now)).await;
    Ok(())
}

/// Pick the status URL out of an initial response, preferring
/// `Azure-AsyncOperation` over `Location`.
fn poll_target(headers: &HeaderMap) -> Result<Option<PollTarget>> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let target = match (header(ASYNC_OPERATION), header(LOCATION.as_str())) {
        (Some(url), _) => Some((PollKind::AsyncOperation, url)),
        (None, Some(url)) => Some((PollKind::Location, url)),
        (None, None) => None,
    };

    target
        .map(|(kind, url)| {
            Ok(PollTarget {
                kind,
                url: Url::parse(url)?,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn prefers_async_operation_header() {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static("https://h/loc"));
        headers.insert(
            "Azure-AsyncOperation",
            HeaderValue::from_static("https://h/op"),
        );
        let target = poll_target(&headers).unwrap().unwrap();
        assert_eq!(target.kind, PollKind::AsyncOperation);
        assert_eq!(target.url.as_str(), "https://h/op");
    }

    #[test]
    fn falls_back_to_location() {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static("https://h/loc"));
        let target = poll_target(&headers).unwrap().unwrap();
        assert_eq!(target.kind, PollKind::Location);
    }

    #[test]
    fn no_headers_means_no_polling() {
        assert!(poll_target(&HeaderMap::new()).unwrap().is_none());
    }

    #[test]
    fn relative_location_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static("/relative/path"));
        assert!(matches!(poll_target(&headers), Err(MediaError::Url(_))));
    }

    #[test]
    fn unknown_status_is_not_terminal() {
        let status: OperationStatus =
            serde_json::from_str(r#"{"name":"op","status":"Deallocating"}"#).unwrap();
        assert_eq!(status.status, OperationState::Unknown);
        assert!(!status.status.is_terminal());
    }

    #[tokio::test]
    async fn pause_past_deadline_times_out() {
        let deadline = Instant::now();
        let err = pause(deadline, Duration::from_secs(10), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Timeout(d) if d == Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn pause_is_cut_short_at_deadline() {
        let start = Instant::now();
        pause(
            start + Duration::from_millis(50),
            Duration::from_secs(10),
            Duration::from_millis(50),
        )
        .await
        .unwrap();
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn failed_status_carries_error() {
        let status: OperationStatus = serde_json::from_str(
            r#"{"status":"Failed","error":{"code":"LiveEventStartFailed","message":"no capacity"}}"#,
        )
        .unwrap();
        assert!(status.status.is_terminal());
        assert_eq!(status.error.unwrap().code, "LiveEventStartFailed");
    }
}
