use std::time::Duration;

use abacus_domain::constants::{
    DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS, DEFAULT_RETRY_BACKOFF_MS,
    MAX_RETRY_AFTER_SECS,
};
use abacus_domain::AbacusError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client as ReqwestClient, Method, Request, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// Which requests are retried, and how long to wait in between.
///
/// Only idempotent methods are ever repeated. Lead creation (`POST`) always
/// gets a single attempt, whatever the configured attempt count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    base_backoff: Duration,
    max_retry_after: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            max_retry_after: Duration::from_secs(MAX_RETRY_AFTER_SECS),
        }
    }
}

impl RetryPolicy {
    /// Attempts allowed for `method`, including the first.
    pub fn attempts_for(&self, method: &Method) -> usize {
        if is_idempotent(method) {
            self.max_attempts.max(1)
        } else {
            1
        }
    }

    /// Rate limiting and gateway-side failures are worth another try.
    /// A plain 500 usually means the API choked on the request itself.
    pub fn retries_status(status: StatusCode) -> bool {
        matches!(
            status,
            StatusCode::TOO_MANY_REQUESTS
                | StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT
        )
    }

    /// Wait before retry number `retry` (1-based).
    ///
    /// A server-provided `Retry-After` wins over the exponential backoff.
    /// Returns `None` when the server asks for a longer pause than this
    /// policy tolerates; the caller then gives up with the response it has.
    pub fn delay(&self, retry: usize, retry_after: Option<Duration>) -> Option<Duration> {
        match retry_after {
            Some(wait) if wait > self.max_retry_after => None,
            Some(wait) => Some(wait),
            None => {
                let shift = retry.saturating_sub(1).min(8) as u32;
                Some(self.base_backoff.saturating_mul(1u32 << shift))
            }
        }
    }
}

fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS | Method::PUT | Method::DELETE)
}

/// `Retry-After` in its delta-seconds form. HTTP dates are ignored and fall
/// back to the regular backoff.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

fn retries_error(err: &reqwest::Error) -> bool {
    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return true;
    }
    err.is_timeout()
}

fn to_domain(err: reqwest::Error) -> AbacusError {
    AbacusError::from(InfraError::from(err))
}

/// HTTP client shared by the lead and listings API clients.
///
/// [`send`](Self::send) applies the [`RetryPolicy`]; reads of lead and
/// listing pages ride out rate limiting and gateway hiccups.
/// [`send_once`](Self::send_once) makes exactly one attempt and hands back
/// the raw reqwest error so submissions can classify it for the user.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    policy: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client with default timeout and retry policy.
    pub fn new() -> Result<Self, AbacusError> {
        Self::builder().build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    pub fn max_attempts(&self) -> usize {
        self.policy.max_attempts
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send `builder`, retrying idempotent requests per the policy.
    ///
    /// When retries run out the last response is returned as-is, so callers
    /// still see the API's status and message.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, AbacusError> {
        let first = builder.try_clone().map(RequestBuilder::build);
        let request = match first {
            Some(built) => built.map_err(to_domain)?,
            // Streaming bodies can not be replayed.
            None => {
                let request = builder.build().map_err(to_domain)?;
                return self.execute(request).await.map_err(to_domain);
            }
        };

        let attempts = self.policy.attempts_for(request.method());
        let mut next = Some(request);
        let mut attempt = 1;

        while let Some(request) = next.take() {
            let method = request.method().clone();
            let url = request.url().clone();
            let more = attempt < attempts;

            match self.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    if !more || !RetryPolicy::retries_status(status) {
                        return Ok(response);
                    }
                    let Some(wait) = self.policy.delay(attempt, retry_after(response.headers()))
                    else {
                        warn!(%method, %url, %status, "retry-after exceeds the allowed wait");
                        return Ok(response);
                    };
                    let wait_ms = wait.as_millis() as u64;
                    debug!(%method, %url, %status, attempt, wait_ms, "retrying");
                    tokio::time::sleep(wait).await;
                }
                Err(err) => {
                    if !more || !retries_error(&err) {
                        return Err(to_domain(err));
                    }
                    let wait = self.policy.delay(attempt, None).unwrap_or_default();
                    debug!(%method, %url, error = %err, attempt, "retrying after transport error");
                    tokio::time::sleep(wait).await;
                }
            }

            attempt += 1;
            next = builder.try_clone().map(RequestBuilder::build).transpose().map_err(to_domain)?;
        }

        Err(AbacusError::Internal("request could not be rebuilt for retry".into()))
    }

    /// Send `builder` exactly once.
    pub async fn send_once(&self, builder: RequestBuilder) -> Result<Response, reqwest::Error> {
        self.execute(builder.build()?).await
    }

    async fn execute(&self, request: Request) -> Result<Response, reqwest::Error> {
        let method = request.method().clone();
        let url = request.url().clone();

        let result = self.client.execute(request).await;
        match &result {
            Ok(response) => debug!(%method, %url, status = %response.status(), "response"),
            Err(err) => debug!(%method, %url, error = %err, "request failed"),
        }
        result
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    policy: RetryPolicy,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            policy: RetryPolicy::default(),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    /// Per-request timeout, applied to every attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts for idempotent requests (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.policy.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.policy.base_backoff = backoff;
        self
    }

    /// Longest `Retry-After` worth waiting for.
    pub fn max_retry_after(mut self, limit: Duration) -> Self {
        self.policy.max_retry_after = limit;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, AbacusError> {
        let agent = self
            .user_agent
            .unwrap_or_else(|| format!("abacus/{}", env!("CARGO_PKG_VERSION")));
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .no_proxy()
            .user_agent(agent)
            .build()
            .map_err(to_domain)?;

        Ok(HttpClient { client, policy: self.policy })
    }
}
