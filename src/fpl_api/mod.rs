pub(crate) mod bootstrap;
pub(crate) mod entry;
pub(crate) mod gameweek;

use std::time::Duration;

use rand::Rng;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{RetryConfig, UpstreamConfig};
use crate::error::{FplError, Result};

/// Backoff schedule and retry predicate shared by every endpoint fetcher.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: bool,
    pub retryable: fn(&FplError) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            jitter: config.jitter,
            retryable: FplError::is_retryable,
        }
    }
}

impl RetryPolicy {
    /// Delay before the attempt following `attempt` (1-based): the base delay
    /// doubled per attempt, capped, plus up to a quarter of jitter.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        let delay = self.base_delay.saturating_mul(factor).min(self.max_delay);
        if !self.jitter || delay.is_zero() {
            return delay;
        }
        let spread = (delay.as_millis() / 4) as u64;
        let extra = rand::thread_rng().gen_range(0..=spread);
        (delay + Duration::from_millis(extra)).min(self.max_delay)
    }

    fn should_retry(&self, attempt: u32, err: &FplError) -> bool {
        attempt < self.max_attempts && (self.retryable)(err)
    }
}

/// Shared HTTP state for the endpoint fetchers.
///
/// `timeout` is applied to every request, so a caller-supplied
/// [`reqwest::Client`] without one still cannot hang a fetch.
#[derive(Debug, Clone)]
pub(crate) struct ApiContext {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) retry: RetryPolicy,
    pub(crate) timeout: Duration,
}

impl ApiContext {
    pub(crate) fn new(http: reqwest::Client, base_url: &str, retry: RetryPolicy) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
            timeout: UpstreamConfig::default().timeout(),
        }
    }

    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn from_config(upstream: &UpstreamConfig, retry: &RetryConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(upstream.timeout())
            .user_agent(upstream.user_agent.clone())
            .build()
            .map_err(|e| FplError::Http {
                url: upstream.base_url.clone(),
                source: e,
            })?;
        let context = Self::new(http, &upstream.base_url, RetryPolicy::from(retry));
        Ok(context.with_timeout(upstream.timeout()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Fetch `path` relative to the API base and parse the body as `T`,
/// retrying transient failures according to the context's policy.
pub(crate) async fn get_json<T: DeserializeOwned>(api: &ApiContext, path: &str) -> Result<T> {
    let url = api.url(path);
    let mut attempt = 1;
    loop {
        match fetch_once(api, &url, attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if api.retry.should_retry(attempt, &err) => {
                let delay = api.retry.delay_for(attempt);
                warn!(
                    url,
                    attempt,
                    kind = %err.kind(),
                    delay_ms = delay.as_millis() as u64,
                    "upstream request failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn fetch_once<T: DeserializeOwned>(api: &ApiContext, url: &str, attempt: u32) -> Result<T> {
    debug!(url, attempt, "fetching resource");

    let response = api.http.get(url).timeout(api.timeout).send().await.map_err(|e| {
        if e.is_timeout() {
            FplError::Timeout {
                url: url.to_owned(),
            }
        } else {
            FplError::Http {
                url: url.to_owned(),
                source: e,
            }
        }
    })?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(FplError::NotFound {
            url: url.to_owned(),
        });
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(FplError::UpstreamRateLimited {
            url: url.to_owned(),
        });
    }
    if !status.is_success() {
        return Err(FplError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            FplError::Timeout {
                url: url.to_owned(),
            }
        } else {
            FplError::ResponseBody {
                url: url.to_owned(),
                source: e,
            }
        }
    })?;

    parse_body(url, &body)
}

fn parse_body<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    let malformed = |reason: String| FplError::MalformedResponse {
        url: url.to_owned(),
        reason,
    };
    let trimmed = body.trim_start();
    if trimmed.is_empty() {
        return Err(malformed("empty body".to_string()));
    }
    // The API serves maintenance pages as HTML with a 200.
    if trimmed.starts_with('<') {
        return Err(malformed("html body".to_string()));
    }
    serde_json::from_str(trimmed).map_err(|e| malformed(e.to_string()))
}
