use std::time::Duration;

use tracing::instrument;

use crate::config::{RetryConfig, UpstreamConfig};
use crate::error::Result;
use crate::fpl_api::{self, ApiContext, RetryPolicy};
use crate::model::*;

/// The main entry point for talking to the FPL REST API.
///
/// `FplClient` wraps a [`reqwest::Client`] with a base URL and a
/// [`RetryPolicy`], and exposes one method per upstream endpoint.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> fpl_wrapped::Result<()> {
/// use fpl_wrapped::{FplClient, ManagerId};
///
/// let client = FplClient::new();
/// let manager: ManagerId = "1234567".parse()?;
/// let history = client.get_history(manager).await?;
/// println!("{} gameweeks played", history.current.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FplClient {
    api: ApiContext,
}

impl FplClient {
    /// Create a new client with default settings, including the default
    /// per-request timeout and user agent.
    pub fn new() -> Self {
        let defaults = UpstreamConfig::default();
        let client = reqwest::Client::builder()
            .user_agent(defaults.user_agent.clone())
            .build()
            .unwrap_or_default();
        Self::with_client(client, &defaults.base_url, RetryPolicy::default())
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, headers, or point the
    /// client at a different base URL. Requests still carry the default
    /// per-request timeout; see [`FplClient::with_timeout`].
    pub fn with_client(client: reqwest::Client, base_url: &str, retry: RetryPolicy) -> Self {
        Self {
            api: ApiContext::new(client, base_url, retry),
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            api: self.api.with_timeout(timeout),
        }
    }

    /// Build a client with the configured timeout, user agent and retry
    /// schedule.
    pub fn from_config(upstream: &UpstreamConfig, retry: &RetryConfig) -> Result<Self> {
        Ok(Self {
            api: ApiContext::from_config(upstream, retry)?,
        })
    }

    /// Fetch season metadata: gameweeks and players.
    #[instrument(skip(self))]
    pub async fn get_bootstrap(&self) -> Result<Bootstrap> {
        fpl_api::bootstrap::get_bootstrap(&self.api).await
    }

    /// Fetch a manager's profile.
    #[instrument(skip(self))]
    pub async fn get_entry(&self, manager: ManagerId) -> Result<ManagerProfile> {
        fpl_api::entry::get_entry(&self.api, manager).await
    }

    /// Fetch a manager's gameweek history and chip plays.
    #[instrument(skip(self))]
    pub async fn get_history(&self, manager: ManagerId) -> Result<ManagerHistory> {
        fpl_api::entry::get_history(&self.api, manager).await
    }

    /// Fetch every transfer a manager has made this season.
    #[instrument(skip(self))]
    pub async fn get_transfers(&self, manager: ManagerId) -> Result<Vec<TransferRecord>> {
        fpl_api::entry::get_transfers(&self.api, manager).await
    }

    /// Fetch a manager's picks for one gameweek joined with that gameweek's
    /// live player stats.
    #[instrument(skip(self))]
    pub async fn get_gameweek(&self, manager: ManagerId, gameweek: u32) -> Result<GameweekSnapshot> {
        fpl_api::gameweek::get_snapshot(&self.api, manager, gameweek).await
    }
}

impl Default for FplClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, FplError};
    use crate::test_support::silent_upstream;

    #[test]
    fn test_default_client_has_a_timeout() {
        let client = FplClient::new();
        assert_eq!(client.api.timeout, UpstreamConfig::default().timeout());
        assert_eq!(client.api.base_url, "https://fantasy.premierleague.com/api");
    }

    #[tokio::test]
    async fn test_supplied_client_is_bounded_by_timeout() {
        let (base_url, accepted) = silent_upstream().await;
        let retry = RetryPolicy {
            max_attempts: 1,
            ..RetryPolicy::default()
        };
        let client = FplClient::with_client(reqwest::Client::new(), &base_url, retry)
            .with_timeout(Duration::from_millis(200));

        let err = client.get_bootstrap().await.unwrap_err();

        assert!(matches!(err, FplError::Timeout { .. }));
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(accepted.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
