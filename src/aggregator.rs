use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::client::FplClient;
use crate::config::PipelineConfig;
use crate::error::{FplError, Result};
use crate::model::*;

/// Everything fetched for one manager, ready for statistic derivation.
#[derive(Debug, Clone)]
pub struct SeasonBundle {
    pub manager_id: ManagerId,
    pub profile: ManagerProfile,
    pub bootstrap: Bootstrap,
    pub history: ManagerHistory,
    /// `None` when the transfers endpoint failed.
    pub transfers: Option<Vec<TransferRecord>>,
    /// Picks joined with live stats for the trailing window, in gameweek order.
    pub snapshots: Vec<GameweekSnapshot>,
    pub current_gameweek: u32,
    pub last_finished_gameweek: u32,
}

impl SeasonBundle {
    /// History entries up to and including the last finished gameweek.
    /// Entries are keyed by gameweek, not position, so managers who joined
    /// late keep every finished entry.
    pub fn finished_history(&self) -> &[SeasonHistoryEntry] {
        let len = self
            .history
            .current
            .partition_point(|entry| entry.gameweek <= self.last_finished_gameweek);
        &self.history.current[..len]
    }
}

/// Orchestrates the upstream calls needed for one season summary.
#[derive(Debug, Clone)]
pub struct SeasonAggregator {
    client: FplClient,
    gameweek_window: u32,
    gameweek_delay: Duration,
}

impl SeasonAggregator {
    pub fn new(client: FplClient, pipeline: &PipelineConfig) -> Self {
        Self {
            client,
            gameweek_window: pipeline.gameweek_window,
            gameweek_delay: pipeline.gameweek_delay(),
        }
    }

    /// Fetch bootstrap, entry and history (all required) alongside transfers
    /// (optional), then the trailing window of gameweek snapshots.
    #[instrument(skip(self))]
    pub async fn collect(&self, manager: ManagerId) -> Result<SeasonBundle> {
        // Transfers never fail the join, but an essential failure drops them
        // mid-retry.
        let transfers = async {
            match self.client.get_transfers(manager).await {
                Ok(transfers) => Ok::<_, FplError>(Some(transfers)),
                Err(err) => {
                    warn!(%manager, kind = %err.kind(), error = %err, "transfers unavailable, continuing without them");
                    Ok(None)
                }
            }
        };
        let (bootstrap, profile, history, transfers) = tokio::try_join!(
            self.client.get_bootstrap(),
            self.client.get_entry(manager),
            self.client.get_history(manager),
            transfers,
        )?;

        let current_gameweek = bootstrap.current_gameweek(SEASON_GAMEWEEKS);
        let last_finished_gameweek = last_finished_gameweek(current_gameweek, &history.current);
        let first_gameweek = profile.started_event.unwrap_or(1).max(1);
        let window: Vec<u32> =
            gameweek_window(last_finished_gameweek, self.gameweek_window)
                .filter(|gw| *gw >= first_gameweek)
                .collect();

        let snapshots = self.collect_window(manager, &window).await;
        info!(
            %manager,
            current_gameweek,
            last_finished_gameweek,
            requested = window.len(),
            fetched = snapshots.len(),
            "collected season data"
        );

        Ok(SeasonBundle {
            manager_id: manager,
            profile,
            bootstrap,
            history,
            transfers,
            snapshots,
            current_gameweek,
            last_finished_gameweek,
        })
    }

    /// Gameweeks are fetched in increasing order, one at a time, with a pause
    /// in between so the upstream limiter is not tripped. Failures skip the
    /// gameweek.
    async fn collect_window(&self, manager: ManagerId, window: &[u32]) -> Vec<GameweekSnapshot> {
        let mut snapshots = Vec::with_capacity(window.len());
        for (i, &gameweek) in window.iter().enumerate() {
            if i > 0 && !self.gameweek_delay.is_zero() {
                tokio::time::sleep(self.gameweek_delay).await;
            }
            match self.client.get_gameweek(manager, gameweek).await {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(err) => {
                    warn!(%manager, gameweek, kind = %err.kind(), error = %err, "skipping gameweek")
                }
            }
        }
        snapshots
    }
}

/// `min(current - 1, latest history gameweek)`, or 0 with no history.
pub fn last_finished_gameweek(current_gameweek: u32, history: &[SeasonHistoryEntry]) -> u32 {
    let latest = history.iter().map(|entry| entry.gameweek).max().unwrap_or(0);
    current_gameweek.saturating_sub(1).min(latest)
}

/// The trailing `window` gameweeks ending at `last_finished`.
pub fn gameweek_window(last_finished: u32, window: u32) -> std::ops::RangeInclusive<u32> {
    let window = window.max(1);
    // Empty when nothing has finished yet.
    let first = last_finished.saturating_sub(window - 1).max(1);
    first..=last_finished
}
