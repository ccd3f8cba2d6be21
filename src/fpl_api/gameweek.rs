use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::fpl_api::{self, ApiContext};
use crate::model::{GameweekPicks, GameweekSnapshot, LiveGameweek, ManagerId, SQUAD_SIZE};

#[instrument(skip(api))]
pub(crate) async fn get_picks(
    api: &ApiContext,
    manager: ManagerId,
    gameweek: u32,
) -> Result<GameweekPicks> {
    fpl_api::get_json(api, &format!("entry/{manager}/event/{gameweek}/picks/")).await
}

#[instrument(skip(api))]
pub(crate) async fn get_live(api: &ApiContext, gameweek: u32) -> Result<LiveGameweek> {
    fpl_api::get_json(api, &format!("event/{gameweek}/live/")).await
}

/// Fetch picks and live stats for one gameweek concurrently and join them.
#[instrument(skip(api))]
pub(crate) async fn get_snapshot(
    api: &ApiContext,
    manager: ManagerId,
    gameweek: u32,
) -> Result<GameweekSnapshot> {
    let (picks, live) = tokio::try_join!(
        get_picks(api, manager, gameweek),
        get_live(api, gameweek)
    )?;
    if picks.picks.len() != SQUAD_SIZE {
        warn!(
            %manager,
            gameweek,
            picks = picks.picks.len(),
            "unexpected squad size"
        );
    }
    let snapshot = GameweekSnapshot::new(gameweek, picks, live);
    debug!(
        %manager,
        gameweek,
        live_players = snapshot.live.len(),
        "joined gameweek snapshot"
    );
    Ok(snapshot)
}
