use tracing::{debug, instrument};

use crate::error::Result;
use crate::fpl_api::{self, ApiContext};
use crate::model::{ManagerHistory, ManagerId, ManagerProfile, TransferRecord};

#[instrument(skip(api))]
pub(crate) async fn get_entry(api: &ApiContext, manager: ManagerId) -> Result<ManagerProfile> {
    let profile: ManagerProfile = fpl_api::get_json(api, &format!("entry/{manager}/")).await?;
    debug!(%manager, team = %profile.name, "parsed manager entry");
    Ok(profile)
}

#[instrument(skip(api))]
pub(crate) async fn get_history(api: &ApiContext, manager: ManagerId) -> Result<ManagerHistory> {
    let history: ManagerHistory =
        fpl_api::get_json(api, &format!("entry/{manager}/history/")).await?;
    debug!(
        %manager,
        gameweeks = history.current.len(),
        chips = history.chips.len(),
        "parsed manager history"
    );
    Ok(history)
}

#[instrument(skip(api))]
pub(crate) async fn get_transfers(
    api: &ApiContext,
    manager: ManagerId,
) -> Result<Vec<TransferRecord>> {
    let transfers: Vec<TransferRecord> =
        fpl_api::get_json(api, &format!("entry/{manager}/transfers/")).await?;
    debug!(%manager, count = transfers.len(), "parsed transfers");
    Ok(transfers)
}
