use tracing::{debug, instrument};

use crate::error::Result;
use crate::fpl_api::{self, ApiContext};
use crate::model::Bootstrap;

#[instrument(skip(api))]
pub(crate) async fn get_bootstrap(api: &ApiContext) -> Result<Bootstrap> {
    let bootstrap: Bootstrap = fpl_api::get_json(api, "bootstrap-static/").await?;
    debug!(
        events = bootstrap.events.len(),
        players = bootstrap.elements.len(),
        "parsed bootstrap metadata"
    );
    Ok(bootstrap)
}
