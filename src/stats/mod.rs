//! Pure derivations from a [`SeasonBundle`] to a [`DerivedSeasonSummary`].
//!
//! Nothing here performs I/O or draws randomness: the same bundle always
//! yields the same summary, fallbacks included.

pub mod badges;
pub mod bench;
pub mod captain;
pub mod players;
pub mod ranks;
pub mod season;
pub mod transfers;

use std::str::FromStr;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::aggregator::SeasonBundle;
use crate::model::{Chip, ChipPlay, ChipUsage, DerivedSeasonSummary};

const TOP_CONTRIBUTORS: usize = 3;

/// Build the full season summary from fetched data.
#[instrument(skip(bundle), fields(manager = %bundle.manager_id))]
pub fn derive_summary(bundle: &SeasonBundle) -> DerivedSeasonSummary {
    let history = bundle.finished_history();
    let snapshots = &bundle.snapshots;
    let bootstrap = &bundle.bootstrap;

    let totals = season::season_totals(history, &bundle.profile);
    let tallies = players::tally_players(snapshots);

    let mut summary = DerivedSeasonSummary {
        manager_id: bundle.manager_id.get(),
        manager_name: bundle.profile.display_name(),
        team_name: bundle.profile.name.trim().to_string(),
        total_points: totals.total_points,
        overall_rank: totals.overall_rank,
        best_rank: totals.best_rank,
        gameweeks_played: totals.gameweeks_played,
        average_points_per_gameweek: totals.average_points_per_gameweek,
        best_gameweek: totals.best_gameweek,
        worst_gameweek: totals.worst_gameweek,
        rank_movement: ranks::rank_movement(history),
        captaincy: captain::captain_summary(snapshots, bootstrap, history),
        bench: bench::bench_summary(history, snapshots, bootstrap),
        mvp: players::most_valuable_player(&tallies, bootstrap, totals.total_points),
        top_scorer_never_owned: players::top_scorer_never_owned(bootstrap, snapshots),
        transfer_activity: transfers::transfer_summary(
            bundle.transfers.as_deref(),
            history,
            snapshots,
            bootstrap,
        ),
        chips_used: chips_used(&bundle.history.chips),
        top_contributors: players::top_contributors(&tallies, bootstrap, TOP_CONTRIBUTORS),
        badges: Vec::new(),
    };
    summary.badges = badges::award_badges(&summary);

    debug!(
        total_points = summary.total_points,
        gameweeks = summary.gameweeks_played,
        badges = summary.badges.len(),
        "derived season summary"
    );
    summary
}

fn chips_used(chips: &[ChipPlay]) -> Vec<ChipUsage> {
    chips
        .iter()
        .sorted_by_key(|chip| chip.gameweek)
        .map(|chip| ChipUsage {
            name: Chip::from_str(&chip.name)
                .map(|c| c.label().to_string())
                .unwrap_or_else(|_| chip.name.clone()),
            gameweek: chip.gameweek,
        })
        .collect()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, or zero when the whole is not positive.
pub(crate) fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        0.0
    } else {
        round2(part / whole * 100.0)
    }
}
