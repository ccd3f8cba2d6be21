use std::collections::{BTreeMap, HashSet};

use itertools::Itertools;

use crate::model::{
    Bootstrap, Contributor, GameweekScore, GameweekSnapshot, MvpSummary, NeverOwnedSummary,
    PLAYER_ELEMENT_TYPES,
};
use crate::stats::{percentage, round2};

/// Appearances and multiplied points for one player across the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTally {
    pub player_id: u32,
    pub appearances: u32,
    pub points: i32,
}

/// Tally every player who counted towards the score: starters (multiplier
/// above zero) and bench players brought on by an automatic substitution.
pub fn tally_players(snapshots: &[GameweekSnapshot]) -> Vec<PlayerTally> {
    let mut tallies: BTreeMap<u32, PlayerTally> = BTreeMap::new();
    for snapshot in snapshots {
        for pick in &snapshot.picks {
            let multiplier = match pick.multiplier {
                0 if snapshot.was_autosubbed_in(pick.element) => 1,
                0 => continue,
                m => m,
            };
            let tally = tallies.entry(pick.element).or_insert(PlayerTally {
                player_id: pick.element,
                appearances: 0,
                points: 0,
            });
            tally.appearances += 1;
            tally.points += snapshot.raw_points(pick.element) * multiplier as i32;
        }
    }
    tallies.into_values().collect()
}

/// Most appearances, then most points, then lowest id.
pub fn most_valuable_player(
    tallies: &[PlayerTally],
    bootstrap: &Bootstrap,
    season_points: i32,
) -> Option<MvpSummary> {
    let mvp = tallies.iter().max_by(|a, b| {
        a.appearances
            .cmp(&b.appearances)
            .then(a.points.cmp(&b.points))
            .then(b.player_id.cmp(&a.player_id))
    })?;
    Some(MvpSummary {
        player_id: mvp.player_id,
        player_name: bootstrap.player_name(mvp.player_id),
        appearances: mvp.appearances,
        total_points: mvp.points,
        percentage_of_team_score: percentage(mvp.points as f64, season_points as f64),
        points_per_game: round2(mvp.points as f64 / mvp.appearances.max(1) as f64),
    })
}

pub fn top_contributors(
    tallies: &[PlayerTally],
    bootstrap: &Bootstrap,
    limit: usize,
) -> Vec<Contributor> {
    tallies
        .iter()
        .sorted_by(|a, b| b.points.cmp(&a.points).then(a.player_id.cmp(&b.player_id)))
        .take(limit)
        .map(|tally| Contributor {
            player_id: tally.player_id,
            player_name: bootstrap.player_name(tally.player_id),
            points: tally.points,
        })
        .collect()
}

/// The best-scoring player (goalkeepers and outfielders only) that never
/// appeared in any fetched squad. Without snapshots nobody can be excluded,
/// so the season's top scorer is reported and flagged as an estimate.
pub fn top_scorer_never_owned(
    bootstrap: &Bootstrap,
    snapshots: &[GameweekSnapshot],
) -> Option<NeverOwnedSummary> {
    let owned: HashSet<u32> = snapshots
        .iter()
        .flat_map(|snapshot| snapshot.picks.iter().map(|pick| pick.element))
        .collect();

    let player = bootstrap
        .elements
        .iter()
        .filter(|e| PLAYER_ELEMENT_TYPES.contains(&e.element_type))
        .filter(|e| !owned.contains(&e.id))
        .max_by(|a, b| a.total_points.cmp(&b.total_points).then(b.id.cmp(&a.id)))?;

    let best_gameweek = snapshots
        .iter()
        .filter(|snapshot| snapshot.live.contains_key(&player.id))
        .map(|snapshot| GameweekScore {
            gameweek: snapshot.gameweek,
            points: snapshot.raw_points(player.id),
        })
        .max_by(|a, b| a.points.cmp(&b.points).then(b.gameweek.cmp(&a.gameweek)));

    Some(NeverOwnedSummary {
        player_id: player.id,
        player_name: bootstrap.player_name(player.id),
        season_points: player.total_points,
        best_gameweek,
        estimated: snapshots.is_empty(),
    })
}
