use itertools::Itertools;

use crate::model::{RankChange, RankMovement, SeasonHistoryEntry};

/// Count green (rank improved) and red (rank worsened) arrows between
/// consecutive gameweeks, and record the largest single move each way.
/// Pairs where either side has no valid rank are skipped.
pub fn rank_movement(history: &[SeasonHistoryEntry]) -> RankMovement {
    let mut movement = RankMovement::default();

    for (prev, next) in history.iter().tuple_windows() {
        let (Some(before), Some(after)) = (prev.valid_rank(), next.valid_rank()) else {
            continue;
        };
        if after < before {
            movement.green_arrows += 1;
            record(&mut movement.biggest_climb, next.gameweek, before - after);
        } else if after > before {
            movement.red_arrows += 1;
            record(&mut movement.biggest_drop, next.gameweek, after - before);
        }
    }

    movement
}

fn record(slot: &mut Option<RankChange>, gameweek: u32, places: u64) {
    if slot.map_or(true, |current| places > current.places) {
        *slot = Some(RankChange { gameweek, places });
    }
}
