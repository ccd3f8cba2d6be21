use std::collections::HashSet;

use crate::model::{
    Bootstrap, CaptainChoice, CaptainSummary, Chip, GameweekSnapshot, SeasonHistoryEntry,
};
use crate::stats::{percentage, round2};

/// A captaincy contributing fewer points than this counts as failed.
pub const FAILED_CAPTAINCY_POINTS: i32 = 6;
/// Assumed average when no picks could be fetched: twice a 7.8 point haul.
pub const ESTIMATED_CAPTAIN_AVERAGE: f64 = 15.6;
pub const ESTIMATED_FAIL_RATE: f64 = 30.0;

/// One captain choice per snapshot that has a captain.
pub fn captain_choices(snapshots: &[GameweekSnapshot], bootstrap: &Bootstrap) -> Vec<CaptainChoice> {
    snapshots
        .iter()
        .filter_map(|snapshot| {
            let pick = snapshot.captain()?;
            let chip_multiplier = if snapshot.active_chip == Some(Chip::TripleCaptain) {
                3
            } else {
                2
            };
            let multiplier = if pick.multiplier >= 2 {
                pick.multiplier
            } else {
                chip_multiplier
            };
            let raw_points = snapshot.raw_points(pick.element);
            Some(CaptainChoice {
                gameweek: snapshot.gameweek,
                player_id: pick.element,
                player_name: bootstrap.player_name(pick.element),
                raw_points,
                multiplier,
                points: raw_points * multiplier as i32,
            })
        })
        .collect()
}

pub fn captain_summary(
    snapshots: &[GameweekSnapshot],
    bootstrap: &Bootstrap,
    history: &[SeasonHistoryEntry],
) -> CaptainSummary {
    let choices = captain_choices(snapshots, bootstrap);
    if choices.is_empty() {
        return estimated_summary(history);
    }

    let analysed = choices.len() as u32;
    let total_points: i32 = choices.iter().map(|c| c.points).sum();
    let failed = choices
        .iter()
        .filter(|c| c.points < FAILED_CAPTAINCY_POINTS)
        .count() as u32;
    let fail_rate = percentage(failed as f64, analysed as f64);

    let gameweeks: HashSet<u32> = choices.iter().map(|c| c.gameweek).collect();
    let window_points: i32 = history
        .iter()
        .filter(|entry| gameweeks.contains(&entry.gameweek))
        .map(|entry| entry.points)
        .sum();

    let best_captain = choices
        .iter()
        .max_by(|a, b| a.points.cmp(&b.points).then(b.gameweek.cmp(&a.gameweek)))
        .cloned();
    let worst_captain = choices
        .iter()
        .min_by(|a, b| a.points.cmp(&b.points).then(a.gameweek.cmp(&b.gameweek)))
        .cloned();

    CaptainSummary {
        total_points,
        average_points: round2(total_points as f64 / analysed as f64),
        gameweeks_analysed: analysed,
        failed_captaincies: failed,
        fail_rate,
        success_rate: round2(100.0 - fail_rate),
        share_of_points: percentage(total_points as f64, window_points as f64),
        best_captain,
        worst_captain,
        estimated: false,
    }
}

fn estimated_summary(history: &[SeasonHistoryEntry]) -> CaptainSummary {
    let gameweeks = history.len() as u32;
    let total_points = (ESTIMATED_CAPTAIN_AVERAGE * gameweeks as f64).round() as i32;
    let season_points: i32 = history.iter().map(|entry| entry.points).sum();
    CaptainSummary {
        total_points,
        average_points: ESTIMATED_CAPTAIN_AVERAGE,
        gameweeks_analysed: gameweeks,
        failed_captaincies: (gameweeks as f64 * ESTIMATED_FAIL_RATE / 100.0).round() as u32,
        fail_rate: ESTIMATED_FAIL_RATE,
        success_rate: 100.0 - ESTIMATED_FAIL_RATE,
        share_of_points: percentage(total_points as f64, season_points as f64),
        best_captain: None,
        worst_captain: None,
        estimated: true,
    }
}
