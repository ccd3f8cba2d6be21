use crate::model::{GameweekScore, ManagerProfile, SeasonHistoryEntry};
use crate::stats::round2;

/// Headline season numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonTotals {
    pub total_points: i32,
    pub overall_rank: Option<u64>,
    pub best_rank: Option<u64>,
    pub gameweeks_played: u32,
    pub average_points_per_gameweek: f64,
    pub best_gameweek: Option<GameweekScore>,
    pub worst_gameweek: Option<GameweekScore>,
}

/// Totals come from the last finished history entry so that they agree with
/// the per-gameweek figures; the profile summary only fills gaps.
pub fn season_totals(history: &[SeasonHistoryEntry], profile: &ManagerProfile) -> SeasonTotals {
    let last = history.last();
    let total_points = last
        .map(|entry| entry.total_points)
        .or(profile.summary_overall_points.map(|p| p as i32))
        .unwrap_or_default();
    let overall_rank = last
        .and_then(SeasonHistoryEntry::valid_rank)
        .or(profile.summary_overall_rank.filter(|r| *r > 0));
    let best_rank = history
        .iter()
        .filter_map(SeasonHistoryEntry::valid_rank)
        .min()
        .or(overall_rank);

    let gameweeks_played = history.len() as u32;
    let average_points_per_gameweek = if gameweeks_played == 0 {
        0.0
    } else {
        round2(total_points as f64 / gameweeks_played as f64)
    };

    // Earliest gameweek wins ties in both directions.
    let best_gameweek = history
        .iter()
        .max_by(|a, b| a.points.cmp(&b.points).then(b.gameweek.cmp(&a.gameweek)))
        .map(score);
    let worst_gameweek = history
        .iter()
        .min_by(|a, b| a.points.cmp(&b.points).then(a.gameweek.cmp(&b.gameweek)))
        .map(score);

    SeasonTotals {
        total_points,
        overall_rank,
        best_rank,
        gameweeks_played,
        average_points_per_gameweek,
        best_gameweek,
        worst_gameweek,
    }
}

fn score(entry: &SeasonHistoryEntry) -> GameweekScore {
    GameweekScore {
        gameweek: entry.gameweek,
        points: entry.points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::tests::history_entry;

    #[test]
    fn test_totals_from_history() {
        let history = vec![
            history_entry(1, 60, 60, Some(500_000)),
            history_entry(2, 80, 140, Some(200_000)),
            history_entry(3, 40, 180, Some(300_000)),
            history_entry(4, 80, 260, Some(250_000)),
        ];
        let totals = season_totals(&history, &ManagerProfile::default());

        assert_eq!(totals.total_points, 260);
        assert_eq!(totals.gameweeks_played, 4);
        assert_eq!(totals.average_points_per_gameweek, 65.0);
        assert_eq!(totals.overall_rank, Some(250_000));
        assert_eq!(totals.best_rank, Some(200_000));
        assert_eq!(
            totals.best_gameweek,
            Some(GameweekScore {
                gameweek: 2,
                points: 80
            })
        );
        assert_eq!(totals.worst_gameweek.map(|g| g.gameweek), Some(3));
    }

    #[test]
    fn test_totals_fall_back_to_profile() {
        let profile = ManagerProfile {
            summary_overall_points: Some(55),
            summary_overall_rank: Some(4_000_000),
            ..Default::default()
        };
        let totals = season_totals(&[], &profile);

        assert_eq!(totals.total_points, 55);
        assert_eq!(totals.overall_rank, Some(4_000_000));
        assert_eq!(totals.best_rank, Some(4_000_000));
        assert_eq!(totals.gameweeks_played, 0);
        assert_eq!(totals.average_points_per_gameweek, 0.0);
        assert!(totals.best_gameweek.is_none());
    }
}
