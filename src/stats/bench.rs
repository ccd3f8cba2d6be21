use crate::model::{
    BenchCall, BenchSummary, Bootstrap, Chip, GameweekSnapshot, SeasonHistoryEntry, STARTING_XI,
};
use crate::stats::round2;

/// Bench scores at or below this are not worth calling out.
pub const BENCH_CALL_MIN_POINTS: i32 = 5;

pub fn bench_summary(
    history: &[SeasonHistoryEntry],
    snapshots: &[GameweekSnapshot],
    bootstrap: &Bootstrap,
) -> BenchSummary {
    let total_points: u32 = history.iter().map(|entry| entry.points_on_bench).sum();
    let average_points = if history.is_empty() {
        0.0
    } else {
        round2(total_points as f64 / history.len() as f64)
    };

    BenchSummary {
        total_points,
        average_points,
        worst_bench_call: worst_bench_call(snapshots, bootstrap),
    }
}

/// The highest-scoring player left unused on the bench.
fn worst_bench_call(snapshots: &[GameweekSnapshot], bootstrap: &Bootstrap) -> Option<BenchCall> {
    snapshots
        .iter()
        .filter(|snapshot| snapshot.active_chip != Some(Chip::BenchBoost))
        .flat_map(|snapshot| {
            snapshot
                .picks
                .iter()
                .filter(|pick| pick.position > STARTING_XI && pick.multiplier == 0)
                .filter(|pick| !snapshot.was_autosubbed_in(pick.element))
                .map(move |pick| (snapshot.gameweek, pick.element, snapshot.raw_points(pick.element)))
        })
        .filter(|(_, _, points)| *points > BENCH_CALL_MIN_POINTS)
        .max_by(|a, b| a.2.cmp(&b.2).then(b.0.cmp(&a.0)).then(b.1.cmp(&a.1)))
        .map(|(gameweek, player_id, points)| BenchCall {
            gameweek,
            player_id,
            player_name: bootstrap.player_name(player_id),
            points,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::tests::{bootstrap, history_entry, snapshot};

    fn with_bench(gw: u32, history_points_on_bench: u32) -> SeasonHistoryEntry {
        SeasonHistoryEntry {
            points_on_bench: history_points_on_bench,
            ..history_entry(gw, 50, 50 * gw as i32, None)
        }
    }

    #[test]
    fn test_bench_totals_come_from_history() {
        let history = vec![with_bench(1, 4), with_bench(2, 11), with_bench(3, 0)];
        let summary = bench_summary(&history, &[], &bootstrap());

        assert_eq!(summary.total_points, 15);
        assert_eq!(summary.average_points, 5.0);
        assert!(summary.worst_bench_call.is_none());
    }

    #[test]
    fn test_worst_bench_call_ignores_bench_boost_and_autosubs() {
        let mut autosub = snapshot(
            3,
            None,
            &[(10, 1, 2, true), (12, 13, 0, false)],
            &[(10, 2), (12, 15)],
        );
        autosub.automatic_subs.push(crate::model::AutomaticSub {
            element_in: 12,
            element_out: 10,
        });
        let snapshots = vec![
            snapshot(1, None, &[(10, 1, 2, true), (11, 12, 0, false)], &[(10, 2), (11, 9)]),
            snapshot(2, Some(Chip::BenchBoost), &[(11, 12, 1, false)], &[(11, 14)]),
            autosub,
            snapshot(4, None, &[(12, 14, 0, false)], &[(12, 5)]),
        ];

        let call = worst_bench_call(&snapshots, &bootstrap()).unwrap();

        assert_eq!(call.gameweek, 1);
        assert_eq!(call.player_id, 11);
        assert_eq!(call.player_name, "Salah");
        assert_eq!(call.points, 9);
    }
}
