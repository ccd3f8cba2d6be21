//! Canned season served for the `demo` manager id.

use crate::model::*;
use crate::stats::badges::award_badges;

/// Ids that select the demo season instead of a live lookup.
pub const DEMO_IDS: [&str; 2] = ["demo", "1"];

pub fn is_demo_id(raw: &str) -> bool {
    let raw = raw.trim();
    DEMO_IDS.iter().any(|id| raw.eq_ignore_ascii_case(id))
}

fn captain(gameweek: u32, player_id: u32, name: &str, raw_points: i32) -> CaptainChoice {
    CaptainChoice {
        gameweek,
        player_id,
        player_name: name.to_string(),
        raw_points,
        multiplier: 2,
        points: raw_points * 2,
    }
}

fn contributor(player_id: u32, name: &str, points: i32) -> Contributor {
    Contributor {
        player_id,
        player_name: name.to_string(),
        points,
    }
}

fn chip(name: &str, gameweek: u32) -> ChipUsage {
    ChipUsage {
        name: name.to_string(),
        gameweek,
    }
}

/// A complete, internally consistent season.
pub fn demo_summary() -> DerivedSeasonSummary {
    let mut summary = DerivedSeasonSummary {
        manager_id: 1,
        manager_name: "Demo Manager".to_string(),
        team_name: "Wrapped XI".to_string(),
        total_points: 2_156,
        overall_rank: Some(145_302),
        best_rank: Some(98_411),
        gameweeks_played: 38,
        average_points_per_gameweek: 56.74,
        best_gameweek: Some(GameweekScore {
            gameweek: 26,
            points: 112,
        }),
        worst_gameweek: Some(GameweekScore {
            gameweek: 7,
            points: 29,
        }),
        rank_movement: RankMovement {
            green_arrows: 21,
            red_arrows: 16,
            biggest_climb: Some(RankChange {
                gameweek: 26,
                places: 412_870,
            }),
            biggest_drop: Some(RankChange {
                gameweek: 7,
                places: 655_104,
            }),
        },
        captaincy: CaptainSummary {
            total_points: 694,
            average_points: 18.26,
            gameweeks_analysed: 38,
            failed_captaincies: 9,
            fail_rate: 23.68,
            success_rate: 76.32,
            share_of_points: 32.19,
            best_captain: Some(captain(26, 328, "Salah", 24)),
            worst_captain: Some(captain(7, 351, "Haaland", 1)),
            estimated: false,
        },
        bench: BenchSummary {
            total_points: 214,
            average_points: 5.63,
            worst_bench_call: Some(BenchCall {
                gameweek: 14,
                player_id: 182,
                player_name: "Palmer".to_string(),
                points: 17,
            }),
        },
        mvp: Some(MvpSummary {
            player_id: 328,
            player_name: "Salah".to_string(),
            appearances: 38,
            total_points: 448,
            percentage_of_team_score: 20.78,
            points_per_game: 11.79,
        }),
        top_scorer_never_owned: Some(NeverOwnedSummary {
            player_id: 401,
            player_name: "Isak".to_string(),
            season_points: 211,
            best_gameweek: Some(GameweekScore {
                gameweek: 19,
                points: 18,
            }),
            estimated: false,
        }),
        transfer_activity: TransferSummary {
            total_transfers: 41,
            total_hits: 3,
            points_spent_on_hits: 12,
            best_transfer_in: Some(TransferIn {
                gameweek: 12,
                player_in_id: 182,
                player_in_name: "Palmer".to_string(),
                player_out_id: 27,
                player_out_name: "Foden".to_string(),
                point_cost: 0,
                points_after: 156,
            }),
            estimated: false,
        },
        chips_used: vec![
            chip("Wildcard", 8),
            chip("Triple Captain", 26),
            chip("Bench Boost", 34),
            chip("Free Hit", 36),
        ],
        top_contributors: vec![
            contributor(328, "Salah", 448),
            contributor(182, "Palmer", 231),
            contributor(351, "Haaland", 204),
        ],
        badges: Vec::new(),
    };
    summary.badges = award_badges(&summary);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    #[test]
    fn test_demo_ids() {
        assert!(is_demo_id("demo"));
        assert!(is_demo_id(" DEMO "));
        assert!(is_demo_id("1"));
        assert!(!is_demo_id("12"));
    }

    #[test]
    fn test_demo_summary_is_consistent() {
        let summary = demo_summary();
        assert_eq!(summary.total_points, 2_156);
        assert_eq!(summary.manager_name, "Demo Manager");

        let report = validate(&summary);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(report.score, 100);

        let badges: Vec<&str> = summary.badges.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            badges,
            vec!["TRIPLE DIGITS", "GREEN MACHINE", "CAPTAIN MARVEL", "ABOVE AVERAGE", "CHIP MASTER"]
        );
    }
}
