use crate::model::{Badge, DerivedSeasonSummary};

/// Achievement tags, in award order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIter)]
pub enum BadgeKind {
    #[strum(serialize = "POINTS MACHINE")]
    PointsMachine,
    #[strum(serialize = "TOP 100K")]
    Top100k,
    #[strum(serialize = "TRIPLE DIGITS")]
    TripleDigits,
    #[strum(serialize = "GREEN MACHINE")]
    GreenMachine,
    #[strum(serialize = "CAPTAIN MARVEL")]
    CaptainMarvel,
    #[strum(serialize = "ABOVE AVERAGE")]
    AboveAverage,
    #[strum(serialize = "CHIP MASTER")]
    ChipMaster,
}

impl BadgeKind {
    pub fn description(self) -> &'static str {
        match self {
            BadgeKind::PointsMachine => "Scored 2,500 points or more",
            BadgeKind::Top100k => "Finished inside the top 100,000",
            BadgeKind::TripleDigits => "Hit 100 points in a single gameweek",
            BadgeKind::GreenMachine => "Collected 20 or more green arrows",
            BadgeKind::CaptainMarvel => "Captain returned in at least 75% of gameweeks",
            BadgeKind::AboveAverage => "Averaged 55 points or more per gameweek",
            BadgeKind::ChipMaster => "Played 4 or more chips",
        }
    }

    pub fn earned(self, summary: &DerivedSeasonSummary) -> bool {
        match self {
            BadgeKind::PointsMachine => summary.total_points >= 2_500,
            BadgeKind::Top100k => summary
                .overall_rank
                .is_some_and(|rank| rank > 0 && rank <= 100_000),
            BadgeKind::TripleDigits => summary.best_gameweek.is_some_and(|gw| gw.points >= 100),
            BadgeKind::GreenMachine => summary.rank_movement.green_arrows >= 20,
            BadgeKind::CaptainMarvel => summary.captaincy.success_rate >= 75.0,
            BadgeKind::AboveAverage => summary.average_points_per_gameweek >= 55.0,
            BadgeKind::ChipMaster => summary.chips_used.len() >= 4,
        }
    }
}

/// Every badge whose threshold the summary meets. Badges never exclude
/// one another.
pub fn award_badges(summary: &DerivedSeasonSummary) -> Vec<Badge> {
    use strum::IntoEnumIterator;

    BadgeKind::iter()
        .filter(|kind| kind.earned(summary))
        .map(|kind| Badge {
            name: kind.to_string(),
            description: kind.description().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChipUsage, GameweekScore};
    use crate::stats::tests::empty_summary;

    #[test]
    fn test_no_badges_for_modest_season() {
        let summary = empty_summary();
        assert!(award_badges(&summary).is_empty());
    }

    #[test]
    fn test_all_badges_can_apply_together() {
        let mut summary = empty_summary();
        summary.total_points = 2_600;
        summary.overall_rank = Some(42_000);
        summary.best_gameweek = Some(GameweekScore {
            gameweek: 19,
            points: 121,
        });
        summary.rank_movement.green_arrows = 22;
        summary.captaincy.success_rate = 80.0;
        summary.average_points_per_gameweek = 68.4;
        summary.chips_used = (1..=4)
            .map(|gw| ChipUsage {
                name: "Wildcard".to_string(),
                gameweek: gw,
            })
            .collect();

        let names: Vec<String> = award_badges(&summary).into_iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            vec![
                "POINTS MACHINE",
                "TOP 100K",
                "TRIPLE DIGITS",
                "GREEN MACHINE",
                "CAPTAIN MARVEL",
                "ABOVE AVERAGE",
                "CHIP MASTER"
            ]
        );
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let mut summary = empty_summary();
        summary.total_points = 2_500;
        summary.overall_rank = Some(100_000);
        assert!(BadgeKind::PointsMachine.earned(&summary));
        assert!(BadgeKind::Top100k.earned(&summary));

        summary.overall_rank = Some(100_001);
        assert!(!BadgeKind::Top100k.earned(&summary));
    }
}
