//! Consistency checks over a derived summary, plus a sanitizer that repairs
//! what the checks reject.

use serde::Serialize;
use tracing::{debug, warn};

use crate::model::{DerivedSeasonSummary, SEASON_GAMEWEEKS};
use crate::stats::round2;
use crate::stats::transfers::HIT_COST;

pub const TOTAL_POINTS_RANGE: std::ops::RangeInclusive<i32> = 100..=4_000;
pub const OVERALL_RANK_RANGE: std::ops::RangeInclusive<u64> = 1..=12_000_000;
pub const GAMEWEEK_POINTS_RANGE: std::ops::RangeInclusive<i32> = 5..=200;
pub const CAPTAIN_SHARE_RANGE: std::ops::RangeInclusive<f64> = 10.0..=40.0;
/// Drift between a stored average and its recomputation.
pub const AVERAGE_WARN_DRIFT: f64 = 1.0;
pub const AVERAGE_ERROR_DRIFT: f64 = 2.0;

const ERROR_PENALTY: i32 = 20;
const WARNING_PENALTY: i32 = 5;
const COMPLETENESS_BONUS: i32 = 2;

const UNKNOWN_MANAGER: &str = "Unknown Manager";
const UNKNOWN_TEAM: &str = "Unknown Team";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Data quality score in `0..=100`.
    pub score: u8,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Record a drift between `stored` and `expected` at the level its size
    /// warrants.
    fn drift(&mut self, what: &str, stored: f64, expected: f64) {
        let drift = (stored - expected).abs();
        let message = format!("{what} {stored} differs from recomputed {expected:.2}");
        if drift > AVERAGE_ERROR_DRIFT {
            self.error(message);
        } else if drift > AVERAGE_WARN_DRIFT {
            self.warn(message);
        }
    }
}

pub fn validate(summary: &DerivedSeasonSummary) -> ValidationReport {
    let mut findings = Findings::default();
    check_structure(summary, &mut findings);
    check_ranges(summary, &mut findings);
    check_consistency(summary, &mut findings);

    let bonus = [
        !summary.top_contributors.is_empty(),
        !summary.chips_used.is_empty(),
        !summary.badges.is_empty(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count() as i32
        * COMPLETENESS_BONUS;
    let score = 100 - ERROR_PENALTY * findings.errors.len() as i32
        - WARNING_PENALTY * findings.warnings.len() as i32
        + bonus;

    let report = ValidationReport {
        errors: findings.errors,
        warnings: findings.warnings,
        score: score.clamp(0, 100) as u8,
    };
    debug!(
        manager = summary.manager_id,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        score = report.score,
        "validated summary"
    );
    report
}

fn rates(summary: &DerivedSeasonSummary) -> Vec<(&'static str, f64)> {
    let mut rates = vec![
        ("average points per gameweek", summary.average_points_per_gameweek),
        ("captain average", summary.captaincy.average_points),
        ("captain fail rate", summary.captaincy.fail_rate),
        ("captain success rate", summary.captaincy.success_rate),
        ("captain share of points", summary.captaincy.share_of_points),
        ("bench average", summary.bench.average_points),
    ];
    if let Some(mvp) = &summary.mvp {
        rates.push(("mvp share of team score", mvp.percentage_of_team_score));
        rates.push(("mvp points per game", mvp.points_per_game));
    }
    rates
}

fn check_structure(summary: &DerivedSeasonSummary, findings: &mut Findings) {
    if summary.manager_name.trim().is_empty() {
        findings.error("manager name is empty");
    }
    if summary.team_name.trim().is_empty() {
        findings.error("team name is empty");
    }
    for (what, value) in rates(summary) {
        if !value.is_finite() || value < 0.0 {
            findings.error(format!("{what} is not a finite non-negative number ({value})"));
        }
    }
}

/// Every gameweek number the summary mentions.
fn gameweek_numbers(summary: &DerivedSeasonSummary) -> Vec<(&'static str, u32)> {
    let mut numbers = Vec::new();
    numbers.extend(summary.best_gameweek.map(|g| ("best gameweek", g.gameweek)));
    numbers.extend(summary.worst_gameweek.map(|g| ("worst gameweek", g.gameweek)));
    numbers.extend(summary.rank_movement.biggest_climb.map(|c| ("biggest climb", c.gameweek)));
    numbers.extend(summary.rank_movement.biggest_drop.map(|c| ("biggest drop", c.gameweek)));
    numbers.extend(summary.captaincy.best_captain.as_ref().map(|c| ("best captain", c.gameweek)));
    numbers.extend(summary.captaincy.worst_captain.as_ref().map(|c| ("worst captain", c.gameweek)));
    numbers.extend(summary.bench.worst_bench_call.as_ref().map(|c| ("bench call", c.gameweek)));
    numbers.extend(
        summary
            .transfer_activity
            .best_transfer_in
            .as_ref()
            .map(|t| ("best transfer", t.gameweek)),
    );
    numbers.extend(summary.chips_used.iter().map(|c| ("chip", c.gameweek)));
    numbers
}

fn check_ranges(summary: &DerivedSeasonSummary, findings: &mut Findings) {
    if !TOTAL_POINTS_RANGE.contains(&summary.total_points) {
        findings.warn(format!("total points {} look unusual", summary.total_points));
    }
    if let Some(rank) = summary.overall_rank {
        if !OVERALL_RANK_RANGE.contains(&rank) {
            findings.warn(format!("overall rank {rank} is out of range"));
        }
    }
    if let Some(best) = summary.best_gameweek {
        if !GAMEWEEK_POINTS_RANGE.contains(&best.points) {
            findings.warn(format!("best gameweek score {} looks unusual", best.points));
        }
    }
    for (what, gameweek) in gameweek_numbers(summary) {
        if !(1..=SEASON_GAMEWEEKS).contains(&gameweek) {
            findings.warn(format!("{what} refers to gameweek {gameweek}"));
        }
    }
    let arrows = summary.rank_movement.green_arrows + summary.rank_movement.red_arrows;
    if arrows > SEASON_GAMEWEEKS - 1 {
        findings.warn(format!("{arrows} rank arrows in a {SEASON_GAMEWEEKS} gameweek season"));
    }
}

fn check_consistency(summary: &DerivedSeasonSummary, findings: &mut Findings) {
    if summary.gameweeks_played > 0 {
        findings.drift(
            "average points",
            summary.average_points_per_gameweek,
            summary.total_points as f64 / summary.gameweeks_played as f64,
        );
    }

    let captaincy = &summary.captaincy;
    if captaincy.gameweeks_analysed > 0 {
        findings.drift(
            "captain average",
            captaincy.average_points,
            captaincy.total_points as f64 / captaincy.gameweeks_analysed as f64,
        );
        if !CAPTAIN_SHARE_RANGE.contains(&captaincy.share_of_points) {
            findings.warn(format!(
                "captain share of points {}% is outside the usual range",
                captaincy.share_of_points
            ));
        }
    }

    let transfers = &summary.transfer_activity;
    if transfers.total_hits > transfers.total_transfers {
        findings.error(format!(
            "{} hits recorded for {} transfers",
            transfers.total_hits, transfers.total_transfers
        ));
    }

    if let (Some(best), Some(overall)) = (summary.best_rank, summary.overall_rank) {
        if best > overall {
            findings.error(format!("best rank {best} is worse than overall rank {overall}"));
        }
    }
}

/// Repair the fields the validator rejects.
pub fn sanitize(mut summary: DerivedSeasonSummary) -> DerivedSeasonSummary {
    if summary.manager_name.trim().is_empty() {
        summary.manager_name = UNKNOWN_MANAGER.to_string();
    }
    if summary.team_name.trim().is_empty() {
        summary.team_name = UNKNOWN_TEAM.to_string();
    }

    summary.average_points_per_gameweek = if summary.gameweeks_played > 0 {
        round2(summary.total_points as f64 / summary.gameweeks_played as f64)
    } else {
        0.0
    };

    let captaincy = &mut summary.captaincy;
    if captaincy.gameweeks_analysed > 0 {
        captaincy.average_points =
            round2(captaincy.total_points as f64 / captaincy.gameweeks_analysed as f64);
    }
    for value in [
        &mut captaincy.average_points,
        &mut captaincy.fail_rate,
        &mut captaincy.success_rate,
        &mut captaincy.share_of_points,
        &mut summary.bench.average_points,
    ] {
        *value = finite_or_zero(*value);
    }
    if let Some(mvp) = summary.mvp.as_mut() {
        mvp.percentage_of_team_score = finite_or_zero(mvp.percentage_of_team_score);
        mvp.points_per_game = finite_or_zero(mvp.points_per_game);
    }

    let transfers = &mut summary.transfer_activity;
    if transfers.total_hits > transfers.total_transfers {
        transfers.total_hits = transfers.total_transfers;
        transfers.points_spent_on_hits = transfers.total_hits * HIT_COST;
    }

    if let (Some(best), Some(overall)) = (summary.best_rank, summary.overall_rank) {
        if best > overall {
            summary.best_rank = Some(overall);
        }
    }

    clamp_gameweeks(&mut summary);
    summary
}

/// Validate, and when that fails sanitize and validate again.
pub fn validate_and_repair(summary: DerivedSeasonSummary) -> (DerivedSeasonSummary, ValidationReport) {
    let report = validate(&summary);
    if report.is_valid() {
        return (summary, report);
    }
    warn!(
        manager = summary.manager_id,
        errors = ?report.errors,
        "summary failed validation, sanitizing"
    );
    let summary = sanitize(summary);
    let report = validate(&summary);
    (summary, report)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

fn clamp_gameweek(gameweek: &mut u32) {
    *gameweek = (*gameweek).clamp(1, SEASON_GAMEWEEKS);
}

fn clamp_gameweeks(summary: &mut DerivedSeasonSummary) {
    if let Some(best) = summary.best_gameweek.as_mut() {
        clamp_gameweek(&mut best.gameweek);
    }
    if let Some(worst) = summary.worst_gameweek.as_mut() {
        clamp_gameweek(&mut worst.gameweek);
    }
    let movement = &mut summary.rank_movement;
    for change in [movement.biggest_climb.as_mut(), movement.biggest_drop.as_mut()]
        .into_iter()
        .flatten()
    {
        clamp_gameweek(&mut change.gameweek);
    }
    let captaincy = &mut summary.captaincy;
    for choice in [captaincy.best_captain.as_mut(), captaincy.worst_captain.as_mut()]
        .into_iter()
        .flatten()
    {
        clamp_gameweek(&mut choice.gameweek);
    }
    if let Some(call) = summary.bench.worst_bench_call.as_mut() {
        clamp_gameweek(&mut call.gameweek);
    }
    if let Some(transfer) = summary.transfer_activity.best_transfer_in.as_mut() {
        clamp_gameweek(&mut transfer.gameweek);
    }
    for chip in summary.chips_used.iter_mut() {
        clamp_gameweek(&mut chip.gameweek);
    }
}
