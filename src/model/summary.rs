use serde::{Deserialize, Serialize};

/// The season wrapped summary returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedSeasonSummary {
    pub manager_id: u64,
    pub manager_name: String,
    pub team_name: String,
    pub total_points: i32,
    pub overall_rank: Option<u64>,
    pub best_rank: Option<u64>,
    pub gameweeks_played: u32,
    pub average_points_per_gameweek: f64,
    pub best_gameweek: Option<GameweekScore>,
    pub worst_gameweek: Option<GameweekScore>,
    pub rank_movement: RankMovement,
    pub captaincy: CaptainSummary,
    pub bench: BenchSummary,
    pub mvp: Option<MvpSummary>,
    pub top_scorer_never_owned: Option<NeverOwnedSummary>,
    pub transfer_activity: TransferSummary,
    pub chips_used: Vec<ChipUsage>,
    pub top_contributors: Vec<Contributor>,
    pub badges: Vec<Badge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameweekScore {
    pub gameweek: u32,
    pub points: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankMovement {
    pub green_arrows: u32,
    pub red_arrows: u32,
    pub biggest_climb: Option<RankChange>,
    pub biggest_drop: Option<RankChange>,
}

/// A one-gameweek rank change, in places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankChange {
    pub gameweek: u32,
    pub places: u64,
}

/// A captain pick and its contribution for one gameweek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptainChoice {
    pub gameweek: u32,
    pub player_id: u32,
    pub player_name: String,
    pub raw_points: i32,
    pub multiplier: u32,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptainSummary {
    pub total_points: i32,
    pub average_points: f64,
    pub gameweeks_analysed: u32,
    pub failed_captaincies: u32,
    pub fail_rate: f64,
    pub success_rate: f64,
    /// Captain points as a percentage of the same gameweeks' points.
    pub share_of_points: f64,
    pub best_captain: Option<CaptainChoice>,
    pub worst_captain: Option<CaptainChoice>,
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchSummary {
    pub total_points: u32,
    pub average_points: f64,
    pub worst_bench_call: Option<BenchCall>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchCall {
    pub gameweek: u32,
    pub player_id: u32,
    pub player_name: String,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MvpSummary {
    pub player_id: u32,
    pub player_name: String,
    pub appearances: u32,
    pub total_points: i32,
    pub percentage_of_team_score: f64,
    pub points_per_game: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeverOwnedSummary {
    pub player_id: u32,
    pub player_name: String,
    pub season_points: i32,
    pub best_gameweek: Option<GameweekScore>,
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSummary {
    pub total_transfers: u32,
    pub total_hits: u32,
    pub points_spent_on_hits: u32,
    pub best_transfer_in: Option<TransferIn>,
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferIn {
    pub gameweek: u32,
    pub player_in_id: u32,
    pub player_in_name: String,
    pub player_out_id: u32,
    pub player_out_name: String,
    pub point_cost: u32,
    pub points_after: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipUsage {
    pub name: String,
    pub gameweek: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub player_id: u32,
    pub player_name: String,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: String,
    pub description: String,
}
