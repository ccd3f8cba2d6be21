use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Manager profile from `entry/{id}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagerProfile {
    pub id: u64,
    #[serde(default)]
    pub player_first_name: String,
    #[serde(default)]
    pub player_last_name: String,
    /// Team name.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary_overall_points: Option<u32>,
    #[serde(default)]
    pub summary_overall_rank: Option<u64>,
    #[serde(default)]
    pub started_event: Option<u32>,
}

impl ManagerProfile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.player_first_name.trim(), self.player_last_name.trim())
            .trim()
            .to_string()
    }
}

/// Manager history from `entry/{id}/history/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagerHistory {
    #[serde(default)]
    pub current: Vec<SeasonHistoryEntry>,
    #[serde(default)]
    pub chips: Vec<ChipPlay>,
}

/// One completed gameweek in the current season.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonHistoryEntry {
    #[serde(rename = "event")]
    pub gameweek: u32,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub total_points: i32,
    /// Negative or missing ranks occur for unranked managers.
    #[serde(default)]
    pub overall_rank: Option<i64>,
    #[serde(default)]
    pub points_on_bench: u32,
    #[serde(default)]
    pub event_transfers: u32,
    #[serde(default)]
    pub event_transfers_cost: u32,
}

impl SeasonHistoryEntry {
    pub fn valid_rank(&self) -> Option<u64> {
        self.overall_rank.filter(|r| *r > 0).map(|r| r as u64)
    }
}

/// A chip activation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChipPlay {
    pub name: String,
    #[serde(rename = "event")]
    pub gameweek: u32,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

/// A single transfer from `entry/{id}/transfers/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub element_in: u32,
    pub element_out: u32,
    #[serde(rename = "event")]
    pub gameweek: u32,
    #[serde(default)]
    pub element_in_cost: u32,
    #[serde(default)]
    pub element_out_cost: u32,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}
