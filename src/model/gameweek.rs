use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Chips as named by the FPL API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumString, strum_macros::Display,
)]
pub enum Chip {
    #[strum(serialize = "wildcard")]
    Wildcard,
    #[strum(serialize = "freehit")]
    FreeHit,
    #[strum(serialize = "bboost")]
    BenchBoost,
    #[strum(serialize = "3xc")]
    TripleCaptain,
    #[strum(serialize = "manager")]
    AssistantManager,
}

impl Chip {
    pub fn label(self) -> &'static str {
        match self {
            Chip::Wildcard => "Wildcard",
            Chip::FreeHit => "Free Hit",
            Chip::BenchBoost => "Bench Boost",
            Chip::TripleCaptain => "Triple Captain",
            Chip::AssistantManager => "Assistant Manager",
        }
    }
}

/// Response of `entry/{id}/event/{gw}/picks/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameweekPicks {
    #[serde(default)]
    pub active_chip: Option<String>,
    #[serde(default)]
    pub automatic_subs: Vec<AutomaticSub>,
    #[serde(default)]
    pub picks: Vec<Pick>,
}

/// One squad slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pick {
    pub element: u32,
    pub position: u32,
    #[serde(default)]
    pub multiplier: u32,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_vice_captain: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutomaticSub {
    pub element_in: u32,
    pub element_out: u32,
}

/// Response of `event/{gw}/live/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveGameweek {
    #[serde(default)]
    pub elements: Vec<LiveElement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveElement {
    pub id: u32,
    #[serde(default)]
    pub stats: LiveStats,
}

/// Per-player stats for one gameweek.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStats {
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub goals_scored: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub bonus: u32,
    #[serde(default)]
    pub total_points: i32,
}

/// Squad positions 1..=11 start; 12..=15 sit on the bench.
pub const STARTING_XI: u32 = 11;
pub const SQUAD_SIZE: usize = 15;

/// Picks joined with live stats for one gameweek.
#[derive(Debug, Clone, Default)]
pub struct GameweekSnapshot {
    pub gameweek: u32,
    pub active_chip: Option<Chip>,
    pub picks: Vec<Pick>,
    pub automatic_subs: Vec<AutomaticSub>,
    pub live: HashMap<u32, LiveStats>,
}

impl GameweekSnapshot {
    pub fn new(gameweek: u32, picks: GameweekPicks, live: LiveGameweek) -> Self {
        let active_chip = picks
            .active_chip
            .as_deref()
            .and_then(|chip| Chip::from_str(chip).ok());
        Self {
            gameweek,
            active_chip,
            picks: picks.picks,
            automatic_subs: picks.automatic_subs,
            live: live
                .elements
                .into_iter()
                .map(|element| (element.id, element.stats))
                .collect(),
        }
    }

    /// Raw (unmultiplied) points for a player this gameweek.
    pub fn raw_points(&self, element: u32) -> i32 {
        self.live
            .get(&element)
            .map(|stats| stats.total_points)
            .unwrap_or_default()
    }

    pub fn captain(&self) -> Option<&Pick> {
        self.picks.iter().find(|p| p.is_captain)
    }

    pub fn was_autosubbed_in(&self, element: u32) -> bool {
        self.automatic_subs.iter().any(|s| s.element_in == element)
    }

    pub fn owns(&self, element: u32) -> bool {
        self.picks.iter().any(|p| p.element == element)
    }
}
