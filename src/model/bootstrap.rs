use serde::{Deserialize, Serialize};

/// Season-wide metadata from `bootstrap-static/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bootstrap {
    #[serde(default)]
    pub events: Vec<GameweekEvent>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A gameweek as listed in the bootstrap metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameweekEvent {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub is_next: bool,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub average_entry_score: Option<u32>,
    #[serde(default)]
    pub highest_score: Option<u32>,
}

/// A player in the game's directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Element {
    pub id: u32,
    #[serde(default)]
    pub web_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub second_name: String,
    #[serde(default)]
    pub team: u32,
    #[serde(default)]
    pub element_type: u32,
    #[serde(default)]
    pub total_points: i32,
}

/// Element types for goalkeepers and outfield players.
pub const PLAYER_ELEMENT_TYPES: std::ops::RangeInclusive<u32> = 1..=4;

impl Bootstrap {
    pub fn element(&self, id: u32) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Display name for a player id, falling back to a placeholder.
    pub fn player_name(&self, id: u32) -> String {
        self.element(id)
            .map(|e| e.web_name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Player {id}"))
    }

    /// The gameweek flagged current, else the one before the next, else the
    /// season default.
    pub fn current_gameweek(&self, default: u32) -> u32 {
        if let Some(current) = self.events.iter().find(|e| e.is_current) {
            return current.id;
        }
        if let Some(next) = self.events.iter().find(|e| e.is_next) {
            return next.id.saturating_sub(1);
        }
        default
    }
}
