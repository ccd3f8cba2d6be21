use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FplError;

/// A validated FPL manager (entry) id. Deserializing goes through
/// [`ManagerId::new`], so the range check always applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ManagerId(u64);

impl ManagerId {
    pub const MAX: u64 = 99_999_999;

    pub fn new(id: u64) -> Result<Self, FplError> {
        if (1..=Self::MAX).contains(&id) {
            Ok(Self(id))
        } else {
            Err(FplError::ManagerIdOutOfRange {
                input: id.to_string(),
                max: Self::MAX,
            })
        }
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for ManagerId {
    type Err = FplError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FplError::InvalidManagerId {
                input: raw.to_string(),
            });
        }
        // All digits, so the only parse failure left is overflow.
        let out_of_range = || FplError::ManagerIdOutOfRange {
            input: trimmed.to_string(),
            max: Self::MAX,
        };
        let id: u64 = trimmed.parse().map_err(|_| out_of_range())?;
        Self::new(id).map_err(|_| out_of_range())
    }
}

impl TryFrom<u64> for ManagerId {
    type Error = FplError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ManagerId> for u64 {
    fn from(id: ManagerId) -> Self {
        id.0
    }
}

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of gameweeks in a Premier League season.
pub const SEASON_GAMEWEEKS: u32 = 38;
