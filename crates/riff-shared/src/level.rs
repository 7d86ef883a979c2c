//! XP and level math.
//!
//! Level is derived from XP only: `1 + xp / XP_PER_LEVEL`. Nothing stores a
//! level that was not produced by `level_for_xp`.

use serde::{Deserialize, Serialize};

/// Flat reward for creating a riff
pub const XP_PER_RIFF: u32 = 10;
/// Flat reward for sharing a riff
pub const XP_PER_SHARE: u32 = 25;
/// Reward for completing the daily challenge
pub const XP_PER_CHALLENGE: u32 = 50;
/// XP width of every level
pub const XP_PER_LEVEL: u32 = 100;

/// Level for an XP total
pub fn level_for_xp(xp: u32) -> u32 {
    1 + xp / XP_PER_LEVEL
}

/// Unlock text shown when a level is reached
pub fn level_reward(level: u32) -> &'static str {
    match level {
        2 => "Wild Mood Unlocked",
        3 => "Wave Visualizer Unlocked",
        5 => "Mood Mixer Unlocked",
        7 => "Echo Effect Unlocked",
        10 => "Master Riff Maker Badge",
        _ => "New Features Unlocked",
    }
}

/// Level-up signal returned by mutating operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUp {
    pub new_level: u32,
    pub reward: String,
}

impl LevelUp {
    pub fn new(level: u32) -> Self {
        Self {
            new_level: level,
            reward: level_reward(level).to_string(),
        }
    }

    /// Compare levels before and after a mutation
    pub fn detect(previous_level: u32, new_level: u32) -> Option<Self> {
        (new_level > previous_level).then(|| Self::new(new_level))
    }
}

/// Position of an XP total inside its level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    pub xp: u32,
    /// XP at which the current level started
    pub level_start_xp: u32,
    /// XP needed to reach the next level
    pub next_level_xp: u32,
    pub xp_into_level: u32,
    /// 0.0 - 100.0
    pub percent: f64,
}

impl LevelProgress {
    pub fn from_xp(xp: u32) -> Self {
        let level = level_for_xp(xp);
        let level_start_xp = (level - 1) * XP_PER_LEVEL;
        let xp_into_level = xp - level_start_xp;
        Self {
            level,
            xp,
            level_start_xp,
            next_level_xp: level.saturating_mul(XP_PER_LEVEL),
            xp_into_level,
            percent: xp_into_level as f64 / XP_PER_LEVEL as f64 * 100.0,
        }
    }

    pub fn xp_to_next(&self) -> u32 {
        self.next_level_xp.saturating_sub(self.xp)
    }
}
