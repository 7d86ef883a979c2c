//! Daily challenge: create a riff of a target mood for bonus XP.

use crate::level::XP_PER_CHALLENGE;
use crate::mood::{MoodCatalog, MoodEntry};
use crate::progress::ProgressUpdate;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Store key for the challenge record
pub const CHALLENGE_KEY: &str = "dailyChallenge";

/// One day's challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallenge {
    pub date: NaiveDate,
    pub target_mood: String,
    #[serde(default)]
    pub description: String,
    pub xp_reward: u32,
    pub completed: bool,
}

impl DailyChallenge {
    pub fn new(date: NaiveDate, mood: &MoodEntry) -> Self {
        Self {
            date,
            target_mood: mood.id.clone(),
            description: format!("Create a {} Riff today!", mood.display_name),
            xp_reward: XP_PER_CHALLENGE,
            completed: false,
        }
    }

    /// Pick a target mood uniformly from the catalog.
    /// Returns None for an empty catalog.
    pub fn generate<R: Rng + ?Sized>(date: NaiveDate, catalog: &MoodCatalog, rng: &mut R) -> Option<Self> {
        catalog
            .entries()
            .choose(rng)
            .map(|mood| Self::new(date, mood))
    }

    pub fn is_for(&self, today: NaiveDate) -> bool {
        self.date == today
    }

    pub fn matches(&self, mood: &str) -> bool {
        self.target_mood.eq_ignore_ascii_case(mood)
    }
}

/// What a completion attempt did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "update", rename_all = "camelCase")]
pub enum ChallengeOutcome {
    /// Completed by this call; reward applied
    Completed(ProgressUpdate),
    /// Already completed earlier today, nothing changed
    AlreadyCompleted,
    /// Riff mood is not today's target
    MoodMismatch,
}

impl ChallengeOutcome {
    pub fn is_completed_now(&self) -> bool {
        matches!(self, ChallengeOutcome::Completed(_))
    }

    pub fn update(&self) -> Option<&ProgressUpdate> {
        match self {
            ChallengeOutcome::Completed(update) => Some(update),
            _ => None,
        }
    }
}
