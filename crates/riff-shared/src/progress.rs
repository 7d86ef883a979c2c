//! User progress record.
//!
//! Holds XP, level, streak and per-mood history. Mutations here are pure
//! in-memory transitions; persistence is the tracker's job.

use crate::level::{level_for_xp, LevelProgress, LevelUp, XP_PER_RIFF, XP_PER_SHARE};
use crate::mood::MoodCatalog;
use crate::streaks::{advance_streak, displayed_streak, milestone_bonus, StreakChange};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store key for the progress record
pub const PROGRESS_KEY: &str = "userProgress";

/// Persisted progress for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub xp: u32,
    /// Derived from xp; recomputed on load
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_riff_date: Option<NaiveDate>,
    /// mood id -> riffs created with that mood
    #[serde(default)]
    pub mood_history: HashMap<String, u32>,
    #[serde(default)]
    pub challenges_completed: u32,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            streak: 0,
            last_riff_date: None,
            mood_history: HashMap::new(),
            challenges_completed: 0,
        }
    }
}

/// The `{xp, level, streak}` projection returned to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub xp: u32,
    pub level: u32,
    pub streak: u32,
}

/// Result of a mutating progress operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub snapshot: ProgressSnapshot,
    pub level_up: Option<LevelUp>,
}

/// Count for one mood, in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodCount {
    pub mood: String,
    pub display_name: String,
    pub count: u32,
}

impl UserProgress {
    /// Fresh progress with a zeroed history bucket per catalog mood
    pub fn new(catalog: &MoodCatalog) -> Self {
        let mut progress = Self::default();
        progress.normalize(catalog);
        progress
    }

    /// Bring a loaded record back in line: level from xp, every mood keyed
    pub fn normalize(&mut self, catalog: &MoodCatalog) {
        self.level = level_for_xp(self.xp);
        for id in catalog.ids() {
            self.mood_history.entry(id.to_string()).or_insert(0);
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            xp: self.xp,
            level: self.level,
            streak: self.streak,
        }
    }

    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::from_xp(self.xp)
    }

    /// Apply a riff creation. `mood` must already be a canonical catalog id.
    pub fn apply_riff_creation(&mut self, mood: &str, today: NaiveDate) -> ProgressUpdate {
        let previous_level = self.level;

        self.xp = self.xp.saturating_add(XP_PER_RIFF);
        *self.mood_history.entry(mood.to_string()).or_insert(0) += 1;

        let (streak, change) = advance_streak(self.streak, self.last_riff_date, today);
        self.streak = streak;
        // Only the call that moves the streak onto a milestone earns the bonus
        if change == StreakChange::Extended {
            self.xp = self.xp.saturating_add(milestone_bonus(self.streak));
        }

        self.last_riff_date = Some(today);
        self.finish(previous_level)
    }

    pub fn apply_share(&mut self) -> ProgressUpdate {
        let previous_level = self.level;
        self.xp = self.xp.saturating_add(XP_PER_SHARE);
        self.finish(previous_level)
    }

    pub fn apply_challenge_reward(&mut self, xp_reward: u32) -> ProgressUpdate {
        let previous_level = self.level;
        self.xp = self.xp.saturating_add(xp_reward);
        self.challenges_completed = self.challenges_completed.saturating_add(1);
        self.finish(previous_level)
    }

    /// Streak for display; lapsed streaks read as 0
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        displayed_streak(self.streak, self.last_riff_date, today)
    }

    pub fn mood_history(&self, catalog: &MoodCatalog) -> Vec<MoodCount> {
        catalog
            .entries()
            .iter()
            .map(|e| MoodCount {
                mood: e.id.clone(),
                display_name: e.display_name.clone(),
                count: self.mood_history.get(&e.id).copied().unwrap_or(0),
            })
            .collect()
    }

    pub fn total_riffs(&self) -> u32 {
        self.mood_history.values().sum()
    }

    fn finish(&mut self, previous_level: u32) -> ProgressUpdate {
        self.level = level_for_xp(self.xp);
        ProgressUpdate {
            snapshot: self.snapshot(),
            level_up: LevelUp::detect(previous_level, self.level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_new_has_every_mood() {
        let progress = UserProgress::new(&MoodCatalog::standard());
        assert_eq!(progress.level, 1);
        assert_eq!(progress.mood_history.len(), 4);
        assert!(progress.mood_history.values().all(|c| *c == 0));
    }

    #[test]
    fn test_first_riff() {
        let mut progress = UserProgress::new(&MoodCatalog::standard());
        let update = progress.apply_riff_creation("CHILL", day(1));
        assert_eq!(update.snapshot, ProgressSnapshot { xp: 10, level: 1, streak: 1 });
        assert_eq!(progress.last_riff_date, Some(day(1)));
        assert!(update.level_up.is_none());
    }

    #[test]
    fn test_same_day_repeat_only_adds_flat_xp() {
        let mut progress = UserProgress::new(&MoodCatalog::standard());
        progress.apply_riff_creation("HYPE", day(1));
        let update = progress.apply_riff_creation("HYPE", day(1));
        assert_eq!(update.snapshot.xp, 20);
        assert_eq!(update.snapshot.streak, 1);
        assert_eq!(progress.mood_history["HYPE"], 2);
    }

    #[test]
    fn test_same_day_repeat_at_milestone_no_second_bonus() {
        let mut progress = UserProgress::new(&MoodCatalog::standard());
        for d in 1..=5 {
            progress.apply_riff_creation("CALM", day(d));
        }
        let xp = progress.xp;
        progress.apply_riff_creation("CALM", day(5));
        assert_eq!(progress.xp, xp + 10);
        assert_eq!(progress.streak, 5);
    }

    #[test]
    fn test_normalize_fixes_level() {
        let mut progress = UserProgress {
            xp: 250,
            level: 9,
            ..Default::default()
        };
        progress.normalize(&MoodCatalog::standard());
        assert_eq!(progress.level, 3);
        assert_eq!(progress.mood_history.get("WILD"), Some(&0));
    }

    #[test]
    fn test_share_level_up() {
        let mut progress = UserProgress {
            xp: 90,
            ..Default::default()
        };
        let update = progress.apply_share();
        assert_eq!(update.snapshot.level, 2);
        assert_eq!(update.level_up, Some(LevelUp::new(2)));
    }

    #[test]
    fn test_mood_history_in_catalog_order() {
        let catalog = MoodCatalog::standard();
        let mut progress = UserProgress::new(&catalog);
        progress.apply_riff_creation("WILD", day(1));
        progress.apply_riff_creation("WILD", day(1));
        progress.apply_riff_creation("CHILL", day(1));
        let history = progress.mood_history(&catalog);
        let counts: Vec<_> = history.iter().map(|m| (m.display_name.as_str(), m.count)).collect();
        assert_eq!(counts, vec![("Chill", 1), ("Hype", 0), ("Calm", 0), ("Wild", 2)]);
        assert_eq!(progress.total_riffs(), 3);
    }

    #[test]
    fn test_record_without_level_keeps_xp() {
        let mut progress: UserProgress = serde_json::from_str(r#"{"xp":350}"#).unwrap();
        progress.normalize(&MoodCatalog::standard());
        assert_eq!(progress.xp, 350);
        assert_eq!(progress.level, 4);
        assert_eq!(progress.streak, 0);
    }

    #[test]
    fn test_serialized_field_names() {
        let progress = UserProgress::new(&MoodCatalog::standard());
        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("\"lastRiffDate\""));
        assert!(json.contains("\"moodHistory\""));
        assert!(json.contains("\"challengesCompleted\""));
    }
}
