//! Progress tracker: owns progress state and commits it to a store.
//!
//! Every mutating call holds the state lock for its whole duration, works on
//! a copy, persists the copy, and only then swaps it in. A failed write leaves
//! the in-memory state exactly as it was.

use crate::challenge::{ChallengeOutcome, DailyChallenge, CHALLENGE_KEY};
use crate::error::{Result, RiffError};
use crate::level::LevelProgress;
use crate::mood::MoodCatalog;
use crate::progress::{MoodCount, ProgressSnapshot, ProgressUpdate, UserProgress, PROGRESS_KEY};
use crate::store::{load_record, save_record, KeyValueStore};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

struct TrackerState {
    progress: UserProgress,
    challenge: Option<DailyChallenge>,
    rng: StdRng,
}

/// Gamification state for one user, backed by a key-value store
pub struct ProgressTracker<S: KeyValueStore> {
    store: S,
    catalog: MoodCatalog,
    state: Mutex<TrackerState>,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    /// Load progress and the last stored challenge. Missing or malformed
    /// records start from defaults.
    pub fn open(store: S, catalog: MoodCatalog) -> Result<Self> {
        if catalog.is_empty() {
            return Err(RiffError::EmptyCatalog);
        }

        let mut progress = match load_record::<UserProgress, _>(&store, PROGRESS_KEY)? {
            Some(progress) => progress,
            None => {
                debug!("no stored progress, starting fresh");
                UserProgress::default()
            }
        };
        let stored_level = progress.level;
        progress.normalize(&catalog);
        if stored_level != progress.level {
            warn!(stored_level, level = progress.level, "stored level out of sync with xp, corrected");
        }

        let challenge = load_record::<DailyChallenge, _>(&store, CHALLENGE_KEY)?;

        Ok(Self {
            store,
            catalog,
            state: Mutex::new(TrackerState {
                progress,
                challenge,
                rng: StdRng::from_entropy(),
            }),
        })
    }

    /// Seed challenge selection (deterministic tests)
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        let state = match self.state.get_mut() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn catalog(&self) -> &MoodCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // State is only ever replaced whole, so a poisoned lock still guards a
    // consistent value.
    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a riff created with `mood` on `today`
    pub fn record_riff_creation(&self, mood: &str, today: NaiveDate) -> Result<ProgressUpdate> {
        let mood = self.catalog.resolve(mood)?.id.clone();
        let mut state = self.lock();

        let mut next = state.progress.clone();
        let update = next.apply_riff_creation(&mood, today);
        save_record(&self.store, PROGRESS_KEY, &next)?;
        state.progress = next;

        debug!(mood = %mood, %today, xp = update.snapshot.xp, streak = update.snapshot.streak, "riff recorded");
        log_level_up(&update);
        Ok(update)
    }

    /// Record a riff share
    pub fn record_riff_share(&self) -> Result<ProgressUpdate> {
        let mut state = self.lock();

        let mut next = state.progress.clone();
        let update = next.apply_share();
        save_record(&self.store, PROGRESS_KEY, &next)?;
        state.progress = next;

        debug!(xp = update.snapshot.xp, "share recorded");
        log_level_up(&update);
        Ok(update)
    }

    /// Streak for display. Never writes; a lapsed streak reads as 0 until the
    /// next creation commits the reset.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        self.lock().progress.current_streak(today)
    }

    /// Today's challenge, generating and persisting a new one when the stored
    /// challenge belongs to another day
    pub fn get_or_create_daily_challenge(&self, today: NaiveDate) -> Result<DailyChallenge> {
        let mut state = self.lock();
        self.ensure_challenge(&mut state, today)
    }

    /// Complete today's challenge if `mood` is its target and it is still open
    pub fn check_challenge_completion(&self, mood: &str, today: NaiveDate) -> Result<ChallengeOutcome> {
        let mood = self.catalog.resolve(mood)?.id.clone();
        let mut state = self.lock();

        let challenge = self.ensure_challenge(&mut state, today)?;
        if challenge.completed {
            return Ok(ChallengeOutcome::AlreadyCompleted);
        }
        if !challenge.matches(&mood) {
            return Ok(ChallengeOutcome::MoodMismatch);
        }
        self.complete_locked(&mut state, challenge)
    }

    /// Complete today's challenge. A second call the same day is a no-op.
    pub fn complete_daily_challenge(&self, today: NaiveDate) -> Result<ChallengeOutcome> {
        let mut state = self.lock();

        let challenge = self.ensure_challenge(&mut state, today)?;
        if challenge.completed {
            return Ok(ChallengeOutcome::AlreadyCompleted);
        }
        self.complete_locked(&mut state, challenge)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.lock().progress.snapshot()
    }

    /// Copy of the last committed progress record
    pub fn progress(&self) -> UserProgress {
        self.lock().progress.clone()
    }

    pub fn level_progress(&self) -> LevelProgress {
        self.lock().progress.level_progress()
    }

    pub fn mood_history(&self) -> Vec<MoodCount> {
        self.lock().progress.mood_history(&self.catalog)
    }

    fn ensure_challenge(&self, state: &mut TrackerState, today: NaiveDate) -> Result<DailyChallenge> {
        if let Some(challenge) = state.challenge.as_ref().filter(|c| c.is_for(today)) {
            return Ok(challenge.clone());
        }

        let challenge = DailyChallenge::generate(today, &self.catalog, &mut state.rng)
            .ok_or(RiffError::EmptyCatalog)?;
        save_record(&self.store, CHALLENGE_KEY, &challenge)?;
        state.challenge = Some(challenge.clone());

        debug!(%today, target = %challenge.target_mood, "new daily challenge");
        Ok(challenge)
    }

    fn complete_locked(&self, state: &mut TrackerState, mut challenge: DailyChallenge) -> Result<ChallengeOutcome> {
        let mut progress = state.progress.clone();
        let update = progress.apply_challenge_reward(challenge.xp_reward);
        challenge.completed = true;

        save_record(&self.store, PROGRESS_KEY, &progress)?;
        if let Err(e) = save_record(&self.store, CHALLENGE_KEY, &challenge) {
            // Put the committed progress back so the reward is not half-applied
            if let Err(rollback) = save_record(&self.store, PROGRESS_KEY, &state.progress) {
                warn!(error = %rollback, "failed to restore progress after challenge write failure");
            }
            return Err(e);
        }

        state.progress = progress;
        state.challenge = Some(challenge);

        info!(xp = update.snapshot.xp, "daily challenge completed");
        log_level_up(&update);
        Ok(ChallengeOutcome::Completed(update))
    }
}

fn log_level_up(update: &ProgressUpdate) {
    if let Some(level_up) = &update.level_up {
        info!(level = level_up.new_level, reward = %level_up.reward, "level up");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    fn tracker() -> ProgressTracker<MemoryStore> {
        ProgressTracker::open(MemoryStore::new(), MoodCatalog::standard())
            .unwrap()
            .with_rng_seed(11)
    }

    #[test]
    fn test_open_empty_store_defaults() {
        let t = tracker();
        assert_eq!(t.snapshot(), ProgressSnapshot { xp: 0, level: 1, streak: 0 });
        assert_eq!(t.progress().challenges_completed, 0);
        assert!(t.progress().last_riff_date.is_none());
    }

    #[test]
    fn test_open_rejects_empty_catalog() {
        let result = ProgressTracker::open(MemoryStore::new(), MoodCatalog::new(vec![]));
        assert!(matches!(result, Err(RiffError::EmptyCatalog)));
    }

    #[test]
    fn test_creation_persists_whole_record() {
        let store = Arc::new(MemoryStore::new());
        let t = ProgressTracker::open(store.clone(), MoodCatalog::standard()).unwrap();
        t.record_riff_creation("chill", day(1)).unwrap();

        let stored: UserProgress = load_record(&store, PROGRESS_KEY).unwrap().unwrap();
        assert_eq!(stored, t.progress());
        assert_eq!(stored.mood_history["CHILL"], 1);
    }

    #[test]
    fn test_unknown_mood_rejected_without_change() {
        let t = tracker();
        t.record_riff_creation("CHILL", day(1)).unwrap();
        let before = t.progress();
        assert!(matches!(
            t.record_riff_creation("SLEEPY", day(2)),
            Err(RiffError::UnknownMood(_))
        ));
        assert!(matches!(
            t.check_challenge_completion("SLEEPY", day(2)),
            Err(RiffError::UnknownMood(_))
        ));
        assert_eq!(t.progress(), before);
    }

    #[test]
    fn test_challenge_stable_within_day() {
        let t = tracker();
        let first = t.get_or_create_daily_challenge(day(3)).unwrap();
        let second = t.get_or_create_daily_challenge(day(3)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_complete_twice_awards_once() {
        let t = tracker();
        let first = t.complete_daily_challenge(day(3)).unwrap();
        let second = t.complete_daily_challenge(day(3)).unwrap();
        assert!(first.is_completed_now());
        assert_eq!(second, ChallengeOutcome::AlreadyCompleted);
        assert_eq!(t.snapshot().xp, 50);
        assert_eq!(t.progress().challenges_completed, 1);
    }
}
