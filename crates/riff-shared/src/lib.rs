//! Shared progress core for the mood riff app.
//!
//! XP, levels, streaks, daily challenges and the saved riff library, persisted
//! through an injected key-value store.

pub mod challenge;
pub mod config;
pub mod error;
pub mod level;
pub mod library;
pub mod mood;
pub mod progress;
pub mod store;
pub mod streaks;
pub mod tracker;

pub use challenge::{ChallengeOutcome, DailyChallenge};
pub use config::RiffConfig;
pub use error::{Result, RiffError};
pub use level::{level_for_xp, level_reward, LevelProgress, LevelUp};
pub use library::{RiffLibrary, SavedRiff};
pub use mood::{MoodCatalog, MoodEntry};
pub use progress::{MoodCount, ProgressSnapshot, ProgressUpdate, UserProgress};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use tracker::ProgressTracker;
