//! Saved riff library.
//!
//! Riffs the user chose to keep, stored as one list under the `riffs` key.
//! Ids auto-increment from the highest id present.

use crate::error::Result;
use crate::mood::MoodCatalog;
use crate::store::{load_record, save_record, KeyValueStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::debug;

/// Store key for the riff list
pub const RIFFS_KEY: &str = "riffs";

/// Default riff length in seconds
pub const DEFAULT_RIFF_SECONDS: u32 = 30;

/// One saved riff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRiff {
    pub id: u64,
    pub mood_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_duration")]
    pub duration_seconds: u32,
}

fn default_duration() -> u32 {
    DEFAULT_RIFF_SECONDS
}

/// Saved riffs over a key-value store
pub struct RiffLibrary<S: KeyValueStore> {
    store: S,
    catalog: MoodCatalog,
    // Serializes read-modify-write of the list
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> RiffLibrary<S> {
    pub fn new(store: S, catalog: MoodCatalog) -> Self {
        Self {
            store,
            catalog,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<SavedRiff>> {
        Ok(load_record(&self.store, RIFFS_KEY)?.unwrap_or_default())
    }

    /// Save a riff and return it with its assigned id
    pub fn save(&self, mood: &str, created_at: DateTime<Utc>, duration_seconds: u32) -> Result<SavedRiff> {
        let mood = self.catalog.resolve(mood)?.id.clone();
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());

        let mut riffs = self.load()?;
        let id = riffs.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let riff = SavedRiff {
            id,
            mood_name: mood,
            created_at,
            duration_seconds,
        };
        riffs.push(riff.clone());
        save_record(&self.store, RIFFS_KEY, &riffs)?;

        debug!(id, mood = %riff.mood_name, "riff saved");
        Ok(riff)
    }

    /// All saved riffs, newest first
    pub fn list(&self) -> Result<Vec<SavedRiff>> {
        let mut riffs = self.load()?;
        riffs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(riffs)
    }

    pub fn get(&self, id: u64) -> Result<Option<SavedRiff>> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    /// Delete by id. Returns false when no riff had that id.
    pub fn delete(&self, id: u64) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());

        let mut riffs = self.load()?;
        let before = riffs.len();
        riffs.retain(|r| r.id != id);
        if riffs.len() == before {
            return Ok(false);
        }
        save_record(&self.store, RIFFS_KEY, &riffs)?;

        debug!(id, "riff deleted");
        Ok(true)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }
}
