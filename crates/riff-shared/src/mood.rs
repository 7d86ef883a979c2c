//! Mood catalog.
//!
//! Moods are the emotional categories a riff is generated for. The catalog is
//! an ordered list; order is pinned so history charts and challenge selection
//! stay deterministic for a given catalog.
//!
//! Standard order: Chill, Hype, Calm, Wild

use crate::error::{Result, RiffError};
use serde::{Deserialize, Serialize};

/// One mood in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Canonical identifier, e.g. "CHILL"
    pub id: String,
    /// Human readable name, e.g. "Chill"
    pub display_name: String,
}

impl MoodEntry {
    pub fn new(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

impl std::fmt::Display for MoodEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Fixed, ordered set of moods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodCatalog {
    entries: Vec<MoodEntry>,
}

impl MoodCatalog {
    /// Build a catalog from entries. Duplicate ids keep the first occurrence.
    pub fn new(entries: Vec<MoodEntry>) -> Self {
        let mut deduped: Vec<MoodEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !deduped.iter().any(|e| e.id.eq_ignore_ascii_case(&entry.id)) {
                deduped.push(entry);
            }
        }
        Self { entries: deduped }
    }

    /// The four moods shipped with the app
    pub fn standard() -> Self {
        Self::new(vec![
            MoodEntry::new("CHILL", "Chill"),
            MoodEntry::new("HYPE", "Hype"),
            MoodEntry::new("CALM", "Calm"),
            MoodEntry::new("WILD", "Wild"),
        ])
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a mood by id (case-insensitive). Unknown ids are rejected.
    pub fn resolve(&self, mood: &str) -> Result<&MoodEntry> {
        let wanted = mood.trim();
        self.entries
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RiffError::UnknownMood(mood.to_string()))
    }

    pub fn contains(&self, mood: &str) -> bool {
        self.resolve(mood).is_ok()
    }

    /// Display name for an id, falling back to the id itself
    pub fn display_name<'a>(&'a self, mood: &'a str) -> &'a str {
        self.resolve(mood)
            .map(|e| e.display_name.as_str())
            .unwrap_or(mood)
    }
}

impl Default for MoodCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order_is_pinned() {
        let catalog = MoodCatalog::standard();
        let ids: Vec<_> = catalog.ids().collect();
        assert_eq!(ids, vec!["CHILL", "HYPE", "CALM", "WILD"]);
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let catalog = MoodCatalog::standard();
        assert_eq!(catalog.resolve("chill").unwrap().id, "CHILL");
        assert_eq!(catalog.resolve(" Wild ").unwrap().display_name, "Wild");
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = MoodCatalog::standard();
        match catalog.resolve("GRUMPY") {
            Err(RiffError::UnknownMood(m)) => assert_eq!(m, "GRUMPY"),
            other => panic!("expected UnknownMood, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicates_dropped() {
        let catalog = MoodCatalog::new(vec![
            MoodEntry::new("CHILL", "Chill"),
            MoodEntry::new("chill", "Other"),
            MoodEntry::new("HYPE", "Hype"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.display_name("CHILL"), "Chill");
    }
}
