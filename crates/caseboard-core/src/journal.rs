//! The casebook: persistent narrative history of solved levels

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One solved case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Level the entry belongs to
    pub level_id: u32,
    /// Level title at time of solve
    pub title: String,
    /// Narrative journal text from the level's metadata
    pub text: String,
    /// When the case was closed
    pub recorded_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Create an entry timestamped now
    pub fn now(level_id: u32, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level_id,
            title: title.into(),
            text: text.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// Append-only journal, de-duplicated by level id
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Rehydrate from persisted entries
    #[must_use]
    pub fn from_entries(entries: Vec<JournalEntry>) -> Self {
        Self { entries }
    }

    /// Record a solve; a second solve of the same level is ignored
    ///
    /// Returns whether the entry was actually appended.
    pub fn record(&mut self, entry: JournalEntry) -> bool {
        if self.entries.iter().any(|e| e.level_id == entry.level_id) {
            return false;
        }
        tracing::debug!(level = entry.level_id, "journal entry recorded");
        self.entries.push(entry);
        true
    }

    /// All entries in record order
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of recorded cases
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
