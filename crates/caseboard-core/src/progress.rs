//! Level progression state machine and save persistence
//!
//! A level is `InProgress` until a submission verifies, then `Solved`; the
//! campaign reaches the terminal `Completed` once no further level exists.
//! Persistence goes through the injected [`SaveStore`] — the core never
//! touches an ambient storage location on its own.

use crate::journal::JournalEntry;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Phase of the currently loaded level / campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Board is live; submissions are accepted
    InProgress,
    /// Verification succeeded; waiting to advance
    Solved,
    /// Terminal: no further level exists
    Completed,
}

/// Transitions legal from a given phase
#[must_use]
pub fn allowed_transitions(from: LevelPhase) -> Vec<LevelPhase> {
    use LevelPhase::*;
    match from {
        InProgress => vec![Solved],
        Solved => vec![InProgress, Completed],
        Completed => vec![],
    }
}

/// Validate a phase transition
///
/// # Errors
/// [`StateError::IllegalTransition`] when the move is not permitted.
pub fn validate_transition(from: LevelPhase, to: LevelPhase) -> Result<(), StateError> {
    if allowed_transitions(from).into_iter().any(|s| s == to) {
        Ok(())
    } else {
        Err(StateError::IllegalTransition { from, to })
    }
}

/// Progression state machine errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// The requested phase change is not in the allowed set
    #[error("illegal transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Phase the level was in
        from: LevelPhase,
        /// Phase that was requested
        to: LevelPhase,
    },
}

/// Persistence slot for campaign progress and the journal
///
/// The original keeps these in two browser-storage keys; here it is an
/// injected abstraction with an in-memory and a JSON-file implementation.
pub trait SaveStore {
    /// Last saved level id, if any
    fn load_progress(&self) -> Result<Option<u32>, StoreError>;
    /// Persist the level the player should resume at
    fn save_progress(&mut self, level_id: u32) -> Result<(), StoreError>;
    /// Previously recorded journal entries
    fn load_journal(&self) -> Result<Vec<JournalEntry>, StoreError>;
    /// Persist the full journal
    fn save_journal(&mut self, entries: &[JournalEntry]) -> Result<(), StoreError>;
}

/// Persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying I/O failed
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data did not parse
    #[error("corrupt store data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Volatile store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    progress: Option<u32>,
    journal: Vec<JournalEntry>,
}

impl SaveStore for MemoryStore {
    fn load_progress(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.progress)
    }

    fn save_progress(&mut self, level_id: u32) -> Result<(), StoreError> {
        self.progress = Some(level_id);
        Ok(())
    }

    fn load_journal(&self) -> Result<Vec<JournalEntry>, StoreError> {
        Ok(self.journal.clone())
    }

    fn save_journal(&mut self, entries: &[JournalEntry]) -> Result<(), StoreError> {
        self.journal = entries.to_vec();
        Ok(())
    }
}

/// File-backed store: `progress.json` and `journal.json` under one directory
#[derive(Debug)]
pub struct JsonFileStore {
    progress_path: PathBuf,
    journal_path: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            progress_path: dir.join("progress.json"),
            journal_path: dir.join("journal.json"),
        }
    }
}

impl SaveStore for JsonFileStore {
    fn load_progress(&self) -> Result<Option<u32>, StoreError> {
        match std::fs::read_to_string(&self.progress_path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_progress(&mut self, level_id: u32) -> Result<(), StoreError> {
        std::fs::write(&self.progress_path, serde_json::to_string(&level_id)?)?;
        Ok(())
    }

    fn load_journal(&self) -> Result<Vec<JournalEntry>, StoreError> {
        match std::fs::read_to_string(&self.journal_path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save_journal(&mut self, entries: &[JournalEntry]) -> Result<(), StoreError> {
        std::fs::write(&self.journal_path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}
