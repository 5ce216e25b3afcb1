//! Caseboard Core
//!
//! Orchestration above the graph and verifier: level setup, submission and
//! progression, the solved-case journal, clue morphing, and the mission
//! countdown. Everything external (store, level data, randomness seed) is
//! injected — there is no ambient global state.
//!
//! # Example
//!
//! ```rust
//! use caseboard_core::{CaseSession, MemoryStore, SessionConfig};
//!
//! let store = Box::new(MemoryStore::default());
//! let session = CaseSession::new(store, SessionConfig::default()).unwrap();
//! assert_eq!(session.current_level(), 1);
//! ```

#![warn(missing_docs)]

pub mod clock;
pub mod error;
pub mod journal;
pub mod morph;
pub mod progress;
pub mod session;

// Re-exports
pub use clock::MissionClock;
pub use error::CoreError;
pub use journal::{Journal, JournalEntry};
pub use morph::MorphScheduler;
pub use progress::{
    validate_transition, JsonFileStore, LevelPhase, MemoryStore, SaveStore, StateError, StoreError,
};
pub use session::{CaseSession, SessionConfig, SubmitOutcome};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
