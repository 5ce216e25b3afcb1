//! Error types for the core session layer

use crate::progress::{StateError, StoreError};
use caseboard_graph::GraphError;
use caseboard_solution::LevelError;

/// Main session error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// External level data failed to load or parse
    #[error("level data error: {0}")]
    Level(#[from] LevelError),

    /// A graph precondition was violated
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Progress/journal persistence failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Progression state machine rejected a transition
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// An operation needed a loaded level and none is
    #[error("no level loaded")]
    NoLevelLoaded,
}
