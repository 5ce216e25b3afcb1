//! Clue nodes and their stable identifiers

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

/// Stable string identifier for a clue node
///
/// Identity survives archive/restore; a restored node is the exact record
/// that was archived, found under the same id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new id from anything string-like
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// 2D board position
///
/// Owned by the presentation layer (drag interaction writes it) but kept on
/// the node record so archive/restore preserves placement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal board coordinate
    pub x: f64,
    /// Vertical board coordinate
    pub y: f64,
}

impl Position {
    /// Create a position from coordinates
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A narrative clue on the board
///
/// `text` is mutable at runtime (the interference effect may overwrite it);
/// `kind` is a free-form tag consumed by the renderer, never interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClueNode {
    /// Unique stable identifier
    pub id: NodeId,
    /// Display text (mutable; may be rewritten by a morph effect)
    pub text: String,
    /// Free-form type tag
    pub kind: String,
    /// Last known board position
    pub position: Position,
}

impl ClueNode {
    /// Create a node at the origin
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: kind.into(),
            position: Position::default(),
        }
    }

    /// Builder-style position assignment
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }
}
