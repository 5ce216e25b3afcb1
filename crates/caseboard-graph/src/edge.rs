//! Typed relational edges

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Relation carried by an edge
///
/// The set is closed. Simultaneity is semantically symmetric; the other two
/// are directional. Storage is directional for all three — symmetry for
/// simultaneity is enforced by the closure algorithm and by
/// direction-agnostic lookups, not by the edge representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Temporal precedence: source happened before target
    Sequence,
    /// Causal link: source caused target
    Consequence,
    /// Concurrency: source and target happened together (symmetric)
    Simultaneity,
}

impl Relation {
    /// Wire-format name, as used in level and solution files
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Relation::Sequence => "sequence",
            Relation::Consequence => "consequence",
            Relation::Simultaneity => "simultaneity",
        }
    }

    /// Whether the relation is semantically symmetric
    #[inline]
    #[must_use]
    pub const fn is_symmetric(&self) -> bool {
        matches!(self, Relation::Simultaneity)
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = UnknownRelation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequence" => Ok(Relation::Sequence),
            "consequence" => Ok(Relation::Consequence),
            "simultaneity" => Ok(Relation::Simultaneity),
            other => Err(UnknownRelation(other.to_owned())),
        }
    }
}

/// Error parsing a relation name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation: {0}")]
pub struct UnknownRelation(pub String);

/// A directed, typed edge between two clue nodes
///
/// At most one edge exists per exact directed pair; inserting a different
/// relation on the same pair replaces the old edge (type cycling). A
/// symmetric edge additionally claims the reverse direction — see
/// [`Edge::occupies`]. Endpoints are not validated against the node set — a
/// dangling edge is simply unrenderable downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id
    pub source: NodeId,
    /// Target node id
    pub target: NodeId,
    /// Relation type
    #[serde(rename = "type")]
    pub relation: Relation,
}

impl Edge {
    /// Create an edge
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, relation: Relation) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation,
        }
    }

    /// Whether the edge touches the given node, in either position
    #[inline]
    #[must_use]
    pub fn touches(&self, id: &NodeId) -> bool {
        self.source == *id || self.target == *id
    }

    /// Whether the edge links the two ids, in either direction
    #[inline]
    #[must_use]
    pub fn links(&self, a: &NodeId, b: &NodeId) -> bool {
        (self.source == *a && self.target == *b) || (self.source == *b && self.target == *a)
    }

    /// Whether this edge stands on the directed pair `(source, target)`
    /// for insertion purposes
    ///
    /// An exact directed match always does. A symmetric edge also stands
    /// on the reverse of its stored direction: the stored direction of a
    /// simultaneity edge is an artifact (closure picks one arbitrarily),
    /// so the logical edge covers the pair both ways.
    #[inline]
    #[must_use]
    pub fn occupies(&self, source: &NodeId, target: &NodeId) -> bool {
        (self.source == *source && self.target == *target)
            || (self.relation.is_symmetric() && self.source == *target && self.target == *source)
    }

    /// The endpoint opposite to `id`, if the edge touches it
    #[must_use]
    pub fn other_end(&self, id: &NodeId) -> Option<&NodeId> {
        if self.source == *id {
            Some(&self.target)
        } else if self.target == *id {
            Some(&self.source)
        } else {
            None
        }
    }
}
