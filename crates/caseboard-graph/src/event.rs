//! Change notification
//!
//! Synchronous fan-out to registered listeners after each graph mutation.
//! A listener that panics is caught and logged so the remaining listeners
//! still run; the graph never aborts its own notification pass.

use crate::graph::RelationGraph;
use crate::node::NodeId;
use crate::Relation;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// A single observable graph mutation
#[derive(Debug, Clone, PartialEq)]
pub enum GraphChange {
    /// An edge was inserted; `implied` counts closure-added simultaneity edges
    EdgeAdded {
        /// Source endpoint
        source: NodeId,
        /// Target endpoint
        target: NodeId,
        /// Relation carried by the new edge
        relation: Relation,
        /// Simultaneity edges added by transitive closure alongside this one
        implied: usize,
    },
    /// The exact directed edge was removed
    EdgeRemoved {
        /// Source endpoint
        source: NodeId,
        /// Target endpoint
        target: NodeId,
    },
    /// A node moved to the archive; its incident edges were dropped
    NodeArchived(NodeId),
    /// An archived node returned to the active set (without edges)
    NodeRestored(NodeId),
    /// A node's display text was rewritten
    NodeTextChanged(NodeId),
    /// All graph state was discarded
    Cleared,
}

/// Observer notified after each graph mutation
///
/// Fan-out is synchronous and in subscription order; the closure pass has
/// fully settled before any listener sees the change.
pub trait GraphListener {
    /// React to a completed mutation
    fn on_change(&self, change: &GraphChange, graph: &RelationGraph);
}

impl<F> GraphListener for F
where
    F: Fn(&GraphChange, &RelationGraph),
{
    fn on_change(&self, change: &GraphChange, graph: &RelationGraph) {
        self(change, graph);
    }
}

/// Ordered listener registry with per-listener failure isolation
#[derive(Default, Clone)]
pub(crate) struct ListenerSet {
    listeners: Vec<Arc<dyn GraphListener>>,
}

impl ListenerSet {
    pub(crate) fn push(&mut self, listener: Arc<dyn GraphListener>) {
        self.listeners.push(listener);
    }

    pub(crate) fn emit(&self, change: &GraphChange, graph: &RelationGraph) {
        for listener in &self.listeners {
            let outcome = catch_unwind(AssertUnwindSafe(|| listener.on_change(change, graph)));
            if outcome.is_err() {
                tracing::warn!(?change, "graph listener panicked; continuing fan-out");
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("count", &self.listeners.len())
            .finish()
    }
}
