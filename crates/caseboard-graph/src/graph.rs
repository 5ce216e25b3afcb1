//! The relation graph: node/edge storage and archive lifecycle

use crate::closure;
use crate::edge::{Edge, Relation};
use crate::error::GraphError;
use crate::event::{GraphChange, GraphListener, ListenerSet};
use crate::node::{ClueNode, NodeId, Position};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// The investigation board's relational graph
///
/// Exclusively owns node and edge records; renderers read snapshots through
/// the accessor methods and react to mutations via subscribed listeners.
/// Single-threaded by design — every mutation runs to completion (closure
/// included) before its notification fires.
#[derive(Default)]
pub struct RelationGraph {
    active: IndexMap<NodeId, ClueNode>,
    archived: IndexMap<NodeId, ClueNode>,
    edges: Vec<Edge>,
    listeners: ListenerSet,
}

impl RelationGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- node lifecycle ---

    /// Insert a node into the active set, silently overwriting any node
    /// already stored under the same id
    ///
    /// Does not notify: insertion happens in bulk at level setup, before
    /// anything worth re-rendering exists.
    pub fn add_node(&mut self, node: ClueNode) {
        self.active.insert(node.id.clone(), node);
    }

    /// Soft-remove a node: all incident edges are dropped and the record
    /// moves to the archive, identity intact
    ///
    /// # Errors
    /// [`GraphError::NodeArchived`] if already archived,
    /// [`GraphError::NodeNotFound`] if the id is unknown.
    pub fn archive_node(&mut self, id: &NodeId) -> Result<(), GraphError> {
        let Some(node) = self.active.shift_remove(id) else {
            if self.archived.contains_key(id) {
                return Err(GraphError::NodeArchived(id.clone()));
            }
            return Err(GraphError::NodeNotFound(id.clone()));
        };

        self.edges.retain(|e| !e.touches(id));
        self.archived.insert(id.clone(), node);
        tracing::debug!(node = %id, "node archived");
        self.notify(&GraphChange::NodeArchived(id.clone()));
        Ok(())
    }

    /// Reinstate an archived node
    ///
    /// The exact record returns — same id, text, kind, and last position.
    /// Edges are NOT restored; archiving is lossy for connectivity and the
    /// player must re-link.
    ///
    /// # Errors
    /// [`GraphError::NodeNotArchived`] if the node is active,
    /// [`GraphError::NodeNotFound`] if the id is unknown.
    pub fn restore_node(&mut self, id: &NodeId) -> Result<(), GraphError> {
        let Some(node) = self.archived.shift_remove(id) else {
            if self.active.contains_key(id) {
                return Err(GraphError::NodeNotArchived(id.clone()));
            }
            return Err(GraphError::NodeNotFound(id.clone()));
        };

        self.active.insert(id.clone(), node);
        tracing::debug!(node = %id, "node restored");
        self.notify(&GraphChange::NodeRestored(id.clone()));
        Ok(())
    }

    /// Rewrite a node's display text (the interference "morph" effect)
    ///
    /// Works on active and archived nodes alike.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if the id is unknown.
    pub fn set_node_text(&mut self, id: &NodeId, text: impl Into<String>) -> Result<(), GraphError> {
        let node = self
            .active
            .get_mut(id)
            .or_else(|| self.archived.get_mut(id))
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        node.text = text.into();
        self.notify(&GraphChange::NodeTextChanged(id.clone()));
        Ok(())
    }

    /// Record a node's board position
    ///
    /// The one unvalidated write-through: positions belong to the drag
    /// interaction and are only persisted here for restore consistency.
    /// Unknown ids are silently ignored; no notification fires.
    pub fn set_node_position(&mut self, id: &NodeId, position: Position) {
        if let Some(node) = self.active.get_mut(id).or_else(|| self.archived.get_mut(id)) {
            node.position = position;
        }
    }

    // --- edge mutation ---

    /// Insert a directed, typed edge
    ///
    /// Endpoints are not checked for existence. If an edge of this relation
    /// already occupies the pair the call is a no-op (no notification —
    /// observable state is unchanged); occupancy is direction-agnostic for
    /// simultaneity, whose stored direction is arbitrary — closure may have
    /// linked the pair the other way round than the player now draws it.
    /// An occupying edge of a different relation is replaced (type
    /// cycling). A simultaneity insertion runs the transitive closure
    /// before listeners are notified.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, relation: Relation) {
        if self
            .edges
            .iter()
            .any(|e| e.occupies(&source, &target) && e.relation == relation)
        {
            return;
        }
        // A different relation occupying the pair: replace, single
        // notification after the whole mutation settles.
        self.edges.retain(|e| !e.occupies(&source, &target));

        self.edges.push(Edge {
            source: source.clone(),
            target: target.clone(),
            relation,
        });

        let implied = if relation == Relation::Simultaneity {
            closure::propagate(&mut self.edges, source.clone(), target.clone())
        } else {
            0
        };

        tracing::debug!(%source, %target, %relation, implied, "edge added");
        self.notify(&GraphChange::EdgeAdded {
            source,
            target,
            relation,
            implied,
        });
    }

    /// Remove the single edge matching the exact directed pair
    ///
    /// Does not touch the reverse direction and does not cascade through the
    /// simultaneity closure. Returns the removed edge, or `None` if the pair
    /// carried nothing (a silent no-op).
    pub fn remove_edge(&mut self, source: &NodeId, target: &NodeId) -> Option<Edge> {
        let index = self
            .edges
            .iter()
            .position(|e| e.source == *source && e.target == *target)?;
        let removed = self.edges.remove(index);
        self.notify(&GraphChange::EdgeRemoved {
            source: source.clone(),
            target: target.clone(),
        });
        Some(removed)
    }

    /// Discard all state (new level load)
    ///
    /// Safe to call at any time; propagation never outlives the mutation
    /// that started it, so nothing from a discarded level can leak in.
    pub fn clear(&mut self) {
        self.active.clear();
        self.archived.clear();
        self.edges.clear();
        self.notify(&GraphChange::Cleared);
    }

    // --- lookups ---

    /// Directed edge lookup for the exact (source, target) pair
    #[must_use]
    pub fn edge(&self, source: &NodeId, target: &NodeId) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.source == *source && e.target == *target)
    }

    /// Direction-agnostic: is there any edge between the two ids?
    #[must_use]
    pub fn has_any_connection(&self, a: &NodeId, b: &NodeId) -> bool {
        closure::any_connection(&self.edges, a, b)
    }

    /// Active node lookup
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&ClueNode> {
        self.active.get(id)
    }

    /// Is the id currently archived?
    #[must_use]
    pub fn is_archived(&self, id: &NodeId) -> bool {
        self.archived.contains_key(id)
    }

    /// Active nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &ClueNode> {
        self.active.values()
    }

    /// Archived nodes, in archival order (for the bin-stack view)
    pub fn archived_nodes(&self) -> impl Iterator<Item = &ClueNode> {
        self.archived.values()
    }

    /// The full ordered edge list
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of active nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.active.len()
    }

    /// Number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // --- notification ---

    /// Register a listener; fan-out is synchronous, in subscription order
    pub fn subscribe(&mut self, listener: Arc<dyn GraphListener>) {
        self.listeners.push(listener);
    }

    fn notify(&self, change: &GraphChange) {
        self.listeners.emit(change, self);
    }
}

impl fmt::Debug for RelationGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationGraph")
            .field("active", &self.active.len())
            .field("archived", &self.archived.len())
            .field("edges", &self.edges.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn n(id: &str) -> ClueNode {
        ClueNode::new(id, format!("clue {id}"), "evidence")
    }

    fn graph_with(ids: &[&str]) -> RelationGraph {
        let mut g = RelationGraph::new();
        for id in ids {
            g.add_node(n(id));
        }
        g
    }

    #[test]
    fn add_node_overwrites_by_id() {
        let mut g = RelationGraph::new();
        g.add_node(n("n1"));
        g.add_node(ClueNode::new("n1", "rewritten", "testimony"));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.node(&"n1".into()).unwrap().text, "rewritten");
    }

    #[test]
    fn same_relation_same_pair_is_noop() {
        let mut g = graph_with(&["n1", "n2"]);
        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);
        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn different_relation_replaces_exact_pair() {
        let mut g = graph_with(&["n1", "n2"]);
        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);
        g.add_edge("n1".into(), "n2".into(), Relation::Consequence);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(
            g.edge(&"n1".into(), &"n2".into()).unwrap().relation,
            Relation::Consequence
        );
    }

    #[test]
    fn opposite_directions_are_distinct_edges() {
        // Preserved semantics: the overwrite rule keys on the exact directed
        // pair, so A->B and B->A of different relations coexist.
        let mut g = graph_with(&["n1", "n2"]);
        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);
        g.add_edge("n2".into(), "n1".into(), Relation::Consequence);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn reversed_redraw_of_implied_simultaneity_is_noop() {
        // Closure stores implied edges in a direction the player never
        // chose; re-drawing that pair the other way round must not put a
        // second simultaneity edge on it.
        let mut g = graph_with(&["n0", "n1", "n2", "n4"]);
        g.add_edge("n0".into(), "n1".into(), Relation::Simultaneity);
        g.add_edge("n2".into(), "n4".into(), Relation::Simultaneity);
        g.add_edge("n0".into(), "n4".into(), Relation::Simultaneity);

        // The two components merged into a clique; n0-n2 is closure-made.
        assert!(g.has_any_connection(&"n0".into(), &"n2".into()));
        assert_eq!(g.edge_count(), 6);

        g.add_edge("n2".into(), "n0".into(), Relation::Simultaneity);

        assert_eq!(g.edge_count(), 6, "one edge per undirected pair");
    }

    #[test]
    fn directional_draw_replaces_simultaneity_in_either_direction() {
        // The stored direction of a simultaneity edge is arbitrary, so
        // type cycling over it works from both ends of the pair.
        let mut g = graph_with(&["n1", "n2"]);
        g.add_edge("n1".into(), "n2".into(), Relation::Simultaneity);
        g.add_edge("n2".into(), "n1".into(), Relation::Sequence);

        assert_eq!(g.edge_count(), 1);
        assert_eq!(
            g.edge(&"n2".into(), &"n1".into()).unwrap().relation,
            Relation::Sequence
        );
    }

    #[test]
    fn simultaneity_insert_triggers_closure() {
        let mut g = graph_with(&["n1", "n2", "n3"]);
        g.add_edge("n1".into(), "n2".into(), Relation::Simultaneity);
        g.add_edge("n2".into(), "n3".into(), Relation::Simultaneity);

        assert!(g.has_any_connection(&"n1".into(), &"n3".into()));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn remove_edge_is_exact_pair_only() {
        let mut g = graph_with(&["n1", "n2"]);
        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);
        assert!(g.remove_edge(&"n2".into(), &"n1".into()).is_none());
        assert_eq!(g.edge_count(), 1);
        assert!(g.remove_edge(&"n1".into(), &"n2".into()).is_some());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn archive_drops_incident_edges_and_moves_node() {
        let mut g = graph_with(&["n1", "n2", "n3"]);
        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);
        g.add_edge("n3".into(), "n1".into(), Relation::Consequence);
        g.add_edge("n2".into(), "n3".into(), Relation::Sequence);

        g.archive_node(&"n1".into()).unwrap();

        assert_eq!(g.node_count(), 2);
        assert!(g.is_archived(&"n1".into()));
        assert_eq!(g.edge_count(), 1); // only n2->n3 survives
    }

    #[test]
    fn archive_restore_round_trips_node_data_but_not_edges() {
        let mut g = RelationGraph::new();
        g.add_node(n("n1").at(42.0, 17.0));
        g.add_node(n("n2"));
        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);

        g.archive_node(&"n1".into()).unwrap();
        g.restore_node(&"n1".into()).unwrap();

        let restored = g.node(&"n1".into()).unwrap();
        assert_eq!(restored.text, "clue n1");
        assert_eq!(restored.kind, "evidence");
        assert_eq!(restored.position, Position::new(42.0, 17.0));
        assert_eq!(g.edge_count(), 0, "edges are not auto-restored");
    }

    #[test]
    fn archive_preconditions() {
        let mut g = graph_with(&["n1"]);
        assert_eq!(
            g.archive_node(&"ghost".into()),
            Err(GraphError::NodeNotFound("ghost".into()))
        );
        g.archive_node(&"n1".into()).unwrap();
        assert_eq!(
            g.archive_node(&"n1".into()),
            Err(GraphError::NodeArchived("n1".into()))
        );
        g.restore_node(&"n1".into()).unwrap();
        assert_eq!(
            g.restore_node(&"n1".into()),
            Err(GraphError::NodeNotArchived("n1".into()))
        );
    }

    #[test]
    fn clear_discards_everything() {
        let mut g = graph_with(&["n1", "n2"]);
        g.add_edge("n1".into(), "n2".into(), Relation::Simultaneity);
        g.archive_node(&"n2".into()).unwrap();
        g.clear();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.archived_nodes().next().is_none());
    }

    #[test]
    fn listeners_fire_in_order_after_closure_settles() {
        let seen: Arc<Mutex<Vec<(String, usize)>>> = Arc::new(Mutex::new(Vec::new()));

        let mut g = graph_with(&["n1", "n2", "n3"]);
        let sink = Arc::clone(&seen);
        g.subscribe(Arc::new(move |change: &GraphChange, graph: &RelationGraph| {
            if let GraphChange::EdgeAdded { source, .. } = change {
                sink.lock()
                    .unwrap()
                    .push((source.to_string(), graph.edge_count()));
            }
        }));

        g.add_edge("n1".into(), "n2".into(), Relation::Simultaneity);
        g.add_edge("n2".into(), "n3".into(), Relation::Simultaneity);

        // Second event already sees all three edges: closure ran first.
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("n1".to_string(), 1), ("n2".to_string(), 3)]
        );
    }

    #[test]
    fn panicking_listener_does_not_abort_fanout() {
        let seen = Arc::new(Mutex::new(0usize));

        let mut g = graph_with(&["n1", "n2"]);
        g.subscribe(Arc::new(|change: &GraphChange, _: &RelationGraph| {
            if matches!(change, GraphChange::EdgeAdded { .. }) {
                panic!("listener failure");
            }
        }));
        let sink = Arc::clone(&seen);
        g.subscribe(Arc::new(move |_: &GraphChange, _: &RelationGraph| {
            *sink.lock().unwrap() += 1;
        }));

        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn noop_insert_does_not_notify() {
        let seen = Arc::new(Mutex::new(0usize));

        let mut g = graph_with(&["n1", "n2"]);
        let sink = Arc::clone(&seen);
        g.subscribe(Arc::new(move |_: &GraphChange, _: &RelationGraph| {
            *sink.lock().unwrap() += 1;
        }));

        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);
        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn add_node_is_silent() {
        let seen = Arc::new(Mutex::new(0usize));

        let mut g = RelationGraph::new();
        let sink = Arc::clone(&seen);
        g.subscribe(Arc::new(move |_: &GraphChange, _: &RelationGraph| {
            *sink.lock().unwrap() += 1;
        }));

        g.add_node(n("n1"));
        assert_eq!(*seen.lock().unwrap(), 0);
    }

    #[test]
    fn dangling_edges_are_allowed() {
        let mut g = RelationGraph::new();
        g.add_edge("ghost-a".into(), "ghost-b".into(), Relation::Sequence);
        assert_eq!(g.edge_count(), 1);
    }
}
