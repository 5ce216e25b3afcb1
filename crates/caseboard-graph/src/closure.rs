//! Simultaneity transitive closure
//!
//! Simultaneity must stay an equivalence relation on the active node set:
//! whenever A-B and B-C carry simultaneity, an A-C connection must exist in
//! some direction. This module is the single implementation of that
//! maintenance, used incrementally by [`RelationGraph::add_edge`] and in
//! batch by the offline authoring tool. Both paths run the same worklist
//! over the same edge representation, so a player-built closure and an
//! authored closure of the same input are the same edge set.
//!
//! [`RelationGraph::add_edge`]: crate::graph::RelationGraph::add_edge

use crate::edge::{Edge, Relation};
use crate::node::NodeId;
use std::collections::VecDeque;

/// Direction-agnostic connection check over a raw edge list
///
/// Deliberately ignores the relation type: a pair already linked by any
/// relation is never given a second, simultaneity-typed edge by closure.
pub(crate) fn any_connection(edges: &[Edge], a: &NodeId, b: &NodeId) -> bool {
    edges.iter().any(|e| e.links(a, b))
}

/// Simultaneity neighbors of `of`, in either direction, excluding one id
fn sim_neighbors(edges: &[Edge], of: &NodeId, excluding: &NodeId) -> Vec<NodeId> {
    edges
        .iter()
        .filter(|e| e.relation == Relation::Simultaneity)
        .filter_map(|e| e.other_end(of))
        .filter(|id| *id != excluding)
        .cloned()
        .collect()
}

/// Close the simultaneity subgraph starting from one just-linked pair
///
/// Explicit worklist instead of call recursion: a pair is enqueued only when
/// a new edge was inserted between a previously unconnected pair, and the
/// node set is finite, so the loop terminates. Worst case O(k²) new edges
/// when two components of combined size k merge.
///
/// Returns the number of edges inserted.
pub(crate) fn propagate(edges: &mut Vec<Edge>, seed_a: NodeId, seed_b: NodeId) -> usize {
    let mut pending: VecDeque<(NodeId, NodeId)> = VecDeque::new();
    pending.push_back((seed_a, seed_b));
    let mut added = 0;

    while let Some((a, b)) = pending.pop_front() {
        // Link b to every simultaneity neighbor of a it is not yet touching.
        for neighbor in sim_neighbors(edges, &a, &b) {
            if !any_connection(edges, &b, &neighbor) {
                edges.push(Edge {
                    source: b.clone(),
                    target: neighbor.clone(),
                    relation: Relation::Simultaneity,
                });
                added += 1;
                pending.push_back((b.clone(), neighbor));
            }
        }
        // And the mirror image.
        for neighbor in sim_neighbors(edges, &b, &a) {
            if !any_connection(edges, &a, &neighbor) {
                edges.push(Edge {
                    source: a.clone(),
                    target: neighbor.clone(),
                    relation: Relation::Simultaneity,
                });
                added += 1;
                pending.push_back((a.clone(), neighbor));
            }
        }
    }

    added
}

/// Batch closure over a complete edge set
///
/// Seeds the worklist with every simultaneity edge already present and runs
/// the same propagation as the incremental path. Used at authoring time to
/// expand a hand-written solution into its closed form before hashing.
/// Idempotent: closing a closed set adds nothing.
#[must_use]
pub fn close(edges: &[Edge]) -> Vec<Edge> {
    let mut out = edges.to_vec();
    let seeds: Vec<(NodeId, NodeId)> = out
        .iter()
        .filter(|e| e.relation == Relation::Simultaneity)
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect();

    for (a, b) in seeds {
        propagate(&mut out, a, b);
    }
    out
}
