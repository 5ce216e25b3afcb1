//! Testing utilities for the caseboard workspace
//!
//! Shared fixtures: boards, authored levels with correctly computed
//! digests, and on-disk level layouts.

#![allow(missing_docs)]

use caseboard_graph::{close, ClueNode, Edge, NodeId, RelationGraph};
use caseboard_solution::{
    canonicalize, LevelMeta, LevelSpec, NodeSeed, SolutionDigest, SolutionSpec,
};
use std::path::Path;

pub fn clue(id: &str) -> ClueNode {
    ClueNode::new(id, format!("clue {id}"), "evidence")
}

pub fn board_with(ids: &[&str]) -> RelationGraph {
    let mut graph = RelationGraph::new();
    for id in ids {
        graph.add_node(clue(id));
    }
    graph
}

/// Digest an authored edge set exactly the way the offline tool does:
/// batch closure, canonical form, SHA-256.
pub fn authored_digest(edges: &[Edge]) -> SolutionDigest {
    SolutionDigest::compute(canonicalize(&close(edges)).as_bytes())
}

pub fn node_seed(id: &str) -> NodeSeed {
    NodeSeed {
        id: NodeId::from(id),
        text: format!("clue {id}"),
        kind: "evidence".to_string(),
        position: None,
        morph: None,
    }
}

/// A complete level whose digest matches the given authored edges
pub fn authored_level(
    id: u32,
    node_ids: &[&str],
    solution_edges: &[Edge],
    must_bin: &[&str],
) -> LevelSpec {
    LevelSpec {
        meta: LevelMeta {
            id,
            title: format!("Contract #{id}"),
            description: "Reconstruct the events.".to_string(),
            timer_seconds: None,
            glitch_intensity: None,
            journal: Some(format!("Case {id} resolved.")),
        },
        nodes: node_ids.iter().map(|id| node_seed(id)).collect(),
        solution: SolutionSpec {
            must_bin: must_bin.iter().map(|&id| NodeId::from(id)).collect(),
            hash: authored_digest(solution_edges),
        },
    }
}

/// Write a level file under its conventional name; returns the path
pub fn write_level_file(dir: &Path, spec: &LevelSpec) -> std::path::PathBuf {
    let path = dir.join(LevelSpec::file_name(spec.meta.id));
    std::fs::write(&path, serde_json::to_string_pretty(spec).unwrap()).unwrap();
    path
}
