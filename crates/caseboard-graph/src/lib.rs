//! Caseboard Relation Graph
//!
//! Node/edge storage for the investigation board, with the simultaneity
//! closure invariant maintained on every mutation.
//!
//! # Overview
//!
//! The graph crate provides:
//! - **RelationGraph**: active/archived clue nodes plus a typed edge list
//! - **SimultaneityClosure**: worklist transitive closure over simultaneity
//!   edges, shared between the runtime and the offline authoring tool
//! - **GraphListener**: synchronous change notification for renderers
//!
//! # Example
//!
//! ```rust
//! use caseboard_graph::{ClueNode, NodeId, Relation, RelationGraph};
//!
//! let mut graph = RelationGraph::new();
//! graph.add_node(ClueNode::new("n1", "The witness lied", "testimony"));
//! graph.add_node(ClueNode::new("n2", "The alibi checks out", "testimony"));
//! graph.add_node(ClueNode::new("n3", "The door was forced", "evidence"));
//!
//! graph.add_edge("n1".into(), "n2".into(), Relation::Simultaneity);
//! graph.add_edge("n2".into(), "n3".into(), Relation::Simultaneity);
//!
//! // Closure inserted the implied n1-n3 connection.
//! assert!(graph.has_any_connection(&NodeId::from("n1"), &NodeId::from("n3")));
//! assert_eq!(graph.edge_count(), 3);
//! ```

#![warn(missing_docs)]

pub mod closure;
pub mod edge;
pub mod error;
pub mod event;
pub mod graph;
pub mod node;

// Re-exports
pub use closure::close;
pub use edge::{Edge, Relation};
pub use error::GraphError;
pub use event::{GraphChange, GraphListener};
pub use graph::RelationGraph;
pub use node::{ClueNode, NodeId, Position};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for graph operations
    pub use crate::{
        ClueNode, Edge, GraphChange, GraphError, GraphListener, NodeId, Position, Relation,
        RelationGraph,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
