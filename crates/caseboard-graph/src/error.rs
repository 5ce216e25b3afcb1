//! Graph error types

use crate::node::NodeId;

/// Errors from graph mutations with archive-lifecycle preconditions
///
/// Expected conditions (absent edge, unknown node on a lookup) are modeled
/// as `Option`/no-op results on the operations themselves; these variants
/// cover the archive/restore preconditions only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The node id is not present in the graph at all
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Archive requested for a node that is already archived
    #[error("node already archived: {0}")]
    NodeArchived(NodeId),

    /// Restore requested for a node that is active
    #[error("node not archived: {0}")]
    NodeNotArchived(NodeId),
}
