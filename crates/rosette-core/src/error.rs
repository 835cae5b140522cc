//! Structural error taxonomy for the track tree

use crate::model::NodeId;
use thiserror::Error;

/// Structural failures raised by [`TreeGraph`](crate::TreeGraph) mutations.
///
/// Every failing mutation aborts before touching state, so the graph is
/// never left half-updated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("node id already present: {0}")]
    DuplicateId(NodeId),

    #[error("parent node not found: {0}")]
    UnknownParent(NodeId),

    #[error("node not found: {0}")]
    UnknownNode(NodeId),

    #[error("graph already has a root")]
    RootAlreadyPresent,

    #[error("root still has children")]
    RootHasChildren,

    #[error("node would exceed the maximum tree depth of {max_levels} levels")]
    MaxDepthExceeded { max_levels: u32 },
}
