//! Public mutation surface: add, remove, clear, recenter

use crate::config::{LayoutConfig, RootAnchor};
use crate::engine::{LayoutEngine, LayoutStats};
use crate::geometry::{CurveDescriptor, connection_curve};
use rosette_core::{NodeId, Point, TreeError, TreeGraph};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the renderer needs after one mutation: the full positions map,
/// every connection curve, and the anchor the tree was laid out against.
///
/// The renderer creates, destroys, and repositions visual elements from this
/// value; it must never write positions back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub positions: BTreeMap<NodeId, Point>,
    pub connections: Vec<CurveDescriptor>,
    pub anchor: RootAnchor,
}

/// Result of a successful [`TreeMutator::add_node`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAdded {
    pub id: NodeId,
    pub position: Point,
    pub snapshot: LayoutSnapshot,
}

/// Result of a successful [`TreeMutator::remove_node`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRemoved {
    /// The removed node and all of its descendants.
    pub removed: Vec<NodeId>,
    pub snapshot: LayoutSnapshot,
}

/// Owns the graph, the engine, and the current anchor; every mutation runs a
/// full layout pass to completion before returning, so there is no partial
/// intermediate state to observe.
///
/// All mutating methods take `&mut self`; that is the caller-must-serialize
/// contract of the core. To share a mutator across threads, wrap it in a
/// `Mutex`; one lock around this object is sufficient. Staggered "animated"
/// insertion is the caller's concern: issue sequential `add_node` calls on
/// your own timer.
pub struct TreeMutator<P> {
    graph: TreeGraph<P>,
    engine: LayoutEngine,
    anchor: RootAnchor,
    last_stats: LayoutStats,
}

impl<P> TreeMutator<P> {
    pub fn new(config: LayoutConfig, anchor: RootAnchor) -> Self {
        TreeMutator {
            graph: TreeGraph::new(),
            engine: LayoutEngine::new(config),
            anchor,
            last_stats: LayoutStats::default(),
        }
    }

    /// Create a node under `parent` (or as the root when `parent` is
    /// `None`), then relayout the whole tree.
    ///
    /// Fails fast on a duplicate id, an unknown parent, a second root, or a
    /// node that would land beyond `max_levels`; the graph is untouched on
    /// any failure.
    pub fn add_node(
        &mut self,
        payload: P,
        parent: Option<NodeId>,
        tag: impl Into<String>,
    ) -> Result<NodeAdded, TreeError> {
        if let Some(pid) = parent {
            let parent_depth = self
                .graph
                .depth_of(pid)
                .ok_or(TreeError::UnknownParent(pid))?;
            let max_levels = self.engine.config().max_levels;
            if parent_depth + 1 >= max_levels {
                return Err(TreeError::MaxDepthExceeded { max_levels });
            }
        }
        let id = self.graph.insert(payload, parent, tag)?;
        let snapshot = self.relayout();
        let position = self
            .graph
            .node(id)
            .and_then(|node| node.position)
            .unwrap_or(self.anchor.center);
        tracing::debug!(%id, x = position.x, y = position.y, "node added");
        Ok(NodeAdded {
            id,
            position,
            snapshot,
        })
    }

    /// Remove `id` and its whole subtree, then relayout the remainder.
    ///
    /// Returns `None` (a no-op, not an error) when `id` is unknown or is
    /// the root while children remain, matching the "can this operation
    /// happen" query pattern.
    pub fn remove_node(&mut self, id: NodeId) -> Option<NodeRemoved> {
        match self.graph.remove_subtree(id) {
            Ok(removed) => {
                let snapshot = self.relayout();
                tracing::debug!(%id, count = removed.len(), "node removed");
                Some(NodeRemoved { removed, snapshot })
            }
            Err(err) => {
                tracing::debug!(%id, %err, "remove refused");
                None
            }
        }
    }

    /// Drop every node. Returns `false` when the graph was already empty,
    /// so callers can skip emitting a change event for the no-op.
    pub fn clear(&mut self) -> bool {
        if self.graph.is_empty() {
            return false;
        }
        self.graph.clear();
        self.last_stats = LayoutStats::default();
        tracing::debug!("tree cleared");
        true
    }

    /// Discard the current tree and restart it around a new root payload.
    ///
    /// A full rebuild, never a re-parenting: every previous id is gone
    /// afterwards. Callers that keep history (a running tally of visited
    /// tracks, say) own preserving it across this call.
    pub fn recenter(&mut self, payload: P) -> Result<NodeAdded, TreeError> {
        self.clear();
        self.add_node(payload, None, "root")
    }

    /// Recompute the layout without changing topology and return the fresh
    /// snapshot. Every mutation goes through this too.
    pub fn relayout(&mut self) -> LayoutSnapshot {
        self.last_stats = self.engine.recompute(&mut self.graph, &self.anchor);
        self.snapshot()
    }

    /// Assemble the current positions map and connection curves, in
    /// depth-first order.
    pub fn snapshot(&self) -> LayoutSnapshot {
        let mut positions = BTreeMap::new();
        let mut connections = Vec::new();
        for id in self.graph.dfs_order() {
            let Some(node) = self.graph.node(id) else { continue };
            let Some(position) = node.position else { continue };
            positions.insert(id, position);
            if let Some(pid) = node.parent {
                if let Some(start) = self.graph.node(pid).and_then(|p| p.position) {
                    connections.push(connection_curve(
                        pid,
                        id,
                        node.connection_tag.clone(),
                        start,
                        position,
                    ));
                }
            }
        }
        LayoutSnapshot {
            positions,
            connections,
            anchor: self.anchor,
        }
    }

    /// Replace the anchor used by subsequent layout passes. Takes effect on
    /// the next mutation or [`relayout`](Self::relayout).
    pub fn set_anchor(&mut self, anchor: RootAnchor) {
        self.anchor = anchor;
    }

    pub fn anchor(&self) -> RootAnchor {
        self.anchor
    }

    /// Read access to the underlying tree.
    pub fn graph(&self) -> &TreeGraph<P> {
        &self.graph
    }

    /// Stats from the most recent layout pass.
    pub fn last_stats(&self) -> LayoutStats {
        self.last_stats
    }
}
