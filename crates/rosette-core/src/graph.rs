//! Tree storage using petgraph::StableDiGraph with monotonic NodeIds

use crate::error::TreeError;
use crate::model::{NodeId, TreeEdge, TreeNode};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use std::collections::HashMap;

/// The track tree — node storage plus parent/child bookkeeping.
///
/// Ids come from a monotonic counter and are never reused, so an id removed
/// from the graph (or discarded by a recenter) stays dead for the lifetime
/// of this instance. Child order is insertion order, kept explicitly on each
/// node so layout walks stay deterministic.
pub struct TreeGraph<P> {
    inner: StableDiGraph<TreeNode<P>, TreeEdge>,
    index: HashMap<NodeId, NodeIndex>,
    root: Option<NodeId>,
    next_id: u64,
}

impl<P> std::fmt::Debug for TreeGraph<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .field("root", &self.root)
            .finish()
    }
}

impl<P> TreeGraph<P> {
    pub fn new() -> Self {
        TreeGraph {
            inner: StableDiGraph::new(),
            index: HashMap::new(),
            root: None,
            next_id: 0,
        }
    }

    /// Insert a node under `parent` (or as the root when `parent` is
    /// `None`). Returns the assigned id.
    pub fn insert(
        &mut self,
        payload: P,
        parent: Option<NodeId>,
        tag: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        let id = NodeId(self.next_id);
        self.insert_with_id(id, payload, parent, tag)?;
        Ok(id)
    }

    /// Insert with a caller-chosen id. Engine-assigned ids never collide;
    /// this is the defensive surface for callers that mint their own.
    pub fn insert_with_id(
        &mut self,
        id: NodeId,
        payload: P,
        parent: Option<NodeId>,
        tag: impl Into<String>,
    ) -> Result<(), TreeError> {
        if self.index.contains_key(&id) {
            return Err(TreeError::DuplicateId(id));
        }
        // Validate everything up front; a failure must leave no trace.
        let depth = match parent {
            Some(pid) => {
                let parent_idx = self.index.get(&pid).ok_or(TreeError::UnknownParent(pid))?;
                self.inner[*parent_idx].depth + 1
            }
            None => {
                if self.root.is_some() {
                    return Err(TreeError::RootAlreadyPresent);
                }
                0
            }
        };

        let tag = tag.into();
        let node = TreeNode {
            id,
            payload,
            parent,
            children: Vec::new(),
            depth,
            angle: 0.0,
            position: None,
            connection_tag: tag.clone(),
        };
        let idx = self.inner.add_node(node);
        self.index.insert(id, idx);
        self.next_id = self.next_id.max(id.0 + 1);

        match parent {
            Some(pid) => {
                // Checked above, so the lookup cannot miss.
                if let Some(&parent_idx) = self.index.get(&pid) {
                    self.inner[parent_idx].children.push(id);
                    self.inner.add_edge(
                        parent_idx,
                        idx,
                        TreeEdge {
                            source: pid,
                            target: id,
                            tag,
                        },
                    );
                }
            }
            None => self.root = Some(id),
        }
        tracing::debug!(%id, depth, "node inserted");
        Ok(())
    }

    /// The root id, if the graph is populated.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode<P>> {
        self.index.get(&id).and_then(|&idx| self.inner.node_weight(idx))
    }

    /// Get a mutable node by id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode<P>> {
        match self.index.get(&id) {
            Some(&idx) => self.inner.node_weight_mut(idx),
            None => None,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Child ids of `id` in insertion order. Empty for unknown ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn depth_of(&self, id: NodeId) -> Option<u32> {
        self.node(id).map(|n| n.depth)
    }

    /// Edge weight for a parent→child pair, if both exist and are linked.
    pub fn edge(&self, parent: NodeId, child: NodeId) -> Option<&TreeEdge> {
        let parent_idx = *self.index.get(&parent)?;
        let child_idx = *self.index.get(&child)?;
        let edge_idx = self.inner.find_edge(parent_idx, child_idx)?;
        self.inner.edge_weight(edge_idx)
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Iterate over all nodes in unspecified order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &TreeNode<P>> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// `id` plus all transitively-reachable descendants, depth-first in
    /// child insertion order. Deterministic; empty for unknown ids.
    pub fn subtree_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.index.contains_key(&id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(node) = self.node(current) {
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        out
    }

    /// All node ids in depth-first order from the root.
    pub fn dfs_order(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => self.subtree_of(root),
            None => Vec::new(),
        }
    }

    /// Remove `id` and every descendant, returning the removed ids in
    /// depth-first order. The root is only removable once it has no
    /// children.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        if !self.index.contains_key(&id) {
            return Err(TreeError::UnknownNode(id));
        }
        if Some(id) == self.root && !self.children_of(id).is_empty() {
            return Err(TreeError::RootHasChildren);
        }

        let removed = self.subtree_of(id);
        // Unlink from the parent's child list first.
        if let Some(pid) = self.parent_of(id) {
            if let Some(parent) = self.node_mut(pid) {
                parent.children.retain(|&child| child != id);
            }
        }
        for &rid in &removed {
            if let Some(idx) = self.index.remove(&rid) {
                // Incident edges go with the node.
                self.inner.remove_node(idx);
            }
        }
        if Some(id) == self.root {
            self.root = None;
        }
        tracing::debug!(%id, count = removed.len(), "subtree removed");
        Ok(removed)
    }

    /// Empty all state. The id counter keeps advancing so old ids stay
    /// dead.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.index.clear();
        self.root = None;
    }
}

impl<P> Default for TreeGraph<P> {
    fn default() -> Self {
        Self::new()
    }
}
