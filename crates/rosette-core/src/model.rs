//! Core data structures for the track tree

use serde::{Deserialize, Serialize};

/// Unique, stable identifier for a node.
///
/// Assigned by [`TreeGraph`](crate::TreeGraph) from a monotonic counter, so
/// an id removed from the graph is never handed out again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in the shared layout coordinate space.
///
/// Screen convention: y grows downward, so an angle of −π/2 points to
/// 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// The point at `distance` from `self` in direction `angle` (radians).
    pub fn polar_offset(&self, angle: f64, distance: f64) -> Point {
        Point {
            x: self.x + distance * angle.cos(),
            y: self.y + distance * angle.sin(),
        }
    }

    /// Straight-line midpoint between `self` and `other`.
    pub fn midpoint(&self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// A single node in the track tree.
///
/// `payload` is opaque application data; the layout passes never look inside
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<P> {
    pub id: NodeId,
    pub payload: P,
    pub parent: Option<NodeId>,
    /// Child ids in insertion order. Layout walks depend on this order.
    pub children: Vec<NodeId>,
    /// Distance from the root in edges; 0 for the root.
    pub depth: u32,
    /// Angle (radians) at which this node sits relative to its parent.
    /// Meaningless for the root; anchors the fan of this node's own
    /// children.
    pub angle: f64,
    /// Set by the layout engine; absent until the first layout pass.
    pub position: Option<Point>,
    /// Caller-supplied label for the edge from the parent.
    pub connection_tag: String,
}

/// The labeled link from a parent node to a child node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub tag: String,
}
