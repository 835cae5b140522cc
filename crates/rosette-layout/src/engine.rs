//! Full-tree layout recomputation

use crate::config::{LayoutConfig, RootAnchor};
use crate::solver::{Placement, PositionSolver};
use rosette_core::{NodeId, Point, TreeGraph};
use std::f64::consts::PI;

/// Outcome of the overlap-resolution stage, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutStats {
    /// Resolution passes actually run; 0 when the tree has fewer than two
    /// nodes.
    pub resolution_passes: u32,
    /// Node pairs still under the minimum clearance after the final pass.
    pub unresolved_overlaps: u32,
}

/// Recomputes every node position from scratch.
///
/// Full recompute per mutation is deliberate: trees are small and bounded by
/// `max_levels`, and rebuilding from the root keeps the result fully
/// deterministic. The same insertion order always yields bit-identical
/// positions.
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        LayoutEngine { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Assign a position to every node in the graph, then resolve overlaps.
    ///
    /// Writes `position` and `angle` on the nodes; topology is never
    /// touched.
    pub fn recompute<P>(&self, graph: &mut TreeGraph<P>, anchor: &RootAnchor) -> LayoutStats {
        let Some(root) = graph.root() else {
            return LayoutStats::default();
        };
        if let Some(node) = graph.node_mut(root) {
            node.position = Some(anchor.center);
            node.angle = 0.0;
        }
        self.layout_children(graph, root);
        let stats = self.resolve_overlaps(graph);
        tracing::debug!(
            nodes = graph.node_count(),
            passes = stats.resolution_passes,
            leftover = stats.unresolved_overlaps,
            "layout recomputed"
        );
        stats
    }

    /// Place the children of `parent` per the depth policy, then recurse
    /// into each.
    fn layout_children<P>(&self, graph: &mut TreeGraph<P>, parent: NodeId) {
        let children: Vec<NodeId> = graph.children_of(parent).to_vec();
        if children.is_empty() {
            return;
        }
        let (parent_pos, parent_depth, parent_angle) = {
            let Some(node) = graph.node(parent) else { return };
            let Some(position) = node.position else { return };
            (position, node.depth, node.angle)
        };

        let angles = fan_angles(parent_depth, parent_angle, children.len());
        let distance = if parent_depth == 0 {
            self.config.ring_distance
        } else {
            self.config.branch_distance
        };
        let solver = PositionSolver::new(&self.config);

        for (&child, preferred_angle) in children.iter().zip(angles) {
            let placement = if parent_depth == 0 {
                // Evenly spaced points on one circle around a single shared
                // center cannot collide with each other; skip the search.
                Placement {
                    position: parent_pos.polar_offset(preferred_angle, distance),
                    angle: preferred_angle,
                }
            } else {
                let occupied = occupied_positions(graph, child);
                solver.find_position(parent_pos, preferred_angle, distance, &occupied)
            };
            if let Some(node) = graph.node_mut(child) {
                node.position = Some(placement.position);
                node.angle = placement.angle;
            }
        }

        for child in children {
            self.layout_children(graph, child);
        }
    }

    /// Bounded pairwise separation over the whole node set.
    ///
    /// A violating pair pushes the deeper node (the later one in walk order
    /// on a depth tie) straight away from the other until the minimum
    /// clearance plus a small buffer holds, then refreshes that node's
    /// angle from its own parent so later reasoning stays consistent. Stops
    /// early on a clean pass; leftovers after the final pass are reported,
    /// not errors.
    fn resolve_overlaps<P>(&self, graph: &mut TreeGraph<P>) -> LayoutStats {
        let order = graph.dfs_order();
        if order.len() < 2 {
            return LayoutStats::default();
        }
        let min_safe = self.config.min_safe_distance();
        let mut passes = 0;
        for _ in 0..self.config.resolution_passes {
            passes += 1;
            let mut violations = 0u32;
            for i in 0..order.len() {
                for j in (i + 1)..order.len() {
                    if self.separate_pair(graph, order[i], order[j], min_safe) {
                        violations += 1;
                    }
                }
            }
            tracing::trace!(pass = passes, violations, "overlap resolution pass");
            if violations == 0 {
                return LayoutStats {
                    resolution_passes: passes,
                    unresolved_overlaps: 0,
                };
            }
        }
        LayoutStats {
            resolution_passes: passes,
            unresolved_overlaps: count_violations(graph, &order, min_safe),
        }
    }

    /// Returns true when the pair was in violation and a node was moved.
    fn separate_pair<P>(
        &self,
        graph: &mut TreeGraph<P>,
        a: NodeId,
        b: NodeId,
        min_safe: f64,
    ) -> bool {
        let (Some(pos_a), Some(pos_b)) = (position_of(graph, a), position_of(graph, b)) else {
            return false;
        };
        let distance = pos_a.distance_to(pos_b);
        if distance >= min_safe {
            return false;
        }

        let depth_a = graph.depth_of(a).unwrap_or(0);
        let depth_b = graph.depth_of(b).unwrap_or(0);
        // The deeper node moves; the root (always the shallowest) never
        // does.
        let (mover, mover_pos, fixed_pos) = if depth_a > depth_b {
            (a, pos_a, pos_b)
        } else {
            (b, pos_b, pos_a)
        };

        let push_angle = if distance > f64::EPSILON {
            (mover_pos.y - fixed_pos.y).atan2(mover_pos.x - fixed_pos.x)
        } else {
            // Coincident points have no separating vector; reuse the
            // mover's stored angle so the pass still makes progress.
            graph.node(mover).map(|n| n.angle).unwrap_or(0.0)
        };
        let target = fixed_pos.polar_offset(push_angle, min_safe + self.config.resolution_buffer);

        let parent_pos = graph
            .parent_of(mover)
            .and_then(|pid| position_of(graph, pid));
        if let Some(node) = graph.node_mut(mover) {
            node.position = Some(target);
            if let Some(pp) = parent_pos {
                node.angle = (target.y - pp.y).atan2(target.x - pp.x);
            }
        }
        true
    }
}

/// Preferred child angles for a parent at `parent_depth`.
///
/// Root children span the full circle starting at 12 o'clock so the primary
/// ring reads symmetric at a glance; depth-1 parents fan a semicircle
/// centered on their own angle, away from the root; anything deeper gets a
/// narrow 30° fan.
fn fan_angles(parent_depth: u32, parent_angle: f64, count: usize) -> Vec<f64> {
    match parent_depth {
        0 => {
            let step = 2.0 * PI / count as f64;
            (0..count).map(|i| -PI / 2.0 + i as f64 * step).collect()
        }
        1 => spread_across(parent_angle, PI, count),
        _ => spread_across(parent_angle, PI / 6.0, count),
    }
}

/// Evenly spread `count` angles across `span` centered on `center`,
/// endpoints included; a single child sits on `center` itself.
fn spread_across(center: f64, span: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![center];
    }
    let start = center - span / 2.0;
    let step = span / (count - 1) as f64;
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Positions of every placed node except the one being placed.
fn occupied_positions<P>(graph: &TreeGraph<P>, placing: NodeId) -> Vec<Point> {
    graph
        .all_nodes()
        .filter(|node| node.id != placing)
        .filter_map(|node| node.position)
        .collect()
}

fn position_of<P>(graph: &TreeGraph<P>, id: NodeId) -> Option<Point> {
    graph.node(id).and_then(|node| node.position)
}

fn count_violations<P>(graph: &TreeGraph<P>, order: &[NodeId], min_safe: f64) -> u32 {
    let mut count = 0;
    for i in 0..order.len() {
        for j in (i + 1)..order.len() {
            let (Some(pos_a), Some(pos_b)) =
                (position_of(graph, order[i]), position_of(graph, order[j]))
            else {
                continue;
            };
            if pos_a.distance_to(pos_b) < min_safe {
                count += 1;
            }
        }
    }
    count
}
