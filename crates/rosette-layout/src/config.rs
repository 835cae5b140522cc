//! Layout tuning knobs and the caller-supplied root anchor

use rosette_core::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Tuning knobs for the layout passes.
///
/// Defaults match the shipped visualization. The struct deserializes with
/// per-field defaults, so a partial TOML file overrides only the fields it
/// names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Visual radius of one node.
    pub node_radius: f64,
    /// Extra clearance required beyond two touching node circles.
    pub collision_padding: f64,
    /// Distance from the root to its direct children.
    pub ring_distance: f64,
    /// Base distance from a non-root parent to its children.
    pub branch_distance: f64,
    /// Distance increment per failed collision try.
    pub distance_step: f64,
    /// Distances tried per candidate angle (preferred distance included).
    pub distance_tries: u32,
    /// Angle perturbation increment (radians) for the collision search.
    pub angle_step: f64,
    /// Candidate angles tried before giving up (preferred angle included).
    pub max_angle_attempts: u32,
    /// Extra distance applied to the give-up placement.
    pub fallback_overshoot: f64,
    /// Maximum tree depth in levels; the root counts as one.
    pub max_levels: u32,
    /// Upper bound on global overlap-resolution passes.
    pub resolution_passes: u32,
    /// Clearance added on top of the minimum when separating a pair.
    pub resolution_buffer: f64,
}

impl LayoutConfig {
    /// Minimum center-to-center clearance between any two placed nodes.
    pub fn min_safe_distance(&self) -> f64 {
        2.0 * self.node_radius + self.collision_padding
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            node_radius: 30.0,
            collision_padding: 10.0,
            ring_distance: 180.0,
            branch_distance: 120.0,
            distance_step: 20.0,
            distance_tries: 5,
            angle_step: PI / 10.0,
            max_angle_attempts: 20,
            fallback_overshoot: 100.0,
            max_levels: 3,
            resolution_passes: 5,
            resolution_buffer: 4.0,
        }
    }
}

/// Where the root goes, plus the viewport safety margin.
///
/// Both come from the embedding renderer, derived from the current viewport
/// size; the core never queries a viewport itself. The layout places the
/// root at `center` and passes `margin` through to the snapshot untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootAnchor {
    pub center: Point,
    pub margin: f64,
}

impl RootAnchor {
    pub fn new(center: Point, margin: f64) -> Self {
        RootAnchor { center, margin }
    }
}

impl Default for RootAnchor {
    fn default() -> Self {
        RootAnchor {
            center: Point::new(0.0, 0.0),
            margin: 0.0,
        }
    }
}
