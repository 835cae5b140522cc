//! Collision-free placement search for a single node

use crate::config::LayoutConfig;
use rosette_core::Point;

/// A concrete placement produced by the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point,
    pub angle: f64,
}

/// Searches for a spot near a preferred angle/distance that keeps clear of
/// every already-placed node.
pub struct PositionSolver<'a> {
    config: &'a LayoutConfig,
}

impl<'a> PositionSolver<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        PositionSolver { config }
    }

    /// Find a collision-free placement around `origin`.
    ///
    /// Tries the preferred angle over increasing distances, then perturbs
    /// the angle alternately to either side, and finally gives up with an
    /// overshot placement at the preferred angle. Always returns a usable
    /// placement; overlap in the fallback case is a quality degradation,
    /// not an error.
    pub fn find_position(
        &self,
        origin: Point,
        preferred_angle: f64,
        preferred_distance: f64,
        occupied: &[Point],
    ) -> Placement {
        for attempt in 0..self.config.max_angle_attempts {
            let angle = preferred_angle + self.angle_offset(attempt);
            if let Some(placement) =
                self.sweep_distances(origin, angle, preferred_distance, occupied)
            {
                return placement;
            }
        }
        Placement {
            position: origin.polar_offset(
                preferred_angle,
                preferred_distance + self.config.fallback_overshoot,
            ),
            angle: preferred_angle,
        }
    }

    /// True when `candidate` sits closer than the minimum safe distance to
    /// any occupied point. The node being placed must not be in `occupied`.
    pub fn has_collision(&self, candidate: Point, occupied: &[Point]) -> bool {
        let min_safe = self.config.min_safe_distance();
        occupied.iter().any(|&p| candidate.distance_to(p) < min_safe)
    }

    /// Attempt 0 keeps the preferred angle; afterwards offsets alternate
    /// +step, −step, +2·step, −2·step, ...
    fn angle_offset(&self, attempt: u32) -> f64 {
        if attempt == 0 {
            return 0.0;
        }
        let magnitude = attempt.div_ceil(2) as f64 * self.config.angle_step;
        if attempt % 2 == 1 { magnitude } else { -magnitude }
    }

    fn sweep_distances(
        &self,
        origin: Point,
        angle: f64,
        base_distance: f64,
        occupied: &[Point],
    ) -> Option<Placement> {
        for step in 0..self.config.distance_tries {
            let distance = base_distance + step as f64 * self.config.distance_step;
            let candidate = origin.polar_offset(angle, distance);
            if !self.has_collision(candidate, occupied) {
                return Some(Placement {
                    position: candidate,
                    angle,
                });
            }
        }
        None
    }
}
