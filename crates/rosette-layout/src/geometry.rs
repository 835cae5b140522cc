//! Curved-connection geometry between positioned nodes

use rosette_core::{NodeId, Point};
use serde::{Deserialize, Serialize};

/// Fraction of the chord length the control point sits off the midpoint.
const CURVE_OFFSET_RATIO: f64 = 0.15;

/// Renderable description of one parent→child connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveDescriptor {
    pub from: NodeId,
    pub to: NodeId,
    pub tag: String,
    pub start: Point,
    pub end: Point,
    /// Quadratic control point, offset perpendicular to the chord.
    pub control: Point,
    /// Label anchor: the straight-line midpoint, independent of curve sign.
    pub label: Point,
}

/// Build the curve descriptor for one positioned parent/child pair.
pub fn connection_curve(
    from: NodeId,
    to: NodeId,
    tag: impl Into<String>,
    start: Point,
    end: Point,
) -> CurveDescriptor {
    let label = start.midpoint(end);
    let length = start.distance_to(end);
    let control = if length > f64::EPSILON {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let offset = CURVE_OFFSET_RATIO * length;
        // Unit perpendicular of the chord, scaled to the offset.
        Point::new(label.x - dy / length * offset, label.y + dx / length * offset)
    } else {
        // Coincident endpoints degrade to a degenerate curve.
        label
    };
    CurveDescriptor {
        from,
        to,
        tag: tag.into(),
        start,
        end,
        control,
        label,
    }
}
