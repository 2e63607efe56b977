//! Projections onto lines, segments, and circles

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{EPSILON, cross, line_angle};

/// Interpolation parameter of the foot of the perpendicular from `p` onto a→b.
///
/// Returns `None` when a and b coincide.
fn projection_parameter(a: DVec2, b: DVec2, p: DVec2) -> Option<f64> {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < EPSILON {
        return None;
    }
    Some((p - a).dot(ab) / len_sq)
}

/// Foot of the perpendicular from `p` onto the infinite line through a and b.
///
/// When a and b coincide the line is undefined and `a` is returned.
pub fn project_point_onto_line(a: DVec2, b: DVec2, p: DVec2) -> DVec2 {
    match projection_parameter(a, b, p) {
        Some(t) => a + (b - a) * t,
        None => a,
    }
}

/// Closest point to `p` on the segment a→b (always between a and b inclusive)
pub fn closest_point_on_segment(a: DVec2, b: DVec2, p: DVec2) -> DVec2 {
    match projection_parameter(a, b, p) {
        Some(t) => a + (b - a) * t.clamp(0.0, 1.0),
        None => a,
    }
}

/// Closest point to `p` on the circumference of a circle.
///
/// When `p` sits on the center the result is the topmost point (smallest y).
pub fn closest_point_on_circle(center: DVec2, radius: f64, p: DVec2) -> DVec2 {
    let d = p - center;
    if d.length_squared() < EPSILON {
        return center - DVec2::Y * radius;
    }
    center + d.normalize() * radius
}

/// Placement of a tool laid along a line and facing a target point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfPlane {
    /// Direction of the line in degrees
    pub rotation: f64,
    /// +1 when the target lies on the positive side of the line, -1 otherwise
    pub flip: f64,
    /// Foot of the perpendicular from the target
    pub projection: DVec2,
}

/// Which side of the line start→end the target lies on
pub fn half_plane_orientation(line_start: DVec2, line_end: DVec2, target: DVec2) -> HalfPlane {
    let side = cross(line_end - line_start, target - line_start);
    HalfPlane {
        rotation: line_angle(line_start, line_end),
        flip: if side > 0.0 { 1.0 } else { -1.0 },
        projection: project_point_onto_line(line_start, line_end, target),
    }
}
