//! Certificate mark builders shared by the constructions

use compass_core::DecorationShape;
use compass_core::math::{line_angle, midpoint, normalize_degrees, polar, unit};
use glam::DVec2;

/// Leg length of right-angle corners
pub(crate) const RIGHT_ANGLE_SIZE: f64 = 15.0;
/// Half length of an equal-length tick
pub(crate) const TICK_HALF_LENGTH: f64 = 8.0;
/// Radius of angle arcs on triangle and quadrilateral vertices
pub(crate) const VERTEX_ARC_RADIUS: f64 = 25.0;

/// Straight tick crossing the midpoint of a→b perpendicularly
pub(crate) fn tick_across(a: DVec2, b: DVec2) -> DecorationShape {
    let mid = midpoint(a, b);
    let normal = unit(b - a).perp();
    DecorationShape::Tick {
        points: vec![mid - normal * TICK_HALF_LENGTH, mid + normal * TICK_HALF_LENGTH],
    }
}

/// Small V-shaped tick opening upwards at `at`
pub(crate) fn v_tick(at: DVec2) -> DecorationShape {
    DecorationShape::Tick {
        points: vec![at + DVec2::new(-5.0, -5.0), at, at + DVec2::new(5.0, -5.0)],
    }
}

/// Square corner at `vertex` with legs toward `toward_a` and `toward_b`
pub(crate) fn right_angle(vertex: DVec2, toward_a: DVec2, toward_b: DVec2) -> DecorationShape {
    let ua = unit(toward_a - vertex) * RIGHT_ANGLE_SIZE;
    let ub = unit(toward_b - vertex) * RIGHT_ANGLE_SIZE;
    DecorationShape::RightAngle {
        points: [vertex + ua, vertex + ua + ub, vertex + ub],
    }
}

/// Arc parameters `(rotation, sweep)` for the angle at `center` from the ray
/// toward `start` to the ray toward `end`, always taking the short way and
/// always returning a non-negative sweep.
pub(crate) fn arc_params(center: DVec2, start: DVec2, end: DVec2) -> (f64, f64) {
    let from = line_angle(center, start);
    let diff = normalize_degrees(line_angle(center, end) - from);
    if diff < 0.0 {
        (from + diff, -diff)
    } else {
        (from, diff)
    }
}

/// Angle arc at `center` between the rays toward `start` and `end`
pub(crate) fn angle_arc(center: DVec2, start: DVec2, end: DVec2, radius: f64) -> DecorationShape {
    let (rotation, sweep) = arc_params(center, start, end);
    DecorationShape::Angle {
        center,
        radius,
        rotation,
        sweep,
    }
}

/// Radial tick through the middle of an angle arc
pub(crate) fn tick_on_arc(center: DVec2, start: DVec2, end: DVec2, radius: f64) -> DecorationShape {
    const HALF: f64 = 5.0;
    let (rotation, sweep) = arc_params(center, start, end);
    let mid_angle = rotation + sweep / 2.0;
    DecorationShape::Tick {
        points: vec![
            polar(center, radius - HALF, mid_angle),
            polar(center, radius + HALF, mid_angle),
        ],
    }
}

pub(crate) fn text(position: DVec2, text: impl Into<String>) -> DecorationShape {
    DecorationShape::Text {
        position,
        text: text.into(),
    }
}

/// Degree label, e.g. `"60°"`
pub(crate) fn degrees_label(value: f64) -> String {
    format!("{}°", value.round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arc_params_flips_negative_sweep() {
        // From 90° back to 0°: short way is -90, reported as rotation 0 sweep 90
        let (rotation, sweep) = arc_params(DVec2::ZERO, DVec2::new(0.0, 1.0), DVec2::new(1.0, 0.0));
        assert_relative_eq!(rotation, 0.0);
        assert_relative_eq!(sweep, 90.0);
    }

    #[test]
    fn test_right_angle_corner() {
        let DecorationShape::RightAngle { points } =
            right_angle(DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(0.0, -40.0))
        else {
            panic!("expected right angle");
        };
        assert_relative_eq!(points[0].x, 15.0);
        assert_relative_eq!(points[1].x, 15.0);
        assert_relative_eq!(points[1].y, -15.0);
        assert_relative_eq!(points[2].y, -15.0);
    }

    #[test]
    fn test_tick_across_is_perpendicular() {
        let DecorationShape::Tick { points } = tick_across(DVec2::ZERO, DVec2::new(20.0, 0.0)) else {
            panic!("expected tick");
        };
        assert_relative_eq!(points[0].x, 10.0);
        assert_relative_eq!(points[1].x, 10.0);
        assert_relative_eq!((points[1] - points[0]).length(), 2.0 * TICK_HALF_LENGTH);
    }

    #[test]
    fn test_degrees_label_rounds() {
        assert_eq!(degrees_label(59.6), "60°");
        assert_eq!(degrees_label(90.0), "90°");
    }
}
