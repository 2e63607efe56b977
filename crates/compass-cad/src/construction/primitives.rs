//! Straightedge primitives: segments, rays, lines, fixed-length segments, and
//! plain compass circles.

use compass_core::PIXELS_PER_CM;
use compass_core::math::{distance, unit};
use glam::DVec2;

use super::{
    Construction, ConstructionError, ConstructionResult, Keyframe, PointHandle, require_distinct,
};
use crate::scene::{NewLine, NewPoint, SceneDelta};

/// Distance from its origin a ray is drawn to
pub const RAY_REACH: f64 = 500.0;
/// Distance an infinite line is drawn past each anchor
pub const LINE_OVERSHOOT: f64 = 300.0;

/// Overshoot that makes a ray from `origin` through `through` reach [`RAY_REACH`]
pub(crate) fn ray_overshoot(origin: DVec2, through: DVec2) -> f64 {
    (RAY_REACH - distance(origin, through)).max(0.0)
}

/// Segment a→b
pub fn segment(a: PointHandle, b: PointHandle) -> ConstructionResult {
    require_distinct(a, b, "segment endpoints coincide")?;

    let mut delta = SceneDelta::new();
    delta.add_line(NewLine::segment(a.point_ref(), b.point_ref()));

    Ok(Construction::new(
        delta,
        vec![
            Keyframe::ruler(a.position, b.position),
            Keyframe::stroke(a.position, b.position),
        ],
    ))
}

/// Ray from `origin` through `through`
pub fn ray(origin: PointHandle, through: PointHandle) -> ConstructionResult {
    require_distinct(origin, through, "ray has no direction")?;

    let overshoot = ray_overshoot(origin.position, through.position);
    let far = through.position + unit(through.position - origin.position) * overshoot;

    let mut delta = SceneDelta::new();
    delta.add_line(NewLine::ray(origin.point_ref(), through.point_ref(), overshoot));

    Ok(Construction::new(
        delta,
        vec![
            Keyframe::ruler(origin.position, far),
            Keyframe::stroke(origin.position, far),
        ],
    ))
}

/// Infinite line through a and b
pub fn infinite_line(a: PointHandle, b: PointHandle) -> ConstructionResult {
    require_distinct(a, b, "line has no direction")?;

    let dir = unit(b.position - a.position);
    let from = a.position - dir * LINE_OVERSHOOT;
    let to = b.position + dir * LINE_OVERSHOOT;

    let mut delta = SceneDelta::new();
    delta.add_line(NewLine::line(a.point_ref(), b.point_ref(), LINE_OVERSHOOT));

    Ok(Construction::new(
        delta,
        vec![Keyframe::ruler(from, to), Keyframe::stroke(from, to)],
    ))
}

/// Compass circle around a committed center
pub fn circle(center: PointHandle, radius: f64) -> ConstructionResult {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ConstructionError::InvalidValue(radius));
    }

    let mut delta = SceneDelta::new();
    delta.add_circle(center.position, Some(center.point_ref()), radius);

    Ok(Construction::new(
        delta,
        vec![Keyframe::full_circle(center.position, radius, 0.0)],
    ))
}

/// Horizontal segment of `length_cm` centimetres starting at `start`
pub fn fixed_length_segment(start: PointHandle, length_cm: f64) -> ConstructionResult {
    if !length_cm.is_finite() || length_cm <= 0.0 {
        return Err(ConstructionError::InvalidValue(length_cm));
    }

    let end = start.position + DVec2::new(length_cm * PIXELS_PER_CM, 0.0);

    let mut delta = SceneDelta::new();
    let b = delta.add_point(NewPoint::derived(end).labelled("B"));
    delta.add_line(NewLine::segment(start.point_ref(), b).with_label(format!("{length_cm}cm")));

    Ok(Construction::new(
        delta,
        vec![
            Keyframe::ruler(start.position, end),
            Keyframe::stroke(start.position, end),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::handle;
    use super::*;
    use crate::scene::PointRef;
    use compass_core::LineKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_references_both_anchors() {
        let a = handle(0.0, 0.0);
        let b = handle(30.0, 40.0);
        let result = segment(a, b).unwrap();

        let line = &result.delta.lines[0];
        assert_eq!(line.start, PointRef::Existing(a.id));
        assert_eq!(line.end, PointRef::Existing(b.id));
        assert_eq!(line.kind, LineKind::Segment);
        assert!(result.delta.points.is_empty());
    }

    #[test]
    fn test_segment_rejects_coincident_points() {
        let a = handle(5.0, 5.0);
        assert!(matches!(
            segment(a, a),
            Err(ConstructionError::Degenerate(_))
        ));
    }

    #[test]
    fn test_ray_reaches_fixed_distance() {
        let o = handle(0.0, 0.0);
        let a = handle(100.0, 0.0);
        let result = ray(o, a).unwrap();

        assert_relative_eq!(result.delta.lines[0].overshoot, 400.0);
        let Keyframe::PencilStroke { to, .. } = result.keyframes[1] else {
            panic!("expected pencil stroke");
        };
        assert_relative_eq!(to.x, RAY_REACH);
    }

    #[test]
    fn test_infinite_line_overshoots_both_ends() {
        let result = infinite_line(handle(0.0, 0.0), handle(0.0, 50.0)).unwrap();
        let Keyframe::Ruler { start, end } = result.keyframes[0] else {
            panic!("expected ruler");
        };
        assert_relative_eq!(start.y, -LINE_OVERSHOOT);
        assert_relative_eq!(end.y, 50.0 + LINE_OVERSHOOT);
        assert_eq!(result.delta.lines[0].kind, LineKind::Line);
    }

    #[test]
    fn test_fixed_length_segment() {
        let a = handle(10.0, 20.0);
        let result = fixed_length_segment(a, 5.0).unwrap();

        let b = result.delta.point_labelled("B").unwrap();
        assert_relative_eq!(b.position.x, 210.0);
        assert_relative_eq!(b.position.y, 20.0);
        assert_eq!(result.delta.lines[0].length_label.as_deref(), Some("5cm"));
    }

    #[test]
    fn test_fixed_length_rejects_non_positive() {
        let a = handle(0.0, 0.0);
        assert!(fixed_length_segment(a, 0.0).is_err());
        assert!(fixed_length_segment(a, -3.0).is_err());
        assert!(fixed_length_segment(a, f64::NAN).is_err());
    }

    #[test]
    fn test_circle_follows_center() {
        let o = handle(0.0, 0.0);
        let result = circle(o, 40.0).unwrap();
        assert_eq!(result.delta.circles[0].center_ref, Some(PointRef::Existing(o.id)));
        assert!(circle(o, 0.0).is_err());
    }
}
