//! Tangents from an external point to a circle

use compass_core::Color;
use compass_core::math::{self, circle_circle_intersections, distance, line_angle, unit, upper};

use super::marks::right_angle;
use super::{Construction, ConstructionError, ConstructionResult, Keyframe, PointHandle};
use crate::scene::{NewLine, NewPoint, SceneDelta};

/// Distance each tangent ray is drawn past its touching point
const TANGENT_OVERSHOOT: f64 = 100.0;

/// Both tangents from `external` to the circle around `center`.
///
/// The circle over OM as diameter crosses the given circle at the touching
/// points A (upper) and B; the radii OA and OB are perpendicular to the
/// tangent rays MA and MB.
pub fn tangents_from_point(
    center: PointHandle,
    radius: f64,
    external: PointHandle,
) -> ConstructionResult {
    let o = center.position;
    let m = external.position;
    let d = distance(o, m);
    if d <= radius {
        return Err(ConstructionError::PointInsideCircle {
            distance: d,
            radius,
        });
    }

    let mid = math::midpoint(o, m);
    let pair = circle_circle_intersections(o, radius, mid, d / 2.0)
        .ok_or(ConstructionError::Degenerate("tangent circle does not meet"))?;
    let (touch_a, touch_b) = upper(pair);

    let mut delta = SceneDelta::new();
    let a = delta.add_point(NewPoint::derived(touch_a).labelled("A"));
    let b = delta.add_point(NewPoint::derived(touch_b).labelled("B"));
    delta.add_line(NewLine::ray(external.point_ref(), a, TANGENT_OVERSHOOT));
    delta.add_line(NewLine::ray(external.point_ref(), b, TANGENT_OVERSHOOT));
    delta.add_line(NewLine::segment(center.point_ref(), a).with_color(Color::EMPHASIS));
    delta.add_line(NewLine::segment(center.point_ref(), b).with_color(Color::EMPHASIS));

    let emphasis = Some(Color::EMPHASIS);
    delta.add_decoration(right_angle(touch_a, o, m), emphasis);
    delta.add_decoration(right_angle(touch_b, o, m), emphasis);

    let far_a = touch_a + unit(touch_a - m) * TANGENT_OVERSHOOT;
    let far_b = touch_b + unit(touch_b - m) * TANGENT_OVERSHOOT;
    let keyframes = vec![
        Keyframe::ruler(o, m),
        Keyframe::highlight(mid),
        Keyframe::full_circle(mid, d / 2.0, line_angle(mid, o)),
        Keyframe::highlight(touch_a),
        Keyframe::highlight(touch_b),
        Keyframe::ruler(m, far_a),
        Keyframe::stroke(m, far_a),
        Keyframe::ruler(m, far_b),
        Keyframe::stroke(m, far_b),
    ];

    Ok(Construction::new(delta, keyframes))
}
