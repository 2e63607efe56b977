//! Triangles over a base BC, and the Thales circle used to build right
//! triangles.

use compass_core::Color;
use compass_core::math::{self, circle_circle_intersections, distance, line_angle, upper};

use super::bisector::EqualArcs;
use super::marks::{VERTEX_ARC_RADIUS, angle_arc, right_angle, tick_across};
use super::{
    Construction, ConstructionError, ConstructionResult, Keyframe, PointHandle, require_distinct,
};
use crate::scene::{NewLine, NewPoint, SceneDelta};

/// Sweep of the arcs that locate the apex
const APEX_ARC_SWEEP: f64 = 40.0;
/// Compass opening for the Thales bisector, relative to |BC|
const THALES_RADIUS_RATIO: f64 = 0.75;

/// Triangle BCA with |BA| = |CA| = `radius`; A is the upper arc crossing
pub fn isosceles_triangle(b: PointHandle, c: PointHandle, radius: f64) -> ConstructionResult {
    apex_triangle(b, c, radius, false)
}

/// Triangle BCA with all sides equal to |BC|; A is the upper arc crossing
pub fn equilateral_triangle(b: PointHandle, c: PointHandle) -> ConstructionResult {
    apex_triangle(b, c, distance(b.position, c.position), true)
}

fn apex_triangle(b: PointHandle, c: PointHandle, radius: f64, equilateral: bool) -> ConstructionResult {
    require_distinct(b, c, "base has no length")?;
    let half_base = distance(b.position, c.position) / 2.0;
    if radius <= half_base {
        return Err(ConstructionError::RadiusTooSmall { radius, half_base });
    }

    let pair = circle_circle_intersections(b.position, radius, c.position, radius)
        .ok_or(ConstructionError::Degenerate("apex arcs do not meet"))?;
    let (apex, _) = upper(pair);

    let mut delta = SceneDelta::new();
    let a = delta.add_point(NewPoint::derived(apex).labelled("A"));
    delta.add_line(NewLine::segment(b.point_ref(), a));
    delta.add_line(NewLine::segment(c.point_ref(), a));

    let emphasis = Some(Color::EMPHASIS);
    delta.add_decoration(tick_across(b.position, apex), emphasis);
    delta.add_decoration(tick_across(c.position, apex), emphasis);
    if equilateral {
        delta.add_decoration(tick_across(b.position, c.position), emphasis);
    }

    delta.add_decoration(angle_arc(b.position, c.position, apex, VERTEX_ARC_RADIUS), emphasis);
    delta.add_decoration(angle_arc(c.position, b.position, apex, VERTEX_ARC_RADIUS), emphasis);
    if equilateral {
        delta.add_decoration(angle_arc(apex, c.position, b.position, VERTEX_ARC_RADIUS), emphasis);
    }

    let keyframes = vec![
        Keyframe::arc_toward(b.position, radius, apex, APEX_ARC_SWEEP),
        Keyframe::arc_toward(c.position, radius, apex, APEX_ARC_SWEEP),
        Keyframe::highlight(apex),
        Keyframe::ruler(b.position, apex),
        Keyframe::stroke(b.position, apex),
        Keyframe::ruler(c.position, apex),
        Keyframe::stroke(c.position, apex),
    ];

    Ok(Construction::new(delta, keyframes))
}

/// Thales circle over BC.
///
/// The midpoint of BC is found with a compass bisector, then the circle with
/// BC as diameter is drawn. The base segment is committed with it; the
/// circle has no center point.
pub fn thales_circle(b: PointHandle, c: PointHandle) -> ConstructionResult {
    require_distinct(b, c, "base has no length")?;

    let base = distance(b.position, c.position);
    let radius = THALES_RADIUS_RATIO * base;
    let arcs = EqualArcs::compute(b.position, c.position, radius)?;
    let center = math::midpoint(b.position, c.position);

    let mut delta = SceneDelta::new();
    delta.add_line(NewLine::segment(b.point_ref(), c.point_ref()));
    delta.add_circle(center, None, base / 2.0);

    let mut keyframes = vec![
        Keyframe::ruler(b.position, c.position),
        Keyframe::stroke(b.position, c.position),
    ];
    keyframes.extend(arcs.keyframes(b.position, c.position, radius));
    keyframes.push(Keyframe::highlight(center));
    keyframes.push(Keyframe::full_circle(
        center,
        base / 2.0,
        line_angle(center, c.position),
    ));

    Ok(Construction::new(delta, keyframes))
}

/// Right triangle with hypotenuse BC and the right angle at `apex`.
///
/// The apex is expected on the Thales circle over BC; only its distinctness
/// from B and C is checked here.
pub fn right_triangle(b: PointHandle, c: PointHandle, apex: PointHandle) -> ConstructionResult {
    require_distinct(apex, b, "apex coincides with B")?;
    require_distinct(apex, c, "apex coincides with C")?;

    let mut delta = SceneDelta::new();
    delta.add_line(NewLine::segment(apex.point_ref(), b.point_ref()));
    delta.add_line(NewLine::segment(apex.point_ref(), c.point_ref()));
    delta.add_decoration(
        right_angle(apex.position, b.position, c.position),
        Some(Color::EMPHASIS),
    );

    Ok(Construction::new(
        delta,
        vec![
            Keyframe::highlight(apex.position),
            Keyframe::ruler(apex.position, b.position),
            Keyframe::stroke(apex.position, b.position),
            Keyframe::ruler(apex.position, c.position),
            Keyframe::stroke(apex.position, c.position),
        ],
    ))
}
