//! Free quadrilaterals and compass parallelograms

use compass_core::Color;
use compass_core::math::{circle_circle_intersections, distance, farther_from};
use glam::DVec2;

use super::marks::{VERTEX_ARC_RADIUS, angle_arc, arc_params, degrees_label, text};
use super::{Construction, ConstructionResult, Keyframe, PointHandle, require_distinct};
use crate::scene::{NewLine, NewPoint, SceneDelta};

/// Offset of each interior angle label from its vertex
const ANGLE_LABEL_OFFSET: DVec2 = DVec2::new(0.0, -30.0);
/// Sweep of the arcs that locate D
const CORNER_ARC_SWEEP: f64 = 60.0;

/// Closed quadrilateral ABCD with every vertex angle marked and labelled
pub fn quadrilateral(vertices: [PointHandle; 4]) -> ConstructionResult {
    for i in 0..4 {
        require_distinct(vertices[i], vertices[(i + 1) % 4], "consecutive vertices coincide")?;
    }

    let mut delta = SceneDelta::new();
    let mut keyframes = Vec::with_capacity(4);

    for i in 0..4 {
        let from = vertices[i];
        let to = vertices[(i + 1) % 4];
        delta.add_line(NewLine::segment(from.point_ref(), to.point_ref()));
        keyframes.push(Keyframe::stroke(from.position, to.position));
    }

    for i in 0..4 {
        let prev = vertices[(i + 3) % 4].position;
        let vertex = vertices[i].position;
        let next = vertices[(i + 1) % 4].position;
        let (_, sweep) = arc_params(vertex, prev, next);

        delta.add_decoration(
            angle_arc(vertex, prev, next, VERTEX_ARC_RADIUS),
            Some(Color::EMPHASIS),
        );
        delta.add_decoration(
            text(vertex + ANGLE_LABEL_OFFSET, degrees_label(sweep)),
            Some(Color::EMPHASIS),
        );
    }

    Ok(Construction::new(delta, keyframes))
}

/// Parallelogram ABCD completed from three vertices.
///
/// D is where circle(A, |BC|) meets circle(C, |AB|), taking the crossing
/// farther from B. When the circles do not meet (collinear input) D falls
/// back to A + C - B.
pub fn parallelogram(a: PointHandle, b: PointHandle, c: PointHandle) -> ConstructionResult {
    require_distinct(a, b, "A and B coincide")?;
    require_distinct(b, c, "B and C coincide")?;

    let ab = distance(a.position, b.position);
    let bc = distance(b.position, c.position);
    let d = circle_circle_intersections(a.position, bc, c.position, ab)
        .map(|pair| farther_from(pair, b.position).0)
        .unwrap_or(a.position + c.position - b.position);

    let mut delta = SceneDelta::new();
    let d_ref = delta.add_point(NewPoint::derived(d).labelled("D"));
    delta.add_line(NewLine::segment(c.point_ref(), d_ref));
    delta.add_line(NewLine::segment(d_ref, a.point_ref()));

    let keyframes = vec![
        Keyframe::arc_toward(a.position, bc, d, CORNER_ARC_SWEEP),
        Keyframe::arc_toward(c.position, ab, d, CORNER_ARC_SWEEP),
        Keyframe::highlight(d),
        Keyframe::ruler(c.position, d),
        Keyframe::stroke(c.position, d),
        Keyframe::ruler(d, a.position),
        Keyframe::stroke(d, a.position),
    ];

    Ok(Construction::new(delta, keyframes))
}
