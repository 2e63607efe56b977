//! Set-square constructions: dropping a perpendicular onto a line and sliding
//! a parallel through a point.

use compass_core::Color;
use compass_core::math::{EPSILON, distance, half_plane_orientation, unit};

use super::marks::right_angle;
use super::{
    Construction, ConstructionError, ConstructionResult, Keyframe, PointHandle, require_distinct,
};
use crate::scene::{NewLine, NewPoint, SceneDelta};

/// How far back along the line the set square starts before sliding to H
const SLIDE_RUN_UP: f64 = 200.0;
/// Half length of a slid parallel
const PARALLEL_HALF_LENGTH: f64 = 300.0;

/// Perpendicular from `point` onto the line through line_start and line_end.
///
/// The set square is laid on the line, slid until its edge passes through M,
/// and the segment M→H is drawn, H being the foot of the perpendicular.
pub fn perpendicular_via_set_square(
    line_start: PointHandle,
    line_end: PointHandle,
    point: PointHandle,
) -> ConstructionResult {
    require_distinct(line_start, line_end, "line has no direction")?;

    let m = point.position;
    let plane = half_plane_orientation(line_start.position, line_end.position, m);
    let foot = plane.projection;
    if distance(m, foot) < EPSILON {
        return Err(ConstructionError::Degenerate("point lies on the line"));
    }

    let dir = unit(line_end.position - line_start.position);

    let mut delta = SceneDelta::new();
    let h = delta.add_point(NewPoint::derived(foot).labelled("H"));
    delta.add_line(NewLine::segment(point.point_ref(), h));
    delta.add_decoration(right_angle(foot, m, foot + dir), Some(Color::EMPHASIS));

    let run_up = foot - dir * SLIDE_RUN_UP;
    let keyframes = vec![
        Keyframe::ruler(line_start.position, line_end.position),
        Keyframe::SetSquare {
            corner: run_up,
            rotation: plane.rotation,
            flip: plane.flip,
        },
        Keyframe::SetSquareSlide {
            from: run_up,
            to: foot,
            rotation: plane.rotation,
            flip: plane.flip,
        },
        Keyframe::stroke(m, foot),
    ];

    Ok(Construction::new(delta, keyframes))
}

/// Parallel to the line through line_start and line_end passing through `point`.
///
/// The set square is laid against the line at the foot H and slid along a
/// ruler from H to M. The result is an infinite line labelled "d'" between
/// two derived endpoints on either side of M.
pub fn parallel_via_sliding(
    line_start: PointHandle,
    line_end: PointHandle,
    point: PointHandle,
) -> ConstructionResult {
    require_distinct(line_start, line_end, "line has no direction")?;

    let m = point.position;
    let plane = half_plane_orientation(line_start.position, line_end.position, m);
    let foot = plane.projection;
    if distance(m, foot) < EPSILON {
        return Err(ConstructionError::Degenerate("point lies on the line"));
    }

    let dir = unit(line_end.position - line_start.position);
    let from = m - dir * PARALLEL_HALF_LENGTH;
    let to = m + dir * PARALLEL_HALF_LENGTH;

    let mut delta = SceneDelta::new();
    let start = delta.add_point(NewPoint::derived(from));
    let end = delta.add_point(NewPoint::derived(to));
    delta.add_line(NewLine::line(start, end, 0.0).with_label("d'"));

    let keyframes = vec![
        Keyframe::SetSquare {
            corner: foot,
            rotation: plane.rotation,
            flip: plane.flip,
        },
        Keyframe::ruler(foot, m),
        Keyframe::SetSquareSlide {
            from: foot,
            to: m,
            rotation: plane.rotation,
            flip: plane.flip,
        },
        Keyframe::stroke(from, to),
    ];

    Ok(Construction::new(delta, keyframes))
}
