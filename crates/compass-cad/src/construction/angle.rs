//! Angle constructions: compass bisector, protractor measurement, and
//! protractor drawing.

use compass_core::{Color, DecorationShape};
use compass_core::math::{
    EPSILON, circle_circle_intersections, distance, farther_from, line_angle, normalize_degrees,
    polar, unit,
};
use glam::DVec2;

use super::marks::{angle_arc, degrees_label, text, tick_on_arc};
use super::primitives::ray_overshoot;
use super::{
    Construction, ConstructionError, ConstructionResult, Keyframe, PointHandle, require_distinct,
};
use crate::scene::{NewLine, NewPoint, SceneDelta};

/// Compass opening as a fraction of the shorter leg
const BISECTOR_RADIUS_RATIO: f64 = 0.6;
/// Radius of the two half-angle arcs
const HALF_ANGLE_ARC_RADIUS: f64 = 40.0;
/// Distance from the vertex of a measured angle's label
const MEASURE_LABEL_DISTANCE: f64 = 110.0;
/// Length of the drawn leg of a new angle
const DRAWN_LEG_LENGTH: f64 = 350.0;
/// Radius of the arc marking a drawn angle
const DRAWN_ARC_RADIUS: f64 = 30.0;

/// Bisector of the angle at `vertex` between the legs toward a and b.
///
/// The compass is opened to a fraction of the shorter leg, crossing both legs
/// at M and N. Equal arcs from M and N cross at I; of the two crossings the
/// one farther from the vertex is kept.
pub fn angle_bisector(vertex: PointHandle, a: PointHandle, b: PointHandle) -> ConstructionResult {
    require_distinct(vertex, a, "first leg has no length")?;
    require_distinct(vertex, b, "second leg has no length")?;

    let o = vertex.position;
    let radius =
        BISECTOR_RADIUS_RATIO * distance(o, a.position).min(distance(o, b.position));
    let m = o + unit(a.position - o) * radius;
    let n = o + unit(b.position - o) * radius;

    let pair = circle_circle_intersections(m, radius, n, radius)
        .ok_or(ConstructionError::Degenerate("bisecting arcs do not meet"))?;
    let (i, _) = farther_from(pair, o);
    if distance(o, i) < EPSILON {
        return Err(ConstructionError::Degenerate("legs are opposite"));
    }

    let mut delta = SceneDelta::new();
    let through = delta.add_point(NewPoint::derived(i));
    delta.add_line(
        NewLine::ray(vertex.point_ref(), through, ray_overshoot(o, i)).with_color(Color::EMPHASIS),
    );

    let emphasis = Some(Color::EMPHASIS);
    delta.add_decoration(angle_arc(o, a.position, i, HALF_ANGLE_ARC_RADIUS), emphasis);
    delta.add_decoration(angle_arc(o, i, b.position, HALF_ANGLE_ARC_RADIUS), emphasis);
    delta.add_decoration(tick_on_arc(o, a.position, i, HALF_ANGLE_ARC_RADIUS), emphasis);
    delta.add_decoration(tick_on_arc(o, i, b.position, HALF_ANGLE_ARC_RADIUS), emphasis);
    delta.add_decoration(text(i + unit(i - o) * HALF_ANGLE_ARC_RADIUS, "t"), emphasis);

    let far = i + unit(i - o) * ray_overshoot(o, i);
    let keyframes = vec![
        Keyframe::arc_between(o, radius, a.position, b.position),
        Keyframe::highlight(m),
        Keyframe::highlight(n),
        Keyframe::arc_toward(m, radius, i, 50.0),
        Keyframe::arc_toward(n, radius, i, 50.0),
        Keyframe::highlight(i),
        Keyframe::ruler(o, far),
        Keyframe::stroke(o, far),
    ];

    Ok(Construction::new(delta, keyframes))
}

/// Measure the angle at `vertex` between the legs toward a and b.
///
/// Only a degree label is committed, placed along the inner bisecting
/// direction of the angle.
pub fn measure_angle(vertex: PointHandle, a: PointHandle, b: PointHandle) -> ConstructionResult {
    require_distinct(vertex, a, "first leg has no length")?;
    require_distinct(vertex, b, "second leg has no length")?;

    let o = vertex.position;
    let angle_a = line_angle(o, a.position);
    let angle_b = line_angle(o, b.position);
    let diff = normalize_degrees(angle_b - angle_a);
    let value = diff.abs();
    let base = if diff > 0.0 { angle_b } else { angle_a };

    let label_at = polar(o, MEASURE_LABEL_DISTANCE, base - value / 2.0);

    let mut delta = SceneDelta::new();
    delta.add_decoration(text(label_at, degrees_label(value)), Some(Color::EMPHASIS));

    Ok(Construction::new(
        delta,
        vec![
            Keyframe::Protractor {
                center: o,
                rotation: base,
            },
            Keyframe::highlight(label_at),
        ],
    ))
}

/// Draw an angle of `degrees` at `vertex`, measured from the leg toward `base`.
///
/// The new leg is turned counter-clockwise on screen (towards negative y) and
/// ends at a derived point labelled "y".
pub fn draw_angle(vertex: PointHandle, base: PointHandle, degrees: f64) -> ConstructionResult {
    if !degrees.is_finite() || degrees <= 0.0 || degrees > 180.0 {
        return Err(ConstructionError::InvalidValue(degrees));
    }
    require_distinct(vertex, base, "base leg has no length")?;

    let o = vertex.position;
    let base_angle = line_angle(o, base.position);
    let target = base_angle - degrees;
    let end = polar(o, DRAWN_LEG_LENGTH, target);

    let mut delta = SceneDelta::new();
    let y = delta.add_point(NewPoint::derived(end).labelled("y"));
    delta.add_line(NewLine::ray(vertex.point_ref(), y, 0.0));
    delta.add_decoration(
        DecorationShape::Angle {
            center: o,
            radius: DRAWN_ARC_RADIUS,
            rotation: target,
            sweep: degrees,
        },
        Some(Color::EMPHASIS),
    );
    delta.add_decoration(
        text(o + DVec2::new(30.0, -30.0), format!("{degrees}°")),
        Some(Color::EMPHASIS),
    );

    Ok(Construction::new(
        delta,
        vec![
            Keyframe::Protractor {
                center: o,
                rotation: base_angle,
            },
            Keyframe::highlight(polar(o, 160.0, target)),
            Keyframe::ruler(o, end),
            Keyframe::stroke(o, end),
        ],
    ))
}
