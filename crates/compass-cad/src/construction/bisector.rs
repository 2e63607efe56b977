//! Perpendicular bisector and midpoint by two equal compass arcs

use compass_core::Color;
use compass_core::math::{self, circle_circle_intersections, distance, segment_intersection, unit, upper};
use glam::DVec2;

use super::marks::{right_angle, tick_across, v_tick};
use super::primitives::LINE_OVERSHOOT;
use super::{Construction, ConstructionError, ConstructionResult, Keyframe, PointHandle};
use crate::scene::{NewLine, NewPoint, SceneDelta};

/// Angular width of each compass arc
const ARC_SWEEP: f64 = 100.0;

/// Result of crossing circle(A, r) with circle(B, r)
#[derive(Debug, Clone, Copy)]
pub(crate) struct EqualArcs {
    /// Upper intersection
    pub p: DVec2,
    /// Lower intersection
    pub q: DVec2,
    /// Where P→Q crosses A→B
    pub midpoint: DVec2,
}

impl EqualArcs {
    /// Cross two equal circles centred on a and b.
    ///
    /// The radius must exceed half of |ab|. P is the intersection with the
    /// smaller y, Q the other one.
    pub(crate) fn compute(a: DVec2, b: DVec2, radius: f64) -> Result<Self, ConstructionError> {
        let half_base = distance(a, b) / 2.0;
        if radius <= half_base {
            return Err(ConstructionError::RadiusTooSmall { radius, half_base });
        }

        let pair = circle_circle_intersections(a, radius, b, radius)
            .ok_or(ConstructionError::Degenerate("compass arcs do not meet"))?;
        let (p, q) = upper(pair);

        // P→Q crosses A→B at its midpoint; fall back to the closed form on rounding misses
        let midpoint = segment_intersection(p, q, a, b).unwrap_or_else(|| math::midpoint(a, b));

        Ok(Self { p, q, midpoint })
    }

    /// Both compass arcs, each centred on the direction of the other anchor
    pub(crate) fn keyframes(&self, a: DVec2, b: DVec2, radius: f64) -> Vec<Keyframe> {
        vec![
            Keyframe::arc_toward(a, radius, b, ARC_SWEEP),
            Keyframe::arc_toward(b, radius, a, ARC_SWEEP),
            Keyframe::highlight(self.p),
            Keyframe::highlight(self.q),
            Keyframe::ruler(self.p, self.q),
        ]
    }
}

/// Perpendicular bisector of a and b with compass opening `radius`.
///
/// Commits both arc intersections, the bisector line through them, and the
/// midpoint M with a right-angle mark and equal-length ticks on AM and MB.
pub fn perpendicular_bisector(a: PointHandle, b: PointHandle, radius: f64) -> ConstructionResult {
    let arcs = EqualArcs::compute(a.position, b.position, radius)?;
    let m = arcs.midpoint;

    let mut delta = SceneDelta::new();
    let p = delta.add_point(NewPoint::derived(arcs.p));
    let q = delta.add_point(NewPoint::derived(arcs.q));
    delta.add_point(NewPoint::derived(m).labelled("M"));
    delta.add_line(NewLine::line(p, q, LINE_OVERSHOOT));

    let along_base = m + unit(b.position - a.position);
    let along_bisector = m + unit(arcs.q - arcs.p);
    delta.add_decoration(right_angle(m, along_base, along_bisector), Some(Color::INK));
    delta.add_decoration(v_tick(math::midpoint(a.position, m)), Some(Color::INK));
    delta.add_decoration(v_tick(math::midpoint(b.position, m)), Some(Color::INK));

    let mut keyframes = arcs.keyframes(a.position, b.position, radius);
    keyframes.push(Keyframe::stroke(arcs.p, arcs.q));
    keyframes.push(Keyframe::highlight(m));

    Ok(Construction::new(delta, keyframes))
}

/// Midpoint of a and b by the same two-arc construction.
///
/// Only M and its equal-length ticks are committed; the bisector line is
/// drawn during playback but not kept.
pub fn midpoint(a: PointHandle, b: PointHandle, radius: f64) -> ConstructionResult {
    let arcs = EqualArcs::compute(a.position, b.position, radius)?;
    let m = arcs.midpoint;

    let mut delta = SceneDelta::new();
    delta.add_point(NewPoint::derived(m).labelled("M"));
    delta.add_decoration(tick_across(a.position, m), Some(Color::EMPHASIS));
    delta.add_decoration(tick_across(b.position, m), Some(Color::EMPHASIS));

    let mut keyframes = arcs.keyframes(a.position, b.position, radius);
    keyframes.push(Keyframe::highlight(m));

    Ok(Construction::new(delta, keyframes))
}
