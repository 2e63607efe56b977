//! Per-tool click handling
//!
//! Each handler looks at the current step, validates the click, commits the
//! picked point and either moves to the next step or starts a construction.
//! A terminal click is checked against a stand-in point first, so a failing
//! construction commits nothing.

use compass_cad::construction::{self, LINE_OVERSHOOT};
use compass_cad::{
    CommitReceipt, ConstructionRequest, NewLine, PointHandle, SceneDelta, construct,
};
use compass_core::math::{
    closest_point_on_circle, cross, midpoint, project_point_onto_line, unit,
};
use tracing::info;

use super::{ClickEvent, ClickOutcome, ClickTarget, Rejection, Session, SessionResult};
use crate::state::{ConstructionTool, GuideCircle, InputKind, ToolStep};

/// Sine of the smallest angle the bisector tool accepts between its legs
const MIN_LEG_SINE: f64 = 0.02;

fn is_first_pick(step: ToolStep) -> bool {
    matches!(step, ToolStep::Idle | ToolStep::PickingFirst)
}

impl Session {
    /// Check a terminal construction, then commit its last point and play it
    fn finish_with<F>(
        &mut self,
        target: ClickTarget,
        label: Option<&str>,
        request: F,
    ) -> SessionResult<ClickOutcome>
    where
        F: Fn(PointHandle) -> ConstructionRequest,
    {
        construct(&request(target.preview()))?;
        let handle = self.realize(target, label);
        let built = construct(&request(handle))?;
        self.play(built, ToolStep::Idle)
    }

    /// Commit a ray from `origin` through `through` at once
    fn commit_leg(
        &mut self,
        origin: PointHandle,
        through: PointHandle,
    ) -> SessionResult<CommitReceipt> {
        let leg = construction::ray(origin, through)?;
        self.commit(leg.delta)
    }

    // ============== Single point ==============

    pub(super) fn point_tool_click(&mut self, event: ClickEvent) -> SessionResult<ClickOutcome> {
        let target = self.target(&event);
        if let ClickTarget::Existing(_) = target {
            return Ok(ClickOutcome::Ignored);
        }
        let label = format!("P{}", self.scene.point_count() + 1);
        let point = self.realize(target, Some(&label));
        info!("Placed point {} at {:?}", label, point.position);

        Ok(ClickOutcome::Committed(CommitReceipt {
            points: vec![point.id],
            ..Default::default()
        }))
    }

    // ============== Segment, ray, line ==============

    pub(super) fn two_point_tool_click(
        &mut self,
        event: ClickEvent,
    ) -> SessionResult<ClickOutcome> {
        let tool = self.state.tool;
        let in_lesson = self.state.lesson.is_some();
        let target = self.target(&event);

        if is_first_pick(self.state.step) {
            let label = match tool {
                ConstructionTool::Segment if in_lesson => {
                    Some(if self.scene.point_count() == 0 { "A" } else { "C" })
                }
                ConstructionTool::Segment => None,
                ConstructionTool::Ray => Some("O"),
                _ => Some("A"),
            };
            let first = self.realize(target, label);
            self.state.buffer.push(first);
            return Ok(self.advance(ToolStep::PickingSecond));
        }

        let Some(first) = self.state.buffer.get(0) else {
            return self.lost_track();
        };
        let minimum = match tool {
            ConstructionTool::Segment => self.config.validation.segment_min_separation,
            _ => self.config.validation.min_separation,
        };
        if let Some(rejection) = Self::check_separation(first.position, &target, minimum) {
            return Ok(ClickOutcome::Rejected(rejection));
        }

        let label = match tool {
            ConstructionTool::Segment if in_lesson => {
                Some(if self.scene.point_count() == 1 { "B" } else { "D" })
            }
            ConstructionTool::Segment => None,
            _ => Some(if tool == ConstructionTool::Ray { "A" } else { "B" }),
        };
        self.finish_with(target, label, |second| match tool {
            ConstructionTool::Ray => ConstructionRequest::Ray {
                origin: first,
                through: second,
            },
            ConstructionTool::InfiniteLine => ConstructionRequest::InfiniteLine {
                a: first,
                b: second,
            },
            _ => ConstructionRequest::Segment {
                a: first,
                b: second,
            },
        })
    }

    pub(super) fn fixed_length_tool_click(
        &mut self,
        event: ClickEvent,
    ) -> SessionResult<ClickOutcome> {
        if !is_first_pick(self.state.step) {
            return Ok(ClickOutcome::Ignored);
        }
        let target = self.target(&event);
        let start = self.realize(target, Some("A"));
        self.state.buffer.push(start);
        Ok(self.await_input(InputKind::Length))
    }

    // ============== Angles ==============

    pub(super) fn angle_tool_click(&mut self, event: ClickEvent) -> SessionResult<ClickOutcome> {
        let tool = self.state.tool;
        let target = self.target(&event);
        let minimum = self.config.validation.min_separation;

        match self.state.step {
            step if is_first_pick(step) => {
                let vertex = self.realize(target, Some("O"));
                self.state.buffer.push(vertex);
                Ok(self.advance(ToolStep::PickingSecond))
            }
            ToolStep::PickingSecond => {
                let Some(vertex) = self.state.buffer.get(0) else {
                    return self.lost_track();
                };
                if let Some(rejection) = Self::check_separation(vertex.position, &target, minimum) {
                    return Ok(ClickOutcome::Rejected(rejection));
                }
                let leg = self.realize(target, Some("x"));
                self.commit_leg(vertex, leg)?;
                self.state.buffer.push(leg);

                if tool == ConstructionTool::DrawAngle {
                    Ok(self.await_input(InputKind::Angle))
                } else {
                    Ok(self.advance(ToolStep::PickingThird))
                }
            }
            ToolStep::PickingThird => {
                let (Some(vertex), Some(first_leg)) =
                    (self.state.buffer.get(0), self.state.buffer.get(1))
                else {
                    return self.lost_track();
                };
                if let Some(rejection) = Self::check_separation(vertex.position, &target, minimum) {
                    return Ok(ClickOutcome::Rejected(rejection));
                }
                if tool == ConstructionTool::AngleBisector {
                    let sine = cross(
                        unit(first_leg.position - vertex.position),
                        unit(target.position() - vertex.position),
                    );
                    if sine.abs() < MIN_LEG_SINE {
                        return Ok(ClickOutcome::Rejected(Rejection::StraightAngle {
                            sine,
                            minimum: MIN_LEG_SINE,
                        }));
                    }
                }

                let request = |b: PointHandle| match tool {
                    ConstructionTool::AngleBisector => ConstructionRequest::AngleBisector {
                        vertex,
                        a: first_leg,
                        b,
                    },
                    _ => ConstructionRequest::MeasureAngle {
                        vertex,
                        a: first_leg,
                        b,
                    },
                };
                construct(&request(target.preview()))?;

                let second_leg = self.realize(target, Some("y"));
                self.commit_leg(vertex, second_leg)?;
                let built = construct(&request(second_leg))?;
                self.play(built, ToolStep::Idle)
            }
            _ => Ok(ClickOutcome::Ignored),
        }
    }

    // ============== Compass on a base segment ==============

    pub(super) fn radius_tool_click(&mut self, event: ClickEvent) -> SessionResult<ClickOutcome> {
        let tool = self.state.tool;
        let (first_label, second_label) = match tool {
            ConstructionTool::IsoscelesTriangle => ("B", "C"),
            _ => ("A", "B"),
        };
        let target = self.target(&event);

        match self.state.step {
            step if is_first_pick(step) => {
                let first = self.realize(target, Some(first_label));
                self.state.buffer.push(first);
                Ok(self.advance(ToolStep::PickingSecond))
            }
            ToolStep::PickingSecond => {
                let Some(first) = self.state.buffer.get(0) else {
                    return self.lost_track();
                };
                let minimum = self.config.validation.min_separation;
                if let Some(rejection) = Self::check_separation(first.position, &target, minimum) {
                    return Ok(ClickOutcome::Rejected(rejection));
                }
                let second = self.realize(target, Some(second_label));
                self.state.buffer.push(second);
                let base = construction::segment(first, second)?;
                self.play(base, ToolStep::SettingRadius)
            }
            ToolStep::SettingRadius => {
                let (Some(a), Some(b)) = (self.state.buffer.get(0), self.state.buffer.get(1)) else {
                    return self.lost_track();
                };
                let radius = a.position.distance(event.position);
                let half_base = a.position.distance(b.position) / 2.0;
                if radius <= half_base {
                    return Ok(ClickOutcome::Rejected(Rejection::RadiusTooSmall {
                        radius,
                        minimum: half_base,
                    }));
                }
                self.state.buffer.radius = Some(radius);

                let request = match tool {
                    ConstructionTool::Midpoint => ConstructionRequest::Midpoint { a, b, radius },
                    ConstructionTool::IsoscelesTriangle => ConstructionRequest::IsoscelesTriangle {
                        b: a,
                        c: b,
                        radius,
                    },
                    _ => ConstructionRequest::PerpendicularBisector { a, b, radius },
                };
                let built = construct(&request)?;
                self.play(built, ToolStep::Idle)
            }
            _ => Ok(ClickOutcome::Ignored),
        }
    }

    // ============== Triangles ==============

    /// B, then C; the segment and the triangle are played together
    pub(super) fn equilateral_tool_click(
        &mut self,
        event: ClickEvent,
    ) -> SessionResult<ClickOutcome> {
        let target = self.target(&event);

        if is_first_pick(self.state.step) {
            let b = self.realize(target, Some("B"));
            self.state.buffer.push(b);
            return Ok(self.advance(ToolStep::PickingSecond));
        }
        if self.state.step != ToolStep::PickingSecond {
            return Ok(ClickOutcome::Ignored);
        }

        let Some(b) = self.state.buffer.get(0) else {
            return self.lost_track();
        };
        let minimum = self.config.validation.min_separation;
        if let Some(rejection) = Self::check_separation(b.position, &target, minimum) {
            return Ok(ClickOutcome::Rejected(rejection));
        }
        let request = |c| ConstructionRequest::EquilateralTriangle { b, c };
        construct(&request(target.preview()))?;

        let c = self.realize(target, Some("C"));
        let built = construction::segment(b, c)?.then(construct(&request(c))?);
        self.play(built, ToolStep::Idle)
    }

    /// Diameter B, C; then the vertex A on the Thales circle
    pub(super) fn right_triangle_tool_click(
        &mut self,
        event: ClickEvent,
    ) -> SessionResult<ClickOutcome> {
        let target = self.target(&event);
        let minimum = self.config.validation.min_separation;

        match self.state.step {
            step if is_first_pick(step) => {
                let b = self.realize(target, Some("B"));
                self.state.buffer.push(b);
                Ok(self.advance(ToolStep::PickingSecond))
            }
            ToolStep::PickingSecond => {
                let Some(b) = self.state.buffer.get(0) else {
                    return self.lost_track();
                };
                if let Some(rejection) = Self::check_separation(b.position, &target, minimum) {
                    return Ok(ClickOutcome::Rejected(rejection));
                }
                let c = self.realize(target, Some("C"));
                self.state.buffer.push(c);

                let stage = construct(&ConstructionRequest::ThalesCircle { b, c })?;
                self.state.buffer.circle = Some(GuideCircle {
                    center: midpoint(b.position, c.position),
                    radius: b.position.distance(c.position) / 2.0,
                });
                self.play(stage, ToolStep::PickingPointOnCircle)
            }
            ToolStep::PickingPointOnCircle => {
                let (Some(b), Some(c), Some(circle)) = (
                    self.state.buffer.get(0),
                    self.state.buffer.get(1),
                    self.state.buffer.circle,
                ) else {
                    return self.lost_track();
                };

                let miss = circle.distance_to_edge(event.position);
                let tolerance = self.config.validation.circle_pick_tolerance;
                if miss > tolerance {
                    return Ok(ClickOutcome::Rejected(Rejection::OffCircle {
                        distance: miss,
                        tolerance,
                    }));
                }

                let apex = ClickTarget::Fresh(closest_point_on_circle(
                    circle.center,
                    circle.radius,
                    event.position,
                ));
                for end in [b, c] {
                    if let Some(rejection) = Self::check_separation(end.position, &apex, minimum) {
                        return Ok(ClickOutcome::Rejected(rejection));
                    }
                }
                self.finish_with(apex, Some("A"), |apex| {
                    ConstructionRequest::RightTriangle { b, c, apex }
                })
            }
            _ => Ok(ClickOutcome::Ignored),
        }
    }

    // ============== Tangents ==============

    /// Center O, then the radius, then the external point M
    pub(super) fn tangent_tool_click(&mut self, event: ClickEvent) -> SessionResult<ClickOutcome> {
        match self.state.step {
            step if is_first_pick(step) => {
                let target = self.target(&event);
                let center = self.realize(target, Some("O"));
                self.state.buffer.push(center);
                Ok(self.advance(ToolStep::SettingRadius))
            }
            ToolStep::SettingRadius => {
                let Some(center) = self.state.buffer.get(0) else {
                    return self.lost_track();
                };
                let radius = center.position.distance(event.position);
                let minimum = self.config.validation.min_tangent_radius;
                if radius < minimum {
                    let rejection = Rejection::RadiusTooSmall { radius, minimum };
                    return Ok(ClickOutcome::Rejected(rejection));
                }

                let base = construction::circle(center, radius)?;
                self.commit(base.delta)?;
                self.state.buffer.radius = Some(radius);
                self.state.buffer.circle = Some(GuideCircle {
                    center: center.position,
                    radius,
                });
                Ok(self.advance(ToolStep::PickingThird))
            }
            ToolStep::PickingThird => {
                let (Some(center), Some(radius)) =
                    (self.state.buffer.get(0), self.state.buffer.radius)
                else {
                    return self.lost_track();
                };
                let target = self.target(&event);
                let distance = center.position.distance(target.position());
                if distance <= radius {
                    let rejection = Rejection::PointInsideCircle { distance, radius };
                    info!("{}", rejection.message());
                    return Ok(ClickOutcome::Rejected(rejection));
                }
                self.finish_with(target, Some("M"), |external| {
                    ConstructionRequest::TangentsFromPoint {
                        center,
                        radius,
                        external,
                    }
                })
            }
            _ => Ok(ClickOutcome::Ignored),
        }
    }

    // ============== Set square ==============

    /// Line d (two points, or an existing line), then the point M
    pub(super) fn set_square_tool_click(
        &mut self,
        event: ClickEvent,
    ) -> SessionResult<ClickOutcome> {
        let tool = self.state.tool;

        match self.state.step {
            step if is_first_pick(step) => {
                if let Some(line) = event
                    .snap
                    .filter(|s| !s.is_point())
                    .and_then(|s| self.scene.line(s.id))
                {
                    let d = (
                        PointHandle::new(line.start_id, line.start),
                        PointHandle::new(line.end_id, line.end),
                    );
                    self.state.buffer.line = Some(d);
                    return Ok(self.advance(ToolStep::PickingThird));
                }

                let target = self.target(&event);
                let first = self.realize(target, None);
                self.state.buffer.push(first);
                Ok(self.advance(ToolStep::PickingSecond))
            }
            ToolStep::PickingSecond => {
                let Some(first) = self.state.buffer.get(0) else {
                    return self.lost_track();
                };
                let target = self.target(&event);
                let minimum = self.config.validation.min_separation;
                if let Some(rejection) = Self::check_separation(first.position, &target, minimum) {
                    return Ok(ClickOutcome::Rejected(rejection));
                }
                let second = self.realize(target, None);

                let mut delta = SceneDelta::new();
                delta.add_line(
                    NewLine::line(first.point_ref(), second.point_ref(), LINE_OVERSHOOT)
                        .with_label("d"),
                );
                self.commit(delta)?;
                self.state.buffer.line = Some((first, second));
                Ok(self.advance(ToolStep::PickingThird))
            }
            ToolStep::PickingThird => {
                let Some((start, end)) = self.state.buffer.line else {
                    return self.lost_track();
                };
                let target = self.target(&event);
                let foot = project_point_onto_line(start.position, end.position, target.position());
                let distance = foot.distance(target.position());
                let minimum = self.config.validation.min_separation;
                if distance < minimum {
                    return Ok(ClickOutcome::Rejected(Rejection::OnLine { distance, minimum }));
                }

                self.finish_with(target, Some("M"), |point| match tool {
                    ConstructionTool::ParallelSliding => ConstructionRequest::ParallelViaSliding {
                        line_start: start,
                        line_end: end,
                        point,
                    },
                    _ => ConstructionRequest::PerpendicularViaSetSquare {
                        line_start: start,
                        line_end: end,
                        point,
                    },
                })
            }
            _ => Ok(ClickOutcome::Ignored),
        }
    }

    // ============== Quadrilaterals ==============

    pub(super) fn quadrilateral_tool_click(
        &mut self,
        event: ClickEvent,
    ) -> SessionResult<ClickOutcome> {
        const LABELS: [&str; 4] = ["A", "B", "C", "D"];
        const NEXT: [ToolStep; 3] = [
            ToolStep::PickingSecond,
            ToolStep::PickingThird,
            ToolStep::PickingFourth,
        ];

        let target = self.target(&event);
        let picked = self.state.buffer.len();
        let minimum = self.config.validation.min_separation;
        if let Some(last) = self.state.buffer.last() {
            if let Some(rejection) = Self::check_separation(last.position, &target, minimum) {
                return Ok(ClickOutcome::Rejected(rejection));
            }
        }

        if let Some(&next) = NEXT.get(picked) {
            let vertex = self.realize(target, Some(LABELS[picked]));
            self.state.buffer.push(vertex);
            return Ok(self.advance(next));
        }

        let (Some(a), Some(b), Some(c)) = (
            self.state.buffer.get(0),
            self.state.buffer.get(1),
            self.state.buffer.get(2),
        ) else {
            return self.lost_track();
        };
        // D closes the outline back to A
        if let Some(rejection) = Self::check_separation(a.position, &target, minimum) {
            return Ok(ClickOutcome::Rejected(rejection));
        }
        self.finish_with(target, Some("D"), |d| ConstructionRequest::Quadrilateral {
            vertices: [a, b, c, d],
        })
    }

    /// A, B and C; AB and BC are drawn as they are picked, D is constructed
    pub(super) fn parallelogram_tool_click(
        &mut self,
        event: ClickEvent,
    ) -> SessionResult<ClickOutcome> {
        let target = self.target(&event);
        let minimum = self.config.validation.min_separation;

        match self.state.step {
            step if is_first_pick(step) => {
                let a = self.realize(target, Some("A"));
                self.state.buffer.push(a);
                Ok(self.advance(ToolStep::PickingSecond))
            }
            ToolStep::PickingSecond => {
                let Some(a) = self.state.buffer.get(0) else {
                    return self.lost_track();
                };
                if let Some(rejection) = Self::check_separation(a.position, &target, minimum) {
                    return Ok(ClickOutcome::Rejected(rejection));
                }
                let b = self.realize(target, Some("B"));
                self.commit(construction::segment(a, b)?.delta)?;
                self.state.buffer.push(b);
                Ok(self.advance(ToolStep::PickingThird))
            }
            ToolStep::PickingThird => {
                let (Some(a), Some(b)) = (self.state.buffer.get(0), self.state.buffer.get(1)) else {
                    return self.lost_track();
                };
                if let Some(rejection) = Self::check_separation(b.position, &target, minimum) {
                    return Ok(ClickOutcome::Rejected(rejection));
                }
                let request = |c| ConstructionRequest::Parallelogram { a, b, c };
                construct(&request(target.preview()))?;

                let c = self.realize(target, Some("C"));
                self.commit(construction::segment(b, c)?.delta)?;
                let built = construct(&request(c))?;
                self.play(built, ToolStep::Idle)
            }
            _ => Ok(ClickOutcome::Ignored),
        }
    }

    // ============== Typed values ==============

    pub(super) fn finish_input(
        &mut self,
        kind: InputKind,
        value: f64,
    ) -> SessionResult<ClickOutcome> {
        match kind {
            InputKind::Length => {
                let Some(start) = self.state.buffer.get(0) else {
                    return self.lost_track();
                };
                let built = construct(&ConstructionRequest::FixedLengthSegment {
                    start,
                    length_cm: value,
                })?;
                self.play(built, ToolStep::Idle)
            }
            InputKind::Angle => {
                let (Some(vertex), Some(base)) =
                    (self.state.buffer.get(0), self.state.buffer.get(1))
                else {
                    return self.lost_track();
                };
                let built = construct(&ConstructionRequest::DrawAngle {
                    vertex,
                    base,
                    degrees: value,
                })?;
                self.play(built, ToolStep::Idle)
            }
        }
    }
}
