//! Construction session
//!
//! The single owner of the scene and the tool state machine. Every user
//! event enters through a method here:
//! - clicks advance the active tool and commit picked points
//! - typed values finish length and angle tools
//! - finishing an animation commits the construction it was playing
//!
//! Only one construction can be in flight; while it animates, clicks are
//! ignored and edits are refused.

mod clicks;
mod outcome;

pub use outcome::{ClickOutcome, InputError, Rejection, SessionError, SessionResult};

use compass_cad::{
    CommitReceipt, Construction, NewPoint, PointHandle, Scene, SceneDelta, SceneError,
};
use compass_core::Color;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{AppConfig, SharedConfig};
use crate::lessons::{self, Lesson};
use crate::snap::{self, SnapResult};
use crate::state::{ConstructionTool, InputKind, PendingConstruction, SessionState, ToolStep};

/// A click on the canvas, already snapped by the caller if snapping applies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Raw cursor position in world coordinates
    pub position: DVec2,
    #[serde(default)]
    pub snap: Option<SnapResult>,
}

impl ClickEvent {
    pub fn at(position: DVec2) -> Self {
        Self {
            position,
            snap: None,
        }
    }

    pub fn with_snap(mut self, snap: Option<SnapResult>) -> Self {
        self.snap = snap;
        self
    }
}

/// Where a click lands after snapping
#[derive(Debug, Clone, Copy, PartialEq)]
enum ClickTarget {
    /// An existing point is reused
    Existing(PointHandle),
    /// A new point will be committed here
    Fresh(DVec2),
}

impl ClickTarget {
    fn position(&self) -> DVec2 {
        match self {
            ClickTarget::Existing(handle) => handle.position,
            ClickTarget::Fresh(position) => *position,
        }
    }

    /// Stand-in handle for checking a construction before anything is committed
    fn preview(&self) -> PointHandle {
        match self {
            ClickTarget::Existing(handle) => *handle,
            ClickTarget::Fresh(position) => PointHandle::new(Uuid::nil(), *position),
        }
    }
}

/// An interactive construction session
pub struct Session {
    scene: Scene,
    state: SessionState,
    config: AppConfig,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            scene: Scene::new(),
            state: SessionState::new(config.drawing.default_color),
            config,
        }
    }

    /// Create a session from a snapshot of the shared configuration
    pub fn from_shared(config: &SharedConfig) -> Self {
        Self::new(config.read().config().clone())
    }

    // ============== Accessors ==============

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn tool(&self) -> ConstructionTool {
        self.state.tool
    }

    pub fn step(&self) -> ToolStep {
        self.state.step
    }

    pub fn color(&self) -> Color {
        self.state.color
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// Construction waiting for its playback to finish
    pub fn pending(&self) -> Option<&PendingConstruction> {
        self.state.pending.as_ref()
    }

    /// Prompt for the user's next action
    pub fn instruction(&self) -> &'static str {
        self.state.tool.instruction(self.state.step)
    }

    /// Value proposed when a numeric prompt opens
    pub fn default_input(&self) -> Option<f64> {
        match self.state.step {
            ToolStep::InputLength => Some(self.config.validation.default_length_cm),
            ToolStep::InputAngle => Some(self.config.validation.default_angle_degrees),
            _ => None,
        }
    }

    /// Whether clicks at the current step may snap to geometry
    pub fn snap_active(&self) -> bool {
        self.config.snap.enabled && self.state.step.allows_snap()
    }

    // ============== Commands ==============

    /// Switch tools, discarding any construction in progress
    pub fn select_tool(&mut self, tool: ConstructionTool) -> SessionResult<()> {
        if self.is_animating() {
            return Err(SessionError::Busy);
        }
        self.state.cancel_construction();
        self.state.tool = tool;
        debug!("Selected tool: {}", tool.name());
        Ok(())
    }

    /// Resolve the snap for a raw cursor position, then handle the click
    pub fn click(&mut self, cursor: DVec2, zoom: f64) -> SessionResult<ClickOutcome> {
        let snap = if self.snap_active() {
            snap::resolve(cursor, &self.scene, self.config.snap.threshold, zoom)
        } else {
            None
        };
        self.handle_click(ClickEvent::at(cursor).with_snap(snap))
    }

    /// Feed a click to the active tool
    pub fn handle_click(&mut self, event: ClickEvent) -> SessionResult<ClickOutcome> {
        if self.is_animating() || self.state.step.is_input() {
            return Ok(ClickOutcome::Ignored);
        }

        let event = if self.snap_active() {
            event
        } else {
            ClickEvent::at(event.position)
        };
        self.state.buffer.refresh(&self.scene);

        let result = self.route_click(event);
        self.abort_on_failure(result)
    }

    /// Submit the value typed at an input step
    pub fn submit_input(&mut self, text: &str) -> SessionResult<ClickOutcome> {
        let kind = match self.state.step {
            ToolStep::InputLength => InputKind::Length,
            ToolStep::InputAngle => InputKind::Angle,
            _ => return Err(InputError::NotAwaitingInput.into()),
        };
        let max = match kind {
            InputKind::Length => self.config.validation.max_length_cm,
            InputKind::Angle => self.config.validation.max_angle_degrees,
        };

        let value = match parse_value(text, max) {
            Ok(value) => value,
            Err(e) => {
                warn!("Rejected {} input: {}", kind.name().to_lowercase(), e);
                return Err(e.into());
            }
        };

        self.state.buffer.refresh(&self.scene);
        let result = self.finish_input(kind, value);
        self.abort_on_failure(result)
    }

    /// Commit the construction being played back
    pub fn finish_animation(&mut self) -> SessionResult<ClickOutcome> {
        let Some(pending) = self.state.pending.take() else {
            return Ok(ClickOutcome::Ignored);
        };

        match self.scene.apply(pending.construction.delta) {
            Ok(receipt) => {
                info!(
                    "Committed {} ({} entities)",
                    pending.name,
                    receipt.entity_count()
                );
                self.resume(pending.resume);
                Ok(ClickOutcome::Committed(receipt))
            }
            Err(e) => {
                warn!("Dropped {}: {}", pending.name, e);
                self.state.cancel_construction();
                Err(e.into())
            }
        }
    }

    /// Move a point, dragging every line and circle anchored to it
    pub fn drag_point(&mut self, id: Uuid, position: DVec2) -> SessionResult<()> {
        if self.is_animating() {
            return Err(SessionError::Busy);
        }
        self.scene.move_point(id, position)?;
        Ok(())
    }

    /// Move a point's label to an absolute position
    pub fn drag_label(&mut self, id: Uuid, label_position: DVec2) -> SessionResult<()> {
        let point = self
            .scene
            .point(id)
            .ok_or(SceneError::PointNotFound(id))?;
        let offset = label_position - point.position;
        self.scene.set_label_offset(id, offset)?;
        Ok(())
    }

    /// Colour for geometry created from now on
    pub fn set_color(&mut self, color: Color) {
        self.state.color = color;
        debug!("Active color: {}", color);
    }

    /// Clear the canvas and activate a lesson's tool
    pub fn start_lesson(&mut self, id: &str) -> SessionResult<&'static Lesson> {
        let lesson = lessons::find(id).ok_or_else(|| SessionError::UnknownLesson(id.to_string()))?;

        self.scene.clear();
        self.state.cancel_construction();
        self.state.tool = lesson.tool;
        self.state.lesson = Some(lesson.id);
        info!("Started lesson {}: {}", lesson.id, lesson.title);
        Ok(lesson)
    }

    // ============== Internals ==============

    fn route_click(&mut self, event: ClickEvent) -> SessionResult<ClickOutcome> {
        use ConstructionTool as T;

        match self.state.tool {
            T::Select => Ok(ClickOutcome::Ignored),
            T::Point => self.point_tool_click(event),
            T::Segment | T::Ray | T::InfiniteLine => self.two_point_tool_click(event),
            T::FixedLengthSegment => self.fixed_length_tool_click(event),
            T::MeasureAngle | T::DrawAngle | T::AngleBisector => self.angle_tool_click(event),
            T::PerpendicularBisector | T::Midpoint | T::IsoscelesTriangle => {
                self.radius_tool_click(event)
            }
            T::EquilateralTriangle => self.equilateral_tool_click(event),
            T::RightTriangle => self.right_triangle_tool_click(event),
            T::TangentFromPoint => self.tangent_tool_click(event),
            T::PerpendicularSetSquare | T::ParallelSliding => self.set_square_tool_click(event),
            T::Quadrilateral => self.quadrilateral_tool_click(event),
            T::Parallelogram => self.parallelogram_tool_click(event),
        }
    }

    /// Reset the tool when a construction turns out to be impossible
    fn abort_on_failure(
        &mut self,
        result: SessionResult<ClickOutcome>,
    ) -> SessionResult<ClickOutcome> {
        if let Err(e @ (SessionError::Construction(_) | SessionError::Scene(_))) = &result {
            warn!("{} aborted: {}", self.state.tool.name(), e);
            self.state.cancel_construction();
        }
        result
    }

    /// Resolve a click against the scene
    fn target(&self, event: &ClickEvent) -> ClickTarget {
        match event.snap {
            Some(snap) if snap.is_point() => match self.scene.point(snap.id) {
                Some(point) => ClickTarget::Existing(PointHandle::new(point.id, point.position)),
                None => ClickTarget::Fresh(event.position),
            },
            Some(snap) => ClickTarget::Fresh(snap.position),
            None => ClickTarget::Fresh(event.position),
        }
    }

    /// Commit the point a click names, unless it already exists
    fn realize(&mut self, target: ClickTarget, label: Option<&str>) -> PointHandle {
        match target {
            ClickTarget::Existing(handle) => handle,
            ClickTarget::Fresh(position) => {
                let mut point = NewPoint::authored(position).with_color(self.state.color);
                if let Some(label) = label {
                    point = point.labelled(label);
                }
                let id = self.scene.insert_point(point);
                PointHandle::new(id, position)
            }
        }
    }

    /// Refuse a click closer than `minimum` to `from`
    fn check_separation(from: DVec2, target: &ClickTarget, minimum: f64) -> Option<Rejection> {
        let distance = from.distance(target.position());
        (distance < minimum).then_some(Rejection::TooClose { distance, minimum })
    }

    fn advance(&mut self, step: ToolStep) -> ClickOutcome {
        debug!(
            "{}: {} -> {}",
            self.state.tool.name(),
            self.state.step.name(),
            step.name()
        );
        self.state.step = step;
        ClickOutcome::Advanced(step)
    }

    fn await_input(&mut self, kind: InputKind) -> ClickOutcome {
        self.advance(kind.step());
        ClickOutcome::AwaitingInput(kind)
    }

    fn resume(&mut self, step: ToolStep) {
        self.state.step = step;
        if step == ToolStep::Idle {
            self.state.buffer.clear();
        }
    }

    /// Commit intermediate geometry right away, without playback
    fn commit(&mut self, mut delta: SceneDelta) -> SessionResult<CommitReceipt> {
        delta.paint(self.state.color);
        let receipt = self.scene.apply(delta)?;
        debug!("Committed {} entities", receipt.entity_count());
        Ok(receipt)
    }

    /// Hand a computed construction to playback, or commit it at once when
    /// animation is disabled
    fn play(
        &mut self,
        mut construction: Construction,
        resume: ToolStep,
    ) -> SessionResult<ClickOutcome> {
        construction.delta.paint(self.state.color);
        let name = self.state.tool.name();

        if !self.config.animation.enabled {
            let receipt = self.scene.apply(construction.delta)?;
            info!("Committed {} ({} entities)", name, receipt.entity_count());
            self.resume(resume);
            return Ok(ClickOutcome::Committed(receipt));
        }

        let keyframes = construction.keyframes.clone();
        self.state.pending = Some(PendingConstruction {
            name,
            construction,
            resume,
        });
        self.advance(ToolStep::Animating);
        Ok(ClickOutcome::Animating(keyframes))
    }

    /// Give up on a sequence whose buffered state no longer matches its step
    fn lost_track(&mut self) -> SessionResult<ClickOutcome> {
        warn!(
            "{}: nothing buffered for {}, resetting",
            self.state.tool.name(),
            self.state.step.name()
        );
        self.state.cancel_construction();
        Ok(ClickOutcome::Ignored)
    }
}

/// Parse a typed value in (0, max]
fn parse_value(text: &str, max: f64) -> Result<f64, InputError> {
    let value: f64 = text
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| InputError::NotANumber(text.to_string()))?;

    if value <= 0.0 {
        return Err(InputError::NonPositive(value));
    }
    if value > max {
        return Err(InputError::OutOfRange { value, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::SnapKind;
    use approx::assert_relative_eq;
    use compass_cad::ConstructionError;
    use compass_core::LineKind;

    fn immediate() -> Session {
        Session::new(AppConfig::immediate())
    }

    fn click(session: &mut Session, x: f64, y: f64) -> ClickOutcome {
        session.handle_click(ClickEvent::at(DVec2::new(x, y))).unwrap()
    }

    fn labelled(session: &Session, label: &str) -> DVec2 {
        session.scene().point_by_label(label).unwrap().position
    }

    #[test]
    fn test_clicks_are_ignored_while_animating() {
        let mut session = Session::new(AppConfig::new());
        session.select_tool(ConstructionTool::Segment).unwrap();
        click(&mut session, 0.0, 0.0);
        let outcome = click(&mut session, 100.0, 0.0);
        assert!(matches!(outcome, ClickOutcome::Animating(ref k) if !k.is_empty()));
        assert!(session.is_animating());

        let before = session.scene().entity_count();
        assert_eq!(click(&mut session, 50.0, 50.0), ClickOutcome::Ignored);
        assert_eq!(session.scene().entity_count(), before);
        assert_eq!(session.select_tool(ConstructionTool::Ray), Err(SessionError::Busy));

        let first = session.state().buffer.get(0).unwrap().id;
        assert_eq!(
            session.drag_point(first, DVec2::new(5.0, 5.0)),
            Err(SessionError::Busy)
        );

        let outcome = session.finish_animation().unwrap();
        assert!(matches!(outcome, ClickOutcome::Committed(ref r) if r.lines.len() == 1));
        assert_eq!(session.step(), ToolStep::Idle);
        assert!(session.state().buffer.is_empty());
        assert_eq!(session.finish_animation().unwrap(), ClickOutcome::Ignored);
    }

    #[test]
    fn test_tool_switch_discards_buffered_clicks() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::Quadrilateral).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 100.0, 0.0);
        assert_eq!(session.step(), ToolStep::PickingThird);
        let committed = session.scene().entity_count();

        session.select_tool(ConstructionTool::Segment).unwrap();
        assert_eq!(session.step(), ToolStep::Idle);
        assert!(session.state().buffer.is_empty());
        assert_eq!(session.scene().entity_count(), committed);
    }

    #[test]
    fn test_perpendicular_bisector_end_to_end() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::PerpendicularBisector).unwrap();

        assert_eq!(
            click(&mut session, 100.0, 100.0),
            ClickOutcome::Advanced(ToolStep::PickingSecond)
        );
        assert!(matches!(click(&mut session, 300.0, 100.0), ClickOutcome::Committed(_)));
        assert_eq!(session.step(), ToolStep::SettingRadius);

        // Opening of 150 measured from A
        assert!(matches!(click(&mut session, 250.0, 100.0), ClickOutcome::Committed(_)));
        assert_eq!(session.step(), ToolStep::Idle);

        let m = labelled(&session, "M");
        assert_relative_eq!(m.x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(m.y, 100.0, epsilon = 1e-9);

        let a = labelled(&session, "A");
        let b = labelled(&session, "B");
        let bisector = session
            .scene()
            .lines()
            .find(|l| l.kind == LineKind::Line)
            .unwrap();
        for end in [bisector.start, bisector.end] {
            assert_relative_eq!(end.distance(a), end.distance(b), epsilon = 1e-9);
        }

        let corner = session
            .scene()
            .decorations()
            .find_map(|d| d.right_angle_vertex())
            .unwrap();
        assert_relative_eq!(corner.x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(corner.y, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_radius_must_exceed_half_the_base() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::Midpoint).unwrap();
        click(&mut session, 100.0, 100.0);
        click(&mut session, 300.0, 100.0);

        let before = session.scene().entity_count();
        let outcome = click(&mut session, 180.0, 100.0);
        assert!(matches!(
            outcome,
            ClickOutcome::Rejected(r @ Rejection::RadiusTooSmall { .. }) if !r.is_user_facing()
        ));
        assert_eq!(session.step(), ToolStep::SettingRadius);
        assert_eq!(session.scene().entity_count(), before);
    }

    #[test]
    fn test_staged_tool_resumes_after_playback() {
        let mut session = Session::new(AppConfig::new());
        session.select_tool(ConstructionTool::Midpoint).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 200.0, 0.0);
        assert!(session.is_animating());

        session.finish_animation().unwrap();
        assert_eq!(session.step(), ToolStep::SettingRadius);

        assert!(matches!(click(&mut session, 150.0, 0.0), ClickOutcome::Animating(_)));
        session.finish_animation().unwrap();
        assert_eq!(session.step(), ToolStep::Idle);
        assert_relative_eq!(labelled(&session, "M").x, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_close_clicks_are_rejected_silently() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::Ray).unwrap();
        click(&mut session, 0.0, 0.0);

        let outcome = click(&mut session, 10.0, 0.0);
        assert!(matches!(
            outcome,
            ClickOutcome::Rejected(r @ Rejection::TooClose { .. }) if !r.is_user_facing()
        ));
        assert_eq!(session.step(), ToolStep::PickingSecond);
        assert_eq!(session.scene().point_count(), 1);
    }

    #[test]
    fn test_tangent_flow() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::TangentFromPoint).unwrap();
        assert_eq!(
            click(&mut session, 0.0, 0.0),
            ClickOutcome::Advanced(ToolStep::SettingRadius)
        );

        assert!(matches!(
            click(&mut session, 10.0, 0.0),
            ClickOutcome::Rejected(Rejection::RadiusTooSmall { .. })
        ));
        assert_eq!(
            click(&mut session, 50.0, 0.0),
            ClickOutcome::Advanced(ToolStep::PickingThird)
        );
        assert_eq!(session.scene().circle_count(), 1);

        let outcome = click(&mut session, 30.0, 0.0);
        assert!(matches!(outcome, ClickOutcome::Rejected(r) if r.is_user_facing()));
        assert_eq!(session.step(), ToolStep::PickingThird);
        assert!(session.scene().point_by_label("M").is_none());

        assert!(matches!(click(&mut session, 200.0, 0.0), ClickOutcome::Committed(_)));
        let o = labelled(&session, "O");
        let m = labelled(&session, "M");
        for label in ["A", "B"] {
            let touch = labelled(&session, label);
            assert_relative_eq!(touch.distance(o), 50.0, epsilon = 1e-9);
            assert_relative_eq!((touch - o).dot(touch - m), 0.0, epsilon = 1e-6);
        }
        assert_eq!(session.scene().line_count(), 4);
    }

    #[test]
    fn test_numeric_input_validation() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::FixedLengthSegment).unwrap();
        assert_eq!(
            session.submit_input("5"),
            Err(SessionError::Input(InputError::NotAwaitingInput))
        );

        assert_eq!(
            click(&mut session, 0.0, 0.0),
            ClickOutcome::AwaitingInput(InputKind::Length)
        );
        assert_eq!(session.default_input(), Some(5.0));
        assert_eq!(click(&mut session, 50.0, 50.0), ClickOutcome::Ignored);

        assert!(matches!(
            session.submit_input("abc"),
            Err(SessionError::Input(InputError::NotANumber(_)))
        ));
        assert!(matches!(
            session.submit_input("-2"),
            Err(SessionError::Input(InputError::NonPositive(_)))
        ));
        assert!(matches!(
            session.submit_input("0"),
            Err(SessionError::Input(InputError::NonPositive(_)))
        ));
        assert!(matches!(
            session.submit_input("25"),
            Err(SessionError::Input(InputError::OutOfRange { .. }))
        ));
        assert_eq!(session.step(), ToolStep::InputLength);

        assert!(matches!(session.submit_input(" 5 "), Ok(ClickOutcome::Committed(_))));
        let b = labelled(&session, "B");
        assert_relative_eq!(b.x, 200.0);
        assert_relative_eq!(b.y, 0.0);
        assert_eq!(session.step(), ToolStep::Idle);
    }

    #[test]
    fn test_draw_angle_commits_base_ray_then_waits() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::DrawAngle).unwrap();
        click(&mut session, 0.0, 0.0);
        assert_eq!(
            click(&mut session, 100.0, 0.0),
            ClickOutcome::AwaitingInput(InputKind::Angle)
        );
        assert_eq!(session.scene().line_count(), 1);
        assert_eq!(session.default_input(), Some(60.0));

        assert!(matches!(
            session.submit_input("181"),
            Err(SessionError::Input(InputError::OutOfRange { .. }))
        ));
        session.submit_input("90").unwrap();
        let y = labelled(&session, "y");
        assert_relative_eq!(y.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(y.y, -350.0, epsilon = 1e-9);
        assert_eq!(session.scene().line_count(), 2);
    }

    #[test]
    fn test_snapped_click_reuses_point() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::Segment).unwrap();
        session.click(DVec2::new(0.0, 0.0), 1.0).unwrap();
        session.click(DVec2::new(100.0, 0.0), 1.0).unwrap();
        let origin = session.scene().points().next().unwrap().id;

        // Within the snap radius of the first point
        session.click(DVec2::new(3.0, 2.0), 1.0).unwrap();
        assert_eq!(session.scene().point_count(), 2);
        assert_eq!(session.state().buffer.get(0).unwrap().id, origin);

        session.click(DVec2::new(0.0, 100.0), 1.0).unwrap();
        assert_eq!(session.scene().point_count(), 3);
        let last = session.scene().lines().last().unwrap();
        assert_eq!(last.start_id, origin);
    }

    #[test]
    fn test_snap_radius_shrinks_when_zoomed_in() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::Point).unwrap();
        session.click(DVec2::ZERO, 1.0).unwrap();

        session.select_tool(ConstructionTool::Ray).unwrap();
        // 10 world units away: inside 15/1 but outside 15/2
        session.click(DVec2::new(10.0, 0.0), 2.0).unwrap();
        assert_eq!(session.scene().point_count(), 2);
    }

    #[test]
    fn test_set_square_on_existing_line() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::InfiniteLine).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 200.0, 0.0);

        session.select_tool(ConstructionTool::PerpendicularSetSquare).unwrap();
        let outcome = session.click(DVec2::new(100.0, 4.0), 1.0).unwrap();
        assert_eq!(outcome, ClickOutcome::Advanced(ToolStep::PickingThird));
        assert_eq!(session.scene().point_count(), 2);

        session.click(DVec2::new(60.0, -80.0), 1.0).unwrap();
        let h = labelled(&session, "H");
        assert_relative_eq!(h.x, 60.0, epsilon = 1e-9);
        assert_relative_eq!(h.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parallel_draws_line_d_first() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::ParallelSliding).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 200.0, 0.0);
        assert_eq!(session.step(), ToolStep::PickingThird);
        let d = session.scene().lines().next().unwrap();
        assert_eq!(d.length_label.as_deref(), Some("d"));
        assert_eq!(d.kind, LineKind::Line);

        click(&mut session, 50.0, -60.0);
        let parallel = session
            .scene()
            .lines()
            .find(|l| l.length_label.as_deref() == Some("d'"))
            .unwrap();
        assert_relative_eq!(parallel.start.y, -60.0, epsilon = 1e-9);
        assert_relative_eq!(parallel.end.y, -60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_point_on_line_d_is_rejected_and_d_kept() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::PerpendicularSetSquare).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 200.0, 0.0);
        let committed = session.scene().entity_count();

        // The line snap pulls this click onto d
        let outcome = session.click(DVec2::new(100.0, 6.0), 1.0).unwrap();
        assert!(matches!(outcome, ClickOutcome::Rejected(Rejection::OnLine { .. })));
        assert_eq!(session.step(), ToolStep::PickingThird);
        assert!(session.state().buffer.line.is_some());
        assert_eq!(session.scene().entity_count(), committed);

        assert!(matches!(
            click(&mut session, 100.0, -80.0),
            ClickOutcome::Committed(_)
        ));
        assert_relative_eq!(labelled(&session, "H").x, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bisector_rejects_straight_legs() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::AngleBisector).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 100.0, 0.0);
        let committed = session.scene().entity_count();

        for (x, y) in [(-100.0, 0.0), (150.0, 1.0)] {
            assert!(matches!(
                click(&mut session, x, y),
                ClickOutcome::Rejected(Rejection::StraightAngle { .. })
            ));
        }
        assert_eq!(session.step(), ToolStep::PickingThird);
        assert_eq!(session.state().buffer.len(), 2);
        assert_eq!(session.scene().entity_count(), committed);

        assert!(matches!(click(&mut session, 0.0, -100.0), ClickOutcome::Committed(_)));
    }

    #[test]
    fn test_quadrilateral_rejects_d_on_a() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::Quadrilateral).unwrap();
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
            click(&mut session, x, y);
        }

        assert!(matches!(
            click(&mut session, 5.0, 5.0),
            ClickOutcome::Rejected(Rejection::TooClose { .. })
        ));
        assert_eq!(session.step(), ToolStep::PickingFourth);
        assert_eq!(session.scene().point_count(), 3);
    }

    #[test]
    fn test_failed_construction_resets_tool() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::Parallelogram).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 100.0, 0.0);

        let failure = Err(ConstructionError::Degenerate("arcs do not meet").into());
        let result = session.abort_on_failure(failure);
        assert!(matches!(result, Err(SessionError::Construction(_))));
        assert_eq!(session.step(), ToolStep::Idle);
        assert!(session.state().buffer.is_empty());

        // Outcomes that are not errors pass through untouched
        let kept = session.abort_on_failure(Ok(ClickOutcome::Ignored));
        assert_eq!(kept, Ok(ClickOutcome::Ignored));
    }

    #[test]
    fn test_point_tool_does_not_duplicate_snapped_point() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::Point).unwrap();
        session.click(DVec2::ZERO, 1.0).unwrap();

        let outcome = session.click(DVec2::new(3.0, 2.0), 1.0).unwrap();
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(session.scene().point_count(), 1);
    }

    #[test]
    fn test_right_triangle_pick_on_circle() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::RightTriangle).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 200.0, 0.0);
        assert_eq!(session.step(), ToolStep::PickingPointOnCircle);
        assert_eq!(session.scene().circle_count(), 1);

        assert!(matches!(
            click(&mut session, 100.0, 40.0),
            ClickOutcome::Rejected(Rejection::OffCircle { .. })
        ));

        assert!(matches!(click(&mut session, 100.0, -90.0), ClickOutcome::Committed(_)));
        let a = labelled(&session, "A");
        assert_relative_eq!(a.x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(a.y, -100.0, epsilon = 1e-9);
        assert!(session.scene().decorations().any(|d| d.is_right_angle()));
    }

    #[test]
    fn test_parallelogram_and_quadrilateral() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::Parallelogram).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 100.0, 0.0);
        assert_eq!(session.scene().line_count(), 1);
        click(&mut session, 150.0, 80.0);

        let d = labelled(&session, "D");
        assert_relative_eq!(d.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(d.y, 80.0, epsilon = 1e-9);
        assert_eq!(session.scene().line_count(), 4);

        session.start_lesson("g8_l1_quadrilateral").unwrap();
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
            assert!(matches!(click(&mut session, x, y), ClickOutcome::Advanced(_)));
        }
        assert!(matches!(click(&mut session, 0.0, 100.0), ClickOutcome::Committed(_)));
        assert_eq!(session.scene().line_count(), 4);
        assert!(session.scene().point_by_label("D").is_some());
    }

    #[test]
    fn test_lesson_start_clears_scene() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::Point).unwrap();
        click(&mut session, 10.0, 10.0);
        assert_eq!(labelled(&session, "P1"), DVec2::new(10.0, 10.0));

        let lesson = session.start_lesson("g7_l1_perp_bisector").unwrap();
        assert_eq!(lesson.tool, ConstructionTool::PerpendicularBisector);
        assert!(session.scene().is_empty());
        assert_eq!(session.tool(), ConstructionTool::PerpendicularBisector);
        assert_eq!(session.step(), ToolStep::Idle);

        assert_eq!(
            session.start_lesson("g6_l9_missing").unwrap_err(),
            SessionError::UnknownLesson("g6_l9_missing".into())
        );
    }

    #[test]
    fn test_segment_labels_follow_lesson() {
        let mut session = immediate();
        session.start_lesson("g6_l1_segment").unwrap();
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (0.0, 50.0), (100.0, 50.0)] {
            click(&mut session, x, y);
        }
        for label in ["A", "B", "C", "D"] {
            assert!(session.scene().point_by_label(label).is_some(), "missing {label}");
        }

        let mut free = immediate();
        free.select_tool(ConstructionTool::Segment).unwrap();
        click(&mut free, 0.0, 0.0);
        click(&mut free, 100.0, 0.0);
        assert!(free.scene().points().all(|p| p.label.is_none()));
    }

    #[test]
    fn test_drag_point_and_label() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::Ray).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 100.0, 0.0);
        let o = session.scene().point_by_label("O").unwrap().id;

        session.drag_point(o, DVec2::new(0.0, 40.0)).unwrap();
        let ray = session.scene().lines().next().unwrap();
        assert_eq!(ray.start, DVec2::new(0.0, 40.0));

        session.drag_label(o, DVec2::new(10.0, 30.0)).unwrap();
        let point = session.scene().point(o).unwrap();
        assert_eq!(point.label_offset, DVec2::new(10.0, -10.0));
        assert_eq!(point.position, DVec2::new(0.0, 40.0));

        let missing = Uuid::new_v4();
        assert!(matches!(
            session.drag_point(missing, DVec2::ZERO),
            Err(SessionError::Scene(_))
        ));
    }

    #[test]
    fn test_active_color_paints_new_geometry() {
        let mut session = immediate();
        session.set_color(Color::EMPHASIS);
        session.select_tool(ConstructionTool::Segment).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 100.0, 0.0);

        assert!(session.scene().points().all(|p| p.color == Some(Color::EMPHASIS)));
        assert!(session.scene().lines().all(|l| l.color == Some(Color::EMPHASIS)));
    }

    #[test]
    fn test_snap_is_off_while_setting_radius() {
        let mut session = immediate();
        session.select_tool(ConstructionTool::PerpendicularBisector).unwrap();
        click(&mut session, 0.0, 0.0);
        click(&mut session, 200.0, 0.0);
        assert!(!session.snap_active());

        // A point snap handed in by the caller is dropped
        let b = session.scene().point_by_label("B").unwrap().id;
        let event = ClickEvent::at(DVec2::new(150.0, 0.0)).with_snap(Some(SnapResult {
            kind: SnapKind::Point,
            id: b,
            position: DVec2::new(200.0, 0.0),
            distance: 50.0,
        }));
        session.handle_click(event).unwrap();
        let m = labelled(&session, "M");
        assert_relative_eq!(m.x, 100.0, epsilon = 1e-9);
    }
}
