//! Session commands
//!
//! Every user event as a serialisable value, so an event stream can be
//! recorded, scripted and replayed against a [`Session`].

use compass_core::Color;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::session::{ClickEvent, ClickOutcome, Session, SessionError, SessionResult};
use crate::state::ConstructionTool;

fn default_zoom() -> f64 {
    1.0
}

/// A user event
///
/// Points are named by label, since ids are only known once the scene
/// allocates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionCommand {
    /// Switch to another tool
    SelectTool(ConstructionTool),
    /// Click at a world position; snapping is resolved by the session
    Click {
        x: f64,
        y: f64,
        #[serde(default = "default_zoom")]
        zoom: f64,
    },
    /// Click that skips snapping
    RawClick(ClickEvent),
    /// Type a length or an angle
    Input(String),
    /// Playback of the current construction has finished
    FinishAnimation,
    /// Drag a point to a new position
    DragPoint { label: String, x: f64, y: f64 },
    /// Drag a point's label to an absolute position
    DragLabel { label: String, x: f64, y: f64 },
    /// Change the colour of new geometry
    SetColor(Color),
    /// Start a lesson by id
    StartLesson(String),
}

impl SessionCommand {
    /// Get a description of the command for display
    pub fn description(&self) -> &'static str {
        match self {
            SessionCommand::SelectTool(_) => "Select Tool",
            SessionCommand::Click { .. } | SessionCommand::RawClick(_) => "Click",
            SessionCommand::Input(_) => "Input",
            SessionCommand::FinishAnimation => "Finish Animation",
            SessionCommand::DragPoint { .. } => "Drag Point",
            SessionCommand::DragLabel { .. } => "Drag Label",
            SessionCommand::SetColor(_) => "Set Color",
            SessionCommand::StartLesson(_) => "Start Lesson",
        }
    }

    /// Check if the command can commit geometry
    pub fn can_commit(&self) -> bool {
        matches!(
            self,
            SessionCommand::Click { .. }
                | SessionCommand::RawClick(_)
                | SessionCommand::Input(_)
                | SessionCommand::FinishAnimation
        )
    }
}

/// Apply a command to a session.
///
/// Clicks, inputs, and animation finishes report what they did; the other
/// commands return `None` on success.
pub fn dispatch(
    session: &mut Session,
    command: SessionCommand,
) -> SessionResult<Option<ClickOutcome>> {
    match command {
        SessionCommand::SelectTool(tool) => {
            session.select_tool(tool)?;
            Ok(None)
        }

        SessionCommand::Click { x, y, zoom } => session.click(DVec2::new(x, y), zoom).map(Some),

        SessionCommand::RawClick(event) => session.handle_click(event).map(Some),

        SessionCommand::Input(text) => session.submit_input(&text).map(Some),

        SessionCommand::FinishAnimation => session.finish_animation().map(Some),

        SessionCommand::DragPoint { label, x, y } => {
            let id = point_id(session, &label)?;
            session.drag_point(id, DVec2::new(x, y))?;
            Ok(None)
        }

        SessionCommand::DragLabel { label, x, y } => {
            let id = point_id(session, &label)?;
            session.drag_label(id, DVec2::new(x, y))?;
            Ok(None)
        }

        SessionCommand::SetColor(color) => {
            session.set_color(color);
            Ok(None)
        }

        SessionCommand::StartLesson(id) => {
            let lesson = session.start_lesson(&id)?;
            info!("Lesson tool: {}", lesson.tool.name());
            Ok(None)
        }
    }
}

fn point_id(session: &Session, label: &str) -> SessionResult<Uuid> {
    session
        .scene()
        .point_by_label(label)
        .map(|p| p.id)
        .ok_or_else(|| SessionError::UnknownLabel(label.to_string()))
}
