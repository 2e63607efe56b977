//! Session state types
//!
//! Plain data describing where the user is in a construction: the active
//! tool, its step, and what has been clicked so far.

mod buffer;
mod step;
mod tools;

pub use buffer::{ClickBuffer, GuideCircle};
pub use step::{InputKind, ToolStep};
pub use tools::ConstructionTool;

use compass_cad::Construction;
use compass_core::Color;

/// A computed construction waiting for its playback to finish
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConstruction {
    pub name: &'static str,
    pub construction: Construction,
    /// Step to enter once committed
    pub resume: ToolStep,
}

/// Everything the state machine tracks between events
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Current tool
    pub tool: ConstructionTool,
    /// Position in the tool's click sequence
    pub step: ToolStep,
    /// Points gathered by the current tool
    pub buffer: ClickBuffer,
    /// Construction held while animating
    pub pending: Option<PendingConstruction>,
    /// Colour applied to new geometry
    pub color: Color,
    /// Lesson the session was started from
    pub lesson: Option<&'static str>,
}

impl SessionState {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Check if a construction is being played back
    pub fn is_animating(&self) -> bool {
        self.step == ToolStep::Animating
    }

    /// Drop the construction in progress without committing anything
    pub fn cancel_construction(&mut self) {
        self.buffer.clear();
        self.pending = None;
        self.step = ToolStep::Idle;
    }
}
