//! Tool step types

use serde::{Deserialize, Serialize};

/// Position of the active tool in its click sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolStep {
    #[default]
    Idle,
    PickingFirst,
    PickingSecond,
    PickingThird,
    PickingFourth,
    /// Next click sets a compass opening
    SettingRadius,
    /// Next click must land on the Thales circle
    PickingPointOnCircle,
    /// Waiting for a typed length
    InputLength,
    /// Waiting for a typed angle
    InputAngle,
    /// A computed construction is being played back; clicks are ignored
    Animating,
}

impl ToolStep {
    /// Get the display name of the step
    pub fn name(&self) -> &'static str {
        match self {
            ToolStep::Idle => "Idle",
            ToolStep::PickingFirst => "Picking first point",
            ToolStep::PickingSecond => "Picking second point",
            ToolStep::PickingThird => "Picking third point",
            ToolStep::PickingFourth => "Picking fourth point",
            ToolStep::SettingRadius => "Setting radius",
            ToolStep::PickingPointOnCircle => "Picking point on circle",
            ToolStep::InputLength => "Entering length",
            ToolStep::InputAngle => "Entering angle",
            ToolStep::Animating => "Animating",
        }
    }

    /// Check if the step is waiting for typed input instead of a click
    pub fn is_input(&self) -> bool {
        matches!(self, ToolStep::InputLength | ToolStep::InputAngle)
    }

    /// Check if snapping to scene geometry applies at this step
    pub fn allows_snap(&self) -> bool {
        !matches!(
            self,
            ToolStep::Animating | ToolStep::SettingRadius | ToolStep::PickingPointOnCircle
        )
    }
}

/// Kind of numeric value a step is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    /// Length in centimetres
    Length,
    /// Angle in degrees
    Angle,
}

impl InputKind {
    pub fn name(&self) -> &'static str {
        match self {
            InputKind::Length => "Length",
            InputKind::Angle => "Angle",
        }
    }

    /// The step that waits for this kind of value
    pub fn step(&self) -> ToolStep {
        match self {
            InputKind::Length => ToolStep::InputLength,
            InputKind::Angle => ToolStep::InputAngle,
        }
    }
}
