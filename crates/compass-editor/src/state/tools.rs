//! Construction tool types

use serde::{Deserialize, Serialize};

use super::ToolStep;

/// Tool for the construction canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConstructionTool {
    /// Select and drag points
    #[default]
    Select,
    /// Place a free point
    Point,
    /// Segment between two points
    Segment,
    /// Segment of a typed length in centimetres
    FixedLengthSegment,
    /// Ray from an origin through a second point
    Ray,
    /// Infinite line through two points
    InfiniteLine,
    /// Measure an angle with the protractor
    MeasureAngle,
    /// Draw an angle of a typed size with the protractor
    DrawAngle,
    /// Compass bisector of an angle
    AngleBisector,
    /// Compass perpendicular bisector of a segment
    PerpendicularBisector,
    /// Compass midpoint of a segment
    Midpoint,
    /// Triangle with two equal sides of a chosen length
    IsoscelesTriangle,
    /// Triangle with three equal sides
    EquilateralTriangle,
    /// Right triangle over a Thales circle
    RightTriangle,
    /// Both tangents from an external point to a circle
    TangentFromPoint,
    /// Perpendicular through a point using a set square
    PerpendicularSetSquare,
    /// Parallel through a point by sliding a set square along a ruler
    ParallelSliding,
    /// Free quadrilateral with its angles measured
    Quadrilateral,
    /// Parallelogram completed from three vertices
    Parallelogram,
}

impl ConstructionTool {
    /// Get the display name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            ConstructionTool::Select => "Select",
            ConstructionTool::Point => "Point",
            ConstructionTool::Segment => "Segment",
            ConstructionTool::FixedLengthSegment => "Segment (Fixed Length)",
            ConstructionTool::Ray => "Ray",
            ConstructionTool::InfiniteLine => "Line",
            ConstructionTool::MeasureAngle => "Measure Angle",
            ConstructionTool::DrawAngle => "Draw Angle",
            ConstructionTool::AngleBisector => "Angle Bisector",
            ConstructionTool::PerpendicularBisector => "Perpendicular Bisector",
            ConstructionTool::Midpoint => "Midpoint",
            ConstructionTool::IsoscelesTriangle => "Isosceles Triangle",
            ConstructionTool::EquilateralTriangle => "Equilateral Triangle",
            ConstructionTool::RightTriangle => "Right Triangle",
            ConstructionTool::TangentFromPoint => "Tangents From a Point",
            ConstructionTool::PerpendicularSetSquare => "Perpendicular (Set Square)",
            ConstructionTool::ParallelSliding => "Parallel (Sliding)",
            ConstructionTool::Quadrilateral => "Quadrilateral",
            ConstructionTool::Parallelogram => "Parallelogram",
        }
    }

    /// Get every tool, in toolbar order
    pub fn all() -> &'static [ConstructionTool] {
        &[
            ConstructionTool::Select,
            ConstructionTool::Point,
            ConstructionTool::Segment,
            ConstructionTool::FixedLengthSegment,
            ConstructionTool::Ray,
            ConstructionTool::InfiniteLine,
            ConstructionTool::MeasureAngle,
            ConstructionTool::DrawAngle,
            ConstructionTool::AngleBisector,
            ConstructionTool::PerpendicularBisector,
            ConstructionTool::Midpoint,
            ConstructionTool::IsoscelesTriangle,
            ConstructionTool::EquilateralTriangle,
            ConstructionTool::RightTriangle,
            ConstructionTool::TangentFromPoint,
            ConstructionTool::PerpendicularSetSquare,
            ConstructionTool::ParallelSliding,
            ConstructionTool::Quadrilateral,
            ConstructionTool::Parallelogram,
        ]
    }

    /// Check if the tool pauses for a compass opening after its base is drawn
    pub fn uses_radius(&self) -> bool {
        matches!(
            self,
            ConstructionTool::PerpendicularBisector
                | ConstructionTool::Midpoint
                | ConstructionTool::IsoscelesTriangle
                | ConstructionTool::TangentFromPoint
        )
    }

    /// Check if the tool defines a reference line d before picking M
    pub fn uses_reference_line(&self) -> bool {
        matches!(
            self,
            ConstructionTool::PerpendicularSetSquare | ConstructionTool::ParallelSliding
        )
    }

    /// What the user should do next with this tool at the given step
    pub fn instruction(&self, step: ToolStep) -> &'static str {
        use ConstructionTool as T;
        use ToolStep as S;

        let picking_first = matches!(step, S::Idle | S::PickingFirst);
        match (self, step) {
            (T::Select, _) => "Drag a point or a label to move it.",
            (T::Point, _) => "Click anywhere to place a point.",
            (_, S::Animating) => "Constructing...",

            (T::RightTriangle, _) if picking_first => "Pick the first end B of the diameter.",
            (T::RightTriangle, S::PickingSecond) => "Pick the second end C of the diameter.",
            (T::RightTriangle, S::PickingPointOnCircle) => "Pick the vertex A on the circle.",

            (T::PerpendicularSetSquare | T::ParallelSliding, _) if picking_first => {
                "Pick the first point of line d, or click an existing line."
            }
            (T::PerpendicularSetSquare | T::ParallelSliding, S::PickingSecond) => {
                "Pick the second point of line d."
            }
            (T::PerpendicularSetSquare | T::ParallelSliding, S::PickingThird) => {
                "Pick a point M off line d."
            }

            (T::TangentFromPoint, _) if picking_first => "Pick the center O of the circle.",
            (T::TangentFromPoint, S::SettingRadius) => "Click to set the radius of circle (O).",
            (T::TangentFromPoint, S::PickingThird) => "Pick a point M outside the circle.",

            (T::MeasureAngle | T::DrawAngle | T::AngleBisector, _) if picking_first => {
                "Pick the vertex O of the angle."
            }
            (T::MeasureAngle | T::AngleBisector, S::PickingSecond) => {
                "Pick a point on the first side."
            }
            (T::MeasureAngle | T::AngleBisector, S::PickingThird) => {
                "Pick a point on the second side."
            }
            (T::DrawAngle, S::PickingSecond) => "Pick a point giving the direction Ox.",
            (T::DrawAngle, S::InputAngle) => "Enter the size of the angle in degrees.",

            (T::FixedLengthSegment, _) if picking_first => "Pick the start point A.",
            (T::FixedLengthSegment, S::InputLength) => "Enter the length in centimetres.",

            (T::Quadrilateral, _) if picking_first => "Pick the vertex A.",
            (T::Quadrilateral, S::PickingSecond) => "Pick the vertex B.",
            (T::Quadrilateral, S::PickingThird) => "Pick the vertex C.",
            (T::Quadrilateral, S::PickingFourth) => "Pick the vertex D to close the shape.",

            (T::Parallelogram, S::PickingThird) => "Pick the vertex C.",

            (_, S::SettingRadius) => "Click to set the compass opening.",
            _ if picking_first => "Pick the first point.",
            (_, S::PickingSecond) => "Pick the second point.",
            _ => "Choose a tool to begin.",
        }
    }
}
