//! Construction Algorithms
//!
//! One pure function per classical construction. Every function shares the
//! signature `(inputs) -> Result<Construction, ConstructionError>`: the scene
//! delta to commit plus the keyframes that replay the construction.
//!
//! Where two circle intersections are possible, each construction applies its
//! own tie-break policy (upper, farther from the vertex, farther from B); the
//! policies are deliberately not shared.

mod angle;
mod bisector;
mod keyframe;
mod marks;
mod primitives;
mod quadrilateral;
mod set_square;
mod tangent;
mod triangle;

pub use angle::*;
pub use bisector::*;
pub use keyframe::*;
pub use primitives::*;
pub use quadrilateral::*;
pub use set_square::*;
pub use tangent::*;
pub use triangle::*;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::scene::{PointRef, SceneDelta};

/// Construction-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// A required intersection does not exist
    #[error("Degenerate construction: {0}")]
    Degenerate(&'static str),

    #[error("Point must lie outside the circle (distance {distance:.1}, radius {radius:.1})")]
    PointInsideCircle { distance: f64, radius: f64 },

    #[error("Compass radius {radius:.1} must exceed half the base ({half_base:.1})")]
    RadiusTooSmall { radius: f64, half_base: f64 },

    #[error("Invalid value: {0}")]
    InvalidValue(f64),
}

pub type ConstructionResult = Result<Construction, ConstructionError>;

/// A committed point passed into a construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointHandle {
    pub id: Uuid,
    pub position: DVec2,
}

impl PointHandle {
    pub fn new(id: Uuid, position: DVec2) -> Self {
        Self { id, position }
    }

    /// Reference to this point from inside a delta
    pub fn point_ref(&self) -> PointRef {
        PointRef::Existing(self.id)
    }
}

/// Output of a construction: geometry to commit and its replay trace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Construction {
    pub delta: SceneDelta,
    pub keyframes: Vec<Keyframe>,
}

impl Construction {
    pub fn new(delta: SceneDelta, keyframes: Vec<Keyframe>) -> Self {
        Self { delta, keyframes }
    }

    /// Append another construction's geometry and trace after this one
    pub fn then(mut self, next: Construction) -> Self {
        self.delta.extend(next.delta);
        self.keyframes.extend(next.keyframes);
        self
    }
}

/// Inputs of every supported construction, dispatched by [`construct`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstructionRequest {
    Segment {
        a: PointHandle,
        b: PointHandle,
    },
    Ray {
        origin: PointHandle,
        through: PointHandle,
    },
    InfiniteLine {
        a: PointHandle,
        b: PointHandle,
    },
    Circle {
        center: PointHandle,
        radius: f64,
    },
    FixedLengthSegment {
        start: PointHandle,
        length_cm: f64,
    },
    PerpendicularBisector {
        a: PointHandle,
        b: PointHandle,
        radius: f64,
    },
    Midpoint {
        a: PointHandle,
        b: PointHandle,
        radius: f64,
    },
    AngleBisector {
        vertex: PointHandle,
        a: PointHandle,
        b: PointHandle,
    },
    MeasureAngle {
        vertex: PointHandle,
        a: PointHandle,
        b: PointHandle,
    },
    DrawAngle {
        vertex: PointHandle,
        base: PointHandle,
        degrees: f64,
    },
    IsoscelesTriangle {
        b: PointHandle,
        c: PointHandle,
        radius: f64,
    },
    EquilateralTriangle {
        b: PointHandle,
        c: PointHandle,
    },
    ThalesCircle {
        b: PointHandle,
        c: PointHandle,
    },
    RightTriangle {
        b: PointHandle,
        c: PointHandle,
        apex: PointHandle,
    },
    TangentsFromPoint {
        center: PointHandle,
        radius: f64,
        external: PointHandle,
    },
    Quadrilateral {
        vertices: [PointHandle; 4],
    },
    Parallelogram {
        a: PointHandle,
        b: PointHandle,
        c: PointHandle,
    },
    PerpendicularViaSetSquare {
        line_start: PointHandle,
        line_end: PointHandle,
        point: PointHandle,
    },
    ParallelViaSliding {
        line_start: PointHandle,
        line_end: PointHandle,
        point: PointHandle,
    },
}

impl ConstructionRequest {
    /// Get the display name of the construction
    pub fn name(&self) -> &'static str {
        match self {
            ConstructionRequest::Segment { .. } => "Segment",
            ConstructionRequest::Ray { .. } => "Ray",
            ConstructionRequest::InfiniteLine { .. } => "Line",
            ConstructionRequest::Circle { .. } => "Circle",
            ConstructionRequest::FixedLengthSegment { .. } => "Fixed-length segment",
            ConstructionRequest::PerpendicularBisector { .. } => "Perpendicular bisector",
            ConstructionRequest::Midpoint { .. } => "Midpoint",
            ConstructionRequest::AngleBisector { .. } => "Angle bisector",
            ConstructionRequest::MeasureAngle { .. } => "Measure angle",
            ConstructionRequest::DrawAngle { .. } => "Draw angle",
            ConstructionRequest::IsoscelesTriangle { .. } => "Isosceles triangle",
            ConstructionRequest::EquilateralTriangle { .. } => "Equilateral triangle",
            ConstructionRequest::ThalesCircle { .. } => "Thales circle",
            ConstructionRequest::RightTriangle { .. } => "Right triangle",
            ConstructionRequest::TangentsFromPoint { .. } => "Tangents from a point",
            ConstructionRequest::Quadrilateral { .. } => "Quadrilateral",
            ConstructionRequest::Parallelogram { .. } => "Parallelogram",
            ConstructionRequest::PerpendicularViaSetSquare { .. } => "Perpendicular (set square)",
            ConstructionRequest::ParallelViaSliding { .. } => "Parallel (sliding)",
        }
    }
}

/// Run the construction named by a request
pub fn construct(request: &ConstructionRequest) -> ConstructionResult {
    match *request {
        ConstructionRequest::Segment { a, b } => segment(a, b),
        ConstructionRequest::Ray { origin, through } => ray(origin, through),
        ConstructionRequest::InfiniteLine { a, b } => infinite_line(a, b),
        ConstructionRequest::Circle { center, radius } => circle(center, radius),
        ConstructionRequest::FixedLengthSegment { start, length_cm } => {
            fixed_length_segment(start, length_cm)
        }
        ConstructionRequest::PerpendicularBisector { a, b, radius } => {
            perpendicular_bisector(a, b, radius)
        }
        ConstructionRequest::Midpoint { a, b, radius } => midpoint(a, b, radius),
        ConstructionRequest::AngleBisector { vertex, a, b } => angle_bisector(vertex, a, b),
        ConstructionRequest::MeasureAngle { vertex, a, b } => measure_angle(vertex, a, b),
        ConstructionRequest::DrawAngle {
            vertex,
            base,
            degrees,
        } => draw_angle(vertex, base, degrees),
        ConstructionRequest::IsoscelesTriangle { b, c, radius } => {
            isosceles_triangle(b, c, radius)
        }
        ConstructionRequest::EquilateralTriangle { b, c } => equilateral_triangle(b, c),
        ConstructionRequest::ThalesCircle { b, c } => thales_circle(b, c),
        ConstructionRequest::RightTriangle { b, c, apex } => right_triangle(b, c, apex),
        ConstructionRequest::TangentsFromPoint {
            center,
            radius,
            external,
        } => tangents_from_point(center, radius, external),
        ConstructionRequest::Quadrilateral { vertices } => quadrilateral(vertices),
        ConstructionRequest::Parallelogram { a, b, c } => parallelogram(a, b, c),
        ConstructionRequest::PerpendicularViaSetSquare {
            line_start,
            line_end,
            point,
        } => perpendicular_via_set_square(line_start, line_end, point),
        ConstructionRequest::ParallelViaSliding {
            line_start,
            line_end,
            point,
        } => parallel_via_sliding(line_start, line_end, point),
    }
}

/// Reject two handles sitting on top of each other
pub(crate) fn require_distinct(
    a: PointHandle,
    b: PointHandle,
    what: &'static str,
) -> Result<(), ConstructionError> {
    if a.position.distance_squared(b.position) < compass_core::math::EPSILON {
        return Err(ConstructionError::Degenerate(what));
    }
    Ok(())
}
