//! Decoration type definitions
//!
//! Decorations are the certificate markup left behind by a construction:
//! equal-length ticks, right-angle corners, angle arcs, and floating labels.
//! They are immutable once committed.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Color;

/// Geometry of a decoration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecorationShape {
    /// Short stroke(s) crossing a segment or arc, marking equality
    Tick { points: Vec<DVec2> },
    /// Square-corner polyline at a vertex
    RightAngle { points: [DVec2; 3] },
    /// Arc from `rotation` sweeping `sweep` degrees (always non-negative)
    Angle {
        center: DVec2,
        radius: f64,
        rotation: f64,
        sweep: f64,
    },
    /// Floating text
    Text { position: DVec2, text: String },
}

impl DecorationShape {
    pub fn type_name(&self) -> &'static str {
        match self {
            DecorationShape::Tick { .. } => "Tick",
            DecorationShape::RightAngle { .. } => "RightAngle",
            DecorationShape::Angle { .. } => "Angle",
            DecorationShape::Text { .. } => "Text",
        }
    }
}

/// A committed decoration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    /// Unique identifier
    pub id: Uuid,
    pub shape: DecorationShape,
    #[serde(default)]
    pub color: Option<Color>,
}

impl Decoration {
    pub fn is_right_angle(&self) -> bool {
        matches!(self.shape, DecorationShape::RightAngle { .. })
    }

    /// Vertex of a right-angle mark (the corner the two legs leave from)
    pub fn right_angle_vertex(&self) -> Option<DVec2> {
        match &self.shape {
            DecorationShape::RightAngle { points } => Some(points[0] + points[2] - points[1]),
            _ => None,
        }
    }
}
