//! Line type definition

use glam::DVec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Color;
use crate::math::unit;

/// Rendering extent of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineKind {
    /// Bounded by its two anchors
    #[default]
    Segment,
    /// Starts at the first anchor and runs past the second
    Ray,
    /// Runs past both anchors
    Line,
}

/// A committed line between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Unique identifier
    pub id: Uuid,
    /// Start point ID
    pub start_id: Uuid,
    /// End point ID
    pub end_id: Uuid,
    /// Current coordinates of the start point
    pub start: DVec2,
    /// Current coordinates of the end point
    pub end: DVec2,
    pub kind: LineKind,
    /// Distance the drawn stroke extends past an open end
    #[serde(default)]
    pub overshoot: f64,
    #[serde(default)]
    pub length_label: Option<String>,
    #[serde(default)]
    pub color: Option<Color>,
}

impl Line {
    /// Whether the line is anchored at the given point
    pub fn references_point(&self, id: Uuid) -> bool {
        self.start_id == id || self.end_id == id
    }

    /// Endpoints of the drawn stroke
    pub fn visual_extent(&self) -> (DVec2, DVec2) {
        let dir = unit(self.end - self.start);
        match self.kind {
            LineKind::Segment => (self.start, self.end),
            LineKind::Ray => (self.start, self.end + dir * self.overshoot),
            LineKind::Line => (
                self.start - dir * self.overshoot,
                self.end + dir * self.overshoot,
            ),
        }
    }
}
