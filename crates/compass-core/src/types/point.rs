//! Point type definition

use glam::DVec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Color;

/// How a point came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointOrigin {
    /// Placed by a user click
    #[default]
    Authored,
    /// Computed by a construction (midpoint, intersection, tangent point...)
    Derived,
}

/// A committed point in the world plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unique identifier, fixed for the point's lifetime
    pub id: Uuid,
    /// World coordinates
    pub position: DVec2,
    /// Display label
    #[serde(default)]
    pub label: Option<String>,
    /// Label placement relative to the point (presentation only)
    #[serde(default)]
    pub label_offset: DVec2,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub origin: PointOrigin,
}

impl Point {
    pub fn new(id: Uuid, position: DVec2, origin: PointOrigin) -> Self {
        Self {
            id,
            position,
            label: None,
            label_offset: DVec2::ZERO,
            color: None,
            origin,
        }
    }

    pub fn is_derived(&self) -> bool {
        self.origin == PointOrigin::Derived
    }
}
