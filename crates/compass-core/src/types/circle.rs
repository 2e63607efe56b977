//! Circle type definition

use glam::DVec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Color;

/// A committed circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Unique identifier
    pub id: Uuid,
    pub center: DVec2,
    /// Point the center follows when dragged
    #[serde(default)]
    pub center_id: Option<Uuid>,
    /// Fixed at creation
    pub radius: f64,
    #[serde(default)]
    pub color: Option<Color>,
}
