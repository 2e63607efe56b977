//! Click buffer for the construction in progress

use compass_cad::{PointHandle, Scene};
use glam::DVec2;

/// Circle a later click is measured against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideCircle {
    pub center: DVec2,
    pub radius: f64,
}

impl GuideCircle {
    /// Distance from `p` to the circumference
    pub fn distance_to_edge(&self, p: DVec2) -> f64 {
        (self.center.distance(p) - self.radius).abs()
    }
}

/// Points and values gathered by the active tool so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickBuffer {
    /// Picked points in click order
    pub points: Vec<PointHandle>,
    /// Reference line d, as its two anchors
    pub line: Option<(PointHandle, PointHandle)>,
    /// Compass opening chosen at the radius step
    pub radius: Option<f64>,
    /// Circle drawn by an earlier stage (Thales circle, tangent base circle)
    pub circle: Option<GuideCircle>,
}

impl ClickBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard everything gathered so far
    pub fn clear(&mut self) {
        self.points.clear();
        self.line = None;
        self.radius = None;
        self.circle = None;
    }

    pub fn push(&mut self, point: PointHandle) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.line.is_none() && self.circle.is_none()
    }

    pub fn get(&self, index: usize) -> Option<PointHandle> {
        self.points.get(index).copied()
    }

    pub fn last(&self) -> Option<PointHandle> {
        self.points.last().copied()
    }

    /// Re-read every buffered position from the scene, so a point dragged
    /// between clicks is used where it is now
    pub fn refresh(&mut self, scene: &Scene) {
        let sync = |handle: &mut PointHandle| {
            if let Some(point) = scene.point(handle.id) {
                handle.position = point.position;
            }
        };
        self.points.iter_mut().for_each(sync);
        if let Some((start, end)) = self.line.as_mut() {
            sync(start);
            sync(end);
        }
    }
}
