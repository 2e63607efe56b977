//! Snap resolver
//!
//! Pulls a raw cursor position onto nearby scene geometry. Points take
//! priority over lines; only segments between the two anchors of a line
//! are considered.

use compass_cad::Scene;
use compass_core::math::closest_point_on_segment;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a click snapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapKind {
    Point,
    Line,
}

/// A snapped cursor position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    pub kind: SnapKind,
    /// Id of the point or line snapped to
    pub id: Uuid,
    /// Where the click lands after snapping
    pub position: DVec2,
    /// Distance from the raw cursor in world units
    pub distance: f64,
}

impl SnapResult {
    pub fn is_point(&self) -> bool {
        self.kind == SnapKind::Point
    }
}

/// Find the geometry a cursor snaps to.
///
/// `threshold` is in screen units; it is divided by `zoom` so the snap
/// radius stays the same on screen at every zoom level.
pub fn resolve(cursor: DVec2, scene: &Scene, threshold: f64, zoom: f64) -> Option<SnapResult> {
    let reach = if zoom > 0.0 { threshold / zoom } else { threshold };

    let nearest_point = scene
        .points()
        .map(|p| (p.id, p.position, p.position.distance(cursor)))
        .filter(|&(_, _, d)| d < reach)
        .min_by(|a, b| a.2.total_cmp(&b.2));

    if let Some((id, position, distance)) = nearest_point {
        return Some(SnapResult {
            kind: SnapKind::Point,
            id,
            position,
            distance,
        });
    }

    scene
        .lines()
        .map(|line| {
            let foot = closest_point_on_segment(line.start, line.end, cursor);
            (line.id, foot, foot.distance(cursor))
        })
        .filter(|&(_, _, d)| d < reach)
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(id, position, distance)| SnapResult {
            kind: SnapKind::Line,
            id,
            position,
            distance,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use compass_cad::{NewLine, NewPoint, SceneDelta};

    fn scene_with_segment() -> Scene {
        let mut scene = Scene::new();
        let mut delta = SceneDelta::new();
        let a = delta.add_point(NewPoint::authored(DVec2::new(0.0, 0.0)));
        let b = delta.add_point(NewPoint::authored(DVec2::new(100.0, 0.0)));
        delta.add_line(NewLine::segment(a, b));
        scene.apply(delta).unwrap();
        scene
    }

    #[test]
    fn test_points_beat_lines() {
        let scene = scene_with_segment();
        // 8 from the line but 12 from the point: the point still wins
        let snap = resolve(DVec2::new(91.0, 8.0), &scene, 15.0, 1.0).unwrap();
        assert_eq!(snap.kind, SnapKind::Point);
        assert_eq!(snap.position, DVec2::new(100.0, 0.0));
    }

    #[test]
    fn test_line_snap_projects_onto_segment() {
        let scene = scene_with_segment();
        let snap = resolve(DVec2::new(50.0, 6.0), &scene, 15.0, 1.0).unwrap();
        assert_eq!(snap.kind, SnapKind::Line);
        assert_relative_eq!(snap.position.x, 50.0);
        assert_relative_eq!(snap.position.y, 0.0);
        assert_relative_eq!(snap.distance, 6.0);
    }

    #[test]
    fn test_threshold_is_strict_and_scales_with_zoom() {
        let scene = scene_with_segment();
        assert!(resolve(DVec2::new(50.0, 15.0), &scene, 15.0, 1.0).is_none());

        // Zoomed in 2x the reach halves to 7.5 world units
        assert!(resolve(DVec2::new(50.0, 10.0), &scene, 15.0, 2.0).is_none());
        assert!(resolve(DVec2::new(50.0, 10.0), &scene, 15.0, 0.5).is_some());
    }

    #[test]
    fn test_nearest_point_wins() {
        let mut scene = Scene::new();
        let far = scene.add_point(DVec2::new(10.0, 0.0), compass_core::PointOrigin::Authored);
        let near = scene.add_point(DVec2::new(-4.0, 0.0), compass_core::PointOrigin::Authored);

        let snap = resolve(DVec2::ZERO, &scene, 15.0, 1.0).unwrap();
        assert_eq!(snap.id, near);
        assert_ne!(snap.id, far);
    }

    #[test]
    fn test_empty_scene_never_snaps() {
        assert!(resolve(DVec2::ZERO, &Scene::new(), 15.0, 1.0).is_none());
    }
}
