//! Keyframes for construction playback
//!
//! A keyframe is one geometric pose of a drawing tool. Playback layers tween
//! between consecutive keyframes; no timing information lives here.

use compass_core::math::{line_angle, normalize_degrees};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A single pose in a construction trace (angles in degrees)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Keyframe {
    /// Straightedge laid from `start` to `end`
    Ruler { start: DVec2, end: DVec2 },
    /// Pencil drawing a straight stroke
    PencilStroke { from: DVec2, to: DVec2 },
    /// Compass pivoting on `center`, sweeping `sweep` degrees from `start_angle`
    CompassArc {
        center: DVec2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    /// Protractor centered on a vertex with its baseline along `rotation`
    Protractor { center: DVec2, rotation: f64 },
    /// Set square with its right-angle corner at `corner`
    SetSquare {
        corner: DVec2,
        rotation: f64,
        flip: f64,
    },
    /// Set square sliding along its guide
    SetSquareSlide {
        from: DVec2,
        to: DVec2,
        rotation: f64,
        flip: f64,
    },
    /// Emphasis on a computed point
    Highlight { position: DVec2 },
}

impl Keyframe {
    pub fn ruler(start: DVec2, end: DVec2) -> Self {
        Keyframe::Ruler { start, end }
    }

    pub fn stroke(from: DVec2, to: DVec2) -> Self {
        Keyframe::PencilStroke { from, to }
    }

    pub fn highlight(position: DVec2) -> Self {
        Keyframe::Highlight { position }
    }

    /// Compass arc of `sweep` degrees centred on the direction center→`toward`
    pub fn arc_toward(center: DVec2, radius: f64, toward: DVec2, sweep: f64) -> Self {
        Keyframe::CompassArc {
            center,
            radius,
            start_angle: line_angle(center, toward) - sweep / 2.0,
            sweep,
        }
    }

    /// Compass arc taking the short way from direction `from` to direction `to`
    pub fn arc_between(center: DVec2, radius: f64, from: DVec2, to: DVec2) -> Self {
        let start_angle = line_angle(center, from);
        Keyframe::CompassArc {
            center,
            radius,
            start_angle,
            sweep: normalize_degrees(line_angle(center, to) - start_angle),
        }
    }

    /// Full turn of the compass starting at direction `start_angle`
    pub fn full_circle(center: DVec2, radius: f64, start_angle: f64) -> Self {
        Keyframe::CompassArc {
            center,
            radius,
            start_angle,
            sweep: 360.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Keyframe::Ruler { .. } => "Ruler",
            Keyframe::PencilStroke { .. } => "PencilStroke",
            Keyframe::CompassArc { .. } => "CompassArc",
            Keyframe::Protractor { .. } => "Protractor",
            Keyframe::SetSquare { .. } => "SetSquare",
            Keyframe::SetSquareSlide { .. } => "SetSquareSlide",
            Keyframe::Highlight { .. } => "Highlight",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arc_toward_is_centred() {
        let Keyframe::CompassArc {
            start_angle, sweep, ..
        } = Keyframe::arc_toward(DVec2::ZERO, 10.0, DVec2::new(0.0, 5.0), 100.0)
        else {
            panic!("expected a compass arc");
        };
        assert_relative_eq!(start_angle, 40.0);
        assert_relative_eq!(start_angle + sweep / 2.0, 90.0);
    }

    #[test]
    fn test_arc_between_takes_short_way() {
        let Keyframe::CompassArc {
            start_angle, sweep, ..
        } = Keyframe::arc_between(
            DVec2::ZERO,
            10.0,
            DVec2::new(-1.0, 0.1),
            DVec2::new(-1.0, -0.1),
        )
        else {
            panic!("expected a compass arc");
        };
        assert!(start_angle > 170.0);
        assert!(sweep > 0.0 && sweep < 20.0);
    }
}
