//! Scene deltas
//!
//! A delta is an ordered batch of new entities produced by a construction.
//! Entities inside a delta refer to points either already in the scene or
//! created earlier in the same delta, so a construction never needs to know
//! which ids the scene will allocate.

use compass_core::{Color, DecorationShape, LineKind, PointOrigin};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a point from inside a delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointRef {
    /// A point already committed to the scene
    Existing(Uuid),
    /// The n-th point of the same delta
    New(usize),
}

/// A point to be created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPoint {
    pub position: DVec2,
    pub label: Option<String>,
    pub color: Option<Color>,
    pub origin: PointOrigin,
}

impl NewPoint {
    pub fn authored(position: DVec2) -> Self {
        Self {
            position,
            label: None,
            color: None,
            origin: PointOrigin::Authored,
        }
    }

    pub fn derived(position: DVec2) -> Self {
        Self {
            origin: PointOrigin::Derived,
            ..Self::authored(position)
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// A line to be created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLine {
    pub start: PointRef,
    pub end: PointRef,
    pub kind: LineKind,
    pub overshoot: f64,
    pub length_label: Option<String>,
    pub color: Option<Color>,
}

impl NewLine {
    pub fn segment(start: PointRef, end: PointRef) -> Self {
        Self {
            start,
            end,
            kind: LineKind::Segment,
            overshoot: 0.0,
            length_label: None,
            color: None,
        }
    }

    pub fn ray(start: PointRef, end: PointRef, overshoot: f64) -> Self {
        Self {
            kind: LineKind::Ray,
            overshoot,
            ..Self::segment(start, end)
        }
    }

    pub fn line(start: PointRef, end: PointRef, overshoot: f64) -> Self {
        Self {
            kind: LineKind::Line,
            overshoot,
            ..Self::segment(start, end)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.length_label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// A circle to be created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCircle {
    pub center: DVec2,
    /// Point the center follows on drag
    pub center_ref: Option<PointRef>,
    pub radius: f64,
    pub color: Option<Color>,
}

/// A decoration to be created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDecoration {
    pub shape: DecorationShape,
    pub color: Option<Color>,
}

/// Ordered batch of entities committed atomically
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDelta {
    pub points: Vec<NewPoint>,
    pub lines: Vec<NewLine>,
    pub circles: Vec<NewCircle>,
    pub decorations: Vec<NewDecoration>,
}

impl SceneDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point and return a reference usable by later entries
    pub fn add_point(&mut self, point: NewPoint) -> PointRef {
        self.points.push(point);
        PointRef::New(self.points.len() - 1)
    }

    pub fn add_line(&mut self, line: NewLine) {
        self.lines.push(line);
    }

    pub fn add_circle(&mut self, center: DVec2, center_ref: Option<PointRef>, radius: f64) {
        self.circles.push(NewCircle {
            center,
            center_ref,
            radius,
            color: None,
        });
    }

    pub fn add_decoration(&mut self, shape: DecorationShape, color: Option<Color>) {
        self.decorations.push(NewDecoration { shape, color });
    }

    /// Append another delta, rebasing its internal point references
    pub fn extend(&mut self, other: SceneDelta) {
        let offset = self.points.len();
        let rebase = |r: PointRef| match r {
            PointRef::New(i) => PointRef::New(i + offset),
            existing => existing,
        };

        self.points.extend(other.points);
        self.lines.extend(other.lines.into_iter().map(|mut l| {
            l.start = rebase(l.start);
            l.end = rebase(l.end);
            l
        }));
        self.circles.extend(other.circles.into_iter().map(|mut c| {
            c.center_ref = c.center_ref.map(rebase);
            c
        }));
        self.decorations.extend(other.decorations);
    }

    /// Give every point, line, and circle without a color the given one
    pub fn paint(&mut self, color: Color) {
        for p in &mut self.points {
            p.color.get_or_insert(color);
        }
        for l in &mut self.lines {
            l.color.get_or_insert(color);
        }
        for c in &mut self.circles {
            c.color.get_or_insert(color);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    pub fn entity_count(&self) -> usize {
        self.points.len() + self.lines.len() + self.circles.len() + self.decorations.len()
    }

    /// The new point a reference points at, if it is part of this delta
    pub fn new_point(&self, r: PointRef) -> Option<&NewPoint> {
        match r {
            PointRef::New(i) => self.points.get(i),
            PointRef::Existing(_) => None,
        }
    }

    /// First new point carrying the given label
    pub fn point_labelled(&self, label: &str) -> Option<&NewPoint> {
        self.points
            .iter()
            .find(|p| p.label.as_deref() == Some(label))
    }

    /// Decorations of one shape kind, by type name
    pub fn decorations_of(&self, type_name: &str) -> impl Iterator<Item = &NewDecoration> {
        self.decorations
            .iter()
            .filter(move |d| d.shape.type_name() == type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_rebases_new_refs() {
        let mut first = SceneDelta::new();
        first.add_point(NewPoint::derived(DVec2::ZERO));

        let existing = Uuid::new_v4();
        let mut second = SceneDelta::new();
        let p = second.add_point(NewPoint::derived(DVec2::ONE));
        second.add_line(NewLine::segment(PointRef::Existing(existing), p));
        second.add_circle(DVec2::ONE, Some(p), 5.0);

        first.extend(second);

        assert_eq!(first.points.len(), 2);
        assert_eq!(first.lines[0].start, PointRef::Existing(existing));
        assert_eq!(first.lines[0].end, PointRef::New(1));
        assert_eq!(first.circles[0].center_ref, Some(PointRef::New(1)));
    }

    #[test]
    fn test_paint_keeps_explicit_colors() {
        let mut delta = SceneDelta::new();
        let a = delta.add_point(NewPoint::authored(DVec2::ZERO));
        let b = delta.add_point(NewPoint::authored(DVec2::X));
        delta.add_line(NewLine::segment(a, b).with_color(Color::EMPHASIS));

        let blue = Color::rgb(0, 0, 255);
        delta.paint(blue);

        assert_eq!(delta.points[0].color, Some(blue));
        assert_eq!(delta.lines[0].color, Some(Color::EMPHASIS));
    }
}
