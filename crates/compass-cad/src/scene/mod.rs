//! Scene Model
//!
//! The authoritative, in-memory collection of committed geometry:
//! - Points, lines, circles, and decorations in commit order
//! - Identity: every id is allocated here
//! - Cross references: lines and circles follow the points they reference

mod delta;

pub use delta::*;

use compass_core::{Circle, Decoration, Line, Point, PointOrigin};
use glam::DVec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Scene-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("Point not found: {0}")]
    PointNotFound(Uuid),

    #[error("Delta references missing new point #{0}")]
    DanglingReference(usize),

    #[error("Line starts and ends at the same point: {0}")]
    SelfReferencingLine(Uuid),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Ids allocated by one commit, in delta order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitReceipt {
    pub points: Vec<Uuid>,
    pub lines: Vec<Uuid>,
    pub circles: Vec<Uuid>,
    pub decorations: Vec<Uuid>,
}

impl CommitReceipt {
    pub fn entity_count(&self) -> usize {
        self.points.len() + self.lines.len() + self.circles.len() + self.decorations.len()
    }
}

/// Committed geometry of one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    points: IndexMap<Uuid, Point>,
    lines: IndexMap<Uuid, Line>,
    circles: IndexMap<Uuid, Circle>,
    decorations: IndexMap<Uuid, Decoration>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ============== Queries ==============

    /// Get a point by ID
    pub fn point(&self, id: Uuid) -> Option<&Point> {
        self.points.get(&id)
    }

    /// First point carrying the given label
    pub fn point_by_label(&self, label: &str) -> Option<&Point> {
        self.points
            .values()
            .find(|p| p.label.as_deref() == Some(label))
    }

    pub fn line(&self, id: Uuid) -> Option<&Line> {
        self.lines.get(&id)
    }

    pub fn circle(&self, id: Uuid) -> Option<&Circle> {
        self.circles.get(&id)
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.circles.values()
    }

    pub fn decorations(&self) -> impl Iterator<Item = &Decoration> {
        self.decorations.values()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn decoration_count(&self) -> usize {
        self.decorations.len()
    }

    /// Total number of committed entities of every kind
    pub fn entity_count(&self) -> usize {
        self.points.len() + self.lines.len() + self.circles.len() + self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    // ============== Commit ==============

    /// Commit a single point outside of a construction
    pub fn add_point(&mut self, position: DVec2, origin: PointOrigin) -> Uuid {
        self.insert_point(NewPoint {
            origin,
            ..NewPoint::authored(position)
        })
    }

    /// Commit a single point with its label and colour
    pub fn insert_point(&mut self, new_point: NewPoint) -> Uuid {
        let id = Uuid::new_v4();
        let mut point = Point::new(id, new_point.position, new_point.origin);
        point.label = new_point.label;
        point.color = new_point.color;
        self.points.insert(id, point);
        id
    }

    /// Append a delta atomically.
    ///
    /// Every reference is resolved before anything is inserted, so a failing
    /// delta leaves the scene untouched.
    pub fn apply(&mut self, delta: SceneDelta) -> SceneResult<CommitReceipt> {
        let new_ids: Vec<Uuid> = delta.points.iter().map(|_| Uuid::new_v4()).collect();

        let resolve = |r: PointRef| -> SceneResult<(Uuid, DVec2)> {
            match r {
                PointRef::Existing(id) => self
                    .points
                    .get(&id)
                    .map(|p| (id, p.position))
                    .ok_or(SceneError::PointNotFound(id)),
                PointRef::New(i) => delta
                    .points
                    .get(i)
                    .map(|p| (new_ids[i], p.position))
                    .ok_or(SceneError::DanglingReference(i)),
            }
        };

        let mut lines = Vec::with_capacity(delta.lines.len());
        for new_line in &delta.lines {
            let (start_id, start) = resolve(new_line.start)?;
            let (end_id, end) = resolve(new_line.end)?;
            if start_id == end_id {
                return Err(SceneError::SelfReferencingLine(start_id));
            }
            lines.push(Line {
                id: Uuid::new_v4(),
                start_id,
                end_id,
                start,
                end,
                kind: new_line.kind,
                overshoot: new_line.overshoot,
                length_label: new_line.length_label.clone(),
                color: new_line.color,
            });
        }

        let mut circles = Vec::with_capacity(delta.circles.len());
        for new_circle in &delta.circles {
            let (center_id, center) = match new_circle.center_ref {
                Some(r) => {
                    let (id, pos) = resolve(r)?;
                    (Some(id), pos)
                }
                None => (None, new_circle.center),
            };
            circles.push(Circle {
                id: Uuid::new_v4(),
                center,
                center_id,
                radius: new_circle.radius,
                color: new_circle.color,
            });
        }

        // Validation done: nothing below can fail
        let mut receipt = CommitReceipt::default();

        for (id, new_point) in new_ids.into_iter().zip(delta.points) {
            let mut point = Point::new(id, new_point.position, new_point.origin);
            point.label = new_point.label;
            point.color = new_point.color;
            self.points.insert(id, point);
            receipt.points.push(id);
        }
        for line in lines {
            receipt.lines.push(line.id);
            self.lines.insert(line.id, line);
        }
        for circle in circles {
            receipt.circles.push(circle.id);
            self.circles.insert(circle.id, circle);
        }
        for new_decoration in delta.decorations {
            let id = Uuid::new_v4();
            self.decorations.insert(
                id,
                Decoration {
                    id,
                    shape: new_decoration.shape,
                    color: new_decoration.color,
                },
            );
            receipt.decorations.push(id);
        }

        tracing::debug!(
            "Committed {} points, {} lines, {} circles, {} decorations",
            receipt.points.len(),
            receipt.lines.len(),
            receipt.circles.len(),
            receipt.decorations.len()
        );

        Ok(receipt)
    }

    // ============== Editing ==============

    /// Translate a point, keeping every dependent line and circle in sync.
    ///
    /// Circle radii are not recomputed.
    pub fn move_point(&mut self, id: Uuid, position: DVec2) -> SceneResult<()> {
        let point = self.points.get_mut(&id).ok_or(SceneError::PointNotFound(id))?;
        point.position = position;

        for line in self.lines.values_mut().filter(|l| l.references_point(id)) {
            if line.start_id == id {
                line.start = position;
            }
            if line.end_id == id {
                line.end = position;
            }
        }
        for circle in self.circles.values_mut() {
            if circle.center_id == Some(id) {
                circle.center = position;
            }
        }
        Ok(())
    }

    /// Move a point's label without touching geometry
    pub fn set_label_offset(&mut self, id: Uuid, offset: DVec2) -> SceneResult<()> {
        let point = self.points.get_mut(&id).ok_or(SceneError::PointNotFound(id))?;
        point.label_offset = offset;
        Ok(())
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
        self.circles.clear();
        self.decorations.clear();
    }
}
