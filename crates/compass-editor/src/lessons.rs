//! Lesson catalogue
//!
//! Lessons are grouped by school grade. Starting a lesson clears the scene
//! and activates the lesson's tool; choosing one is left to the caller.

use serde::Serialize;

use crate::state::ConstructionTool;

/// One lesson of the curriculum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub id: &'static str,
    pub grade: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub tool: ConstructionTool,
}

const fn lesson(
    id: &'static str,
    grade: u8,
    title: &'static str,
    description: &'static str,
    tool: ConstructionTool,
) -> Lesson {
    Lesson {
        id,
        grade,
        title,
        description,
        tool,
    }
}

static CATALOGUE: [Lesson; 17] = [
    // Grade 6
    lesson(
        "g6_l1_segment",
        6,
        "Lesson 1: Draw a segment",
        "Draw the segment through two arbitrary points A and B.",
        ConstructionTool::Segment,
    ),
    lesson(
        "g6_l2_fixed_segment",
        6,
        "Lesson 2: Draw a segment of given length",
        "Draw a segment AB whose length is a given number of centimetres.",
        ConstructionTool::FixedLengthSegment,
    ),
    lesson(
        "g6_l3_ray",
        6,
        "Lesson 3: Draw a ray",
        "Draw the ray Ox starting at O and passing through A.",
        ConstructionTool::Ray,
    ),
    lesson(
        "g6_l4_inf_line",
        6,
        "Lesson 4: Draw a line",
        "Draw the line through two points A and B.",
        ConstructionTool::InfiniteLine,
    ),
    lesson(
        "g6_l5_measure_angle",
        6,
        "Lesson 5: Measure an angle",
        "Use the protractor to measure the angle xOy.",
        ConstructionTool::MeasureAngle,
    ),
    lesson(
        "g6_l6_draw_angle",
        6,
        "Lesson 6: Draw a given angle",
        "Draw an angle xOy with a given size in degrees.",
        ConstructionTool::DrawAngle,
    ),
    // Grade 7
    lesson(
        "g7_l1_perp_bisector",
        7,
        "Lesson 1: Construct the perpendicular bisector",
        "Construct the perpendicular bisector of segment AB with ruler and compass.",
        ConstructionTool::PerpendicularBisector,
    ),
    lesson(
        "g7_l2_midpoint",
        7,
        "Lesson 2: Construct the midpoint",
        "Construct the midpoint M of segment AB.",
        ConstructionTool::Midpoint,
    ),
    lesson(
        "g7_l3_angle_bisector",
        7,
        "Lesson 3: Construct an angle bisector",
        "Construct the bisector of angle xOy with ruler and compass.",
        ConstructionTool::AngleBisector,
    ),
    lesson(
        "g7_l4_isosceles",
        7,
        "Lesson 4: Construct an isosceles triangle",
        "Construct a triangle ABC that is isosceles at A.",
        ConstructionTool::IsoscelesTriangle,
    ),
    lesson(
        "g7_l5_equilateral",
        7,
        "Lesson 5: Construct an equilateral triangle",
        "Construct an equilateral triangle ABC with ruler and compass.",
        ConstructionTool::EquilateralTriangle,
    ),
    lesson(
        "g7_l6_right_triangle",
        7,
        "Lesson 6: Construct a right triangle",
        "Construct a triangle with a right angle at A using ruler and compass.",
        ConstructionTool::RightTriangle,
    ),
    lesson(
        "g7_l7_perp_eke",
        7,
        "Lesson 7: Perpendicular with a set square",
        "Use a set square to draw the line through M perpendicular to d.",
        ConstructionTool::PerpendicularSetSquare,
    ),
    lesson(
        "g7_l8_parallel_sliding",
        7,
        "Lesson 8: Construct a parallel line",
        "Slide a set square along a ruler to draw a parallel line.",
        ConstructionTool::ParallelSliding,
    ),
    // Grade 8
    lesson(
        "g8_l1_quadrilateral",
        8,
        "Lesson 1: Quadrilaterals",
        "Draw a quadrilateral ABCD and observe that its angles sum to 360 degrees.",
        ConstructionTool::Quadrilateral,
    ),
    lesson(
        "g8_l2_parallelogram",
        8,
        "Lesson 2: Construct a parallelogram",
        "Construct the parallelogram ABCD from three vertices A, B and C.",
        ConstructionTool::Parallelogram,
    ),
    // Grade 9
    lesson(
        "g9_l1_tangent",
        9,
        "Lesson 1: Construct tangents",
        "Construct the tangents to circle (O) through a point M outside it.",
        ConstructionTool::TangentFromPoint,
    ),
];

/// Every lesson, ordered by grade
pub fn catalogue() -> &'static [Lesson] {
    &CATALOGUE
}

/// Look up a lesson by id
pub fn find(id: &str) -> Option<&'static Lesson> {
    CATALOGUE.iter().find(|l| l.id == id)
}

/// Lessons of one grade, in teaching order
pub fn by_grade(grade: u8) -> impl Iterator<Item = &'static Lesson> {
    CATALOGUE.iter().filter(move |l| l.grade == grade)
}

/// Grades that have at least one lesson, ascending
pub fn grades() -> Vec<u8> {
    let mut grades: Vec<u8> = CATALOGUE.iter().map(|l| l.grade).collect();
    grades.dedup();
    grades
}
