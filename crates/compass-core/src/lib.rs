//! Compass Core
//!
//! Pure geometry shared by every layer of the construction engine:
//! - Vector math kernel (distances, angles, projections, intersections)
//! - Plain data types for committed geometry (points, lines, circles, decorations)
//!
//! Coordinates live in a single y-down world plane; angles are degrees.

pub mod math;
pub mod types;

pub use types::*;

/// World units per centimetre for length-based constructions
pub const PIXELS_PER_CM: f64 = 40.0;
