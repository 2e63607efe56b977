//! Vector/point math kernel
//!
//! Every function here is pure. Partial operations return `Option` instead of
//! producing NaN coordinates.

mod intersection;
mod projection;

pub use intersection::*;
pub use projection::*;

use glam::DVec2;

/// Squared lengths below this are treated as zero
pub const EPSILON: f64 = 1e-9;

/// Euclidean distance between two points
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Direction of the vector a→b in degrees, in (-180, 180].
///
/// A zero-length direction has no angle; it is reported as 0.
pub fn line_angle(a: DVec2, b: DVec2) -> f64 {
    let d = b - a;
    if d.length_squared() < EPSILON {
        return 0.0;
    }
    let angle = d.y.atan2(d.x).to_degrees();
    // atan2 yields -180 for (-x, -0.0)
    if angle <= -180.0 { angle + 360.0 } else { angle }
}

/// Componentwise average of two points
pub fn midpoint(a: DVec2, b: DVec2) -> DVec2 {
    (a + b) * 0.5
}

/// Wrap an angle in degrees into (-180, 180]
pub fn normalize_degrees(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}

/// Point at `length` from `origin` in direction `degrees`
pub fn polar(origin: DVec2, length: f64, degrees: f64) -> DVec2 {
    let rad = degrees.to_radians();
    origin + DVec2::new(rad.cos(), rad.sin()) * length
}

/// Unit vector in the direction of `v`, or zero when `v` has no length
pub fn unit(v: DVec2) -> DVec2 {
    v.normalize_or_zero()
}

/// 2D cross product (z component of the 3D cross product)
pub fn cross(a: DVec2, b: DVec2) -> f64 {
    a.perp_dot(b)
}
