//! Segment and circle intersections, plus the tie-break policies used to pick
//! one of two circle intersections.

use glam::DVec2;

use super::EPSILON;

/// Intersection of segments p1→p2 and p3→p4.
///
/// Returns `None` for parallel segments or when the crossing lies outside
/// either segment.
pub fn segment_intersection(p1: DVec2, p2: DVec2, p3: DVec2, p4: DVec2) -> Option<DVec2> {
    let denom = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if denom.abs() < EPSILON {
        return None;
    }

    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denom;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denom;

    if !(0.0..=1.0).contains(&ua) || !(0.0..=1.0).contains(&ub) {
        return None;
    }

    Some(p1 + (p2 - p1) * ua)
}

/// Both intersections of circle(c1, r1) and circle(c2, r2).
///
/// Returns `None` when the circles are disjoint, one contains the other, or
/// the centers coincide. Tangent circles yield two equal points.
pub fn circle_circle_intersections(c1: DVec2, r1: f64, c2: DVec2, r2: f64) -> Option<[DVec2; 2]> {
    let delta = c2 - c1;
    let d = delta.length();

    if d < EPSILON || d > r1 + r2 || d < (r1 - r2).abs() {
        return None;
    }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    // Clamp rounding noise at tangency
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let base = c1 + delta * (a / d);
    let offset = DVec2::new(delta.y, -delta.x) * (h / d);

    Some([base + offset, base - offset])
}

/// The intersection with the smaller y coordinate (screen-upper).
///
/// Returns `(chosen, other)`; ties keep the first point.
pub fn upper(pair: [DVec2; 2]) -> (DVec2, DVec2) {
    let [p, q] = pair;
    if q.y < p.y { (q, p) } else { (p, q) }
}

/// The intersection farther from `reference`.
///
/// Returns `(chosen, other)`; ties keep the first point.
pub fn farther_from(pair: [DVec2; 2], reference: DVec2) -> (DVec2, DVec2) {
    let [p, q] = pair;
    if q.distance_squared(reference) > p.distance_squared(reference) {
        (q, p)
    } else {
        (p, q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::distance;
    use approx::assert_relative_eq;

    fn same_pair(a: [DVec2; 2], b: [DVec2; 2]) -> bool {
        let close = |p: DVec2, q: DVec2| p.distance(q) < 1e-9;
        (close(a[0], b[0]) && close(a[1], b[1])) || (close(a[0], b[1]) && close(a[1], b[0]))
    }

    #[test]
    fn test_segment_intersection_crossing() {
        let p = segment_intersection(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(0.0, 10.0),
            DVec2::new(10.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 5.0);
    }

    #[test]
    fn test_segment_intersection_parallel_and_outside() {
        assert!(
            segment_intersection(
                DVec2::new(0.0, 0.0),
                DVec2::new(10.0, 0.0),
                DVec2::new(0.0, 5.0),
                DVec2::new(10.0, 5.0),
            )
            .is_none()
        );
        // Lines cross at (5, 5) but the second segment stops short
        assert!(
            segment_intersection(
                DVec2::new(0.0, 0.0),
                DVec2::new(10.0, 10.0),
                DVec2::new(0.0, 10.0),
                DVec2::new(4.0, 6.0),
            )
            .is_none()
        );
    }

    #[test]
    fn test_circle_intersections_lie_on_both_circles() {
        let cases = [
            (DVec2::new(0.0, 0.0), 50.0, DVec2::new(60.0, 10.0), 40.0),
            (DVec2::new(100.0, 100.0), 150.0, DVec2::new(300.0, 100.0), 150.0),
            (DVec2::new(-20.0, 35.0), 12.5, DVec2::new(-5.0, 30.0), 9.0),
        ];
        for (c1, r1, c2, r2) in cases {
            let pair = circle_circle_intersections(c1, r1, c2, r2).unwrap();
            for p in pair {
                assert!((distance(p, c1) - r1).abs() < 1e-9);
                assert!((distance(p, c2) - r2).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_circle_intersections_symmetric() {
        let (c1, r1, c2, r2) = (DVec2::new(3.0, -2.0), 30.0, DVec2::new(40.0, 12.0), 25.0);
        let forward = circle_circle_intersections(c1, r1, c2, r2).unwrap();
        let backward = circle_circle_intersections(c2, r2, c1, r1).unwrap();
        assert!(same_pair(forward, backward));
    }

    #[test]
    fn test_circle_intersections_degenerate() {
        // Disjoint
        assert!(circle_circle_intersections(DVec2::ZERO, 10.0, DVec2::new(50.0, 0.0), 10.0).is_none());
        // One inside the other
        assert!(circle_circle_intersections(DVec2::ZERO, 50.0, DVec2::new(5.0, 0.0), 10.0).is_none());
        // Identical circles
        assert!(circle_circle_intersections(DVec2::ZERO, 10.0, DVec2::ZERO, 10.0).is_none());
    }

    #[test]
    fn test_circle_intersections_tangent_coincide() {
        let [p, q] = circle_circle_intersections(DVec2::ZERO, 10.0, DVec2::new(20.0, 0.0), 10.0).unwrap();
        assert_relative_eq!(p.x, 10.0);
        assert_relative_eq!(p.y, 0.0);
        assert!(p.distance(q) < 1e-9);
    }

    #[test]
    fn test_upper_picks_smaller_y() {
        let (chosen, other) = upper([DVec2::new(0.0, 5.0), DVec2::new(0.0, -5.0)]);
        assert_relative_eq!(chosen.y, -5.0);
        assert_relative_eq!(other.y, 5.0);
    }

    #[test]
    fn test_farther_from_reference() {
        let pair = [DVec2::new(1.0, 0.0), DVec2::new(9.0, 0.0)];
        let (chosen, other) = farther_from(pair, DVec2::ZERO);
        assert_relative_eq!(chosen.x, 9.0);
        assert_relative_eq!(other.x, 1.0);
    }
}
