/*
 * Geometry Module
 *
 * Small geometric helpers shared by the body model:
 * - Angle normalization in radians and degrees
 * - Circle-circle intersection, used by the IK leg solver to place knees
 * - Quadratic curve sampling for fin patches
 */

use std::f32::consts::{PI, TAU};

use crate::vector::{Vector2D, EPSILON};

/// Wraps an angle in radians into (-PI, PI].
pub fn normalize_angle(angle: f32) -> f32 {
    let mut wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

/// Wraps an angle in degrees into [-180, 180].
pub fn wrap_degrees(angle: f32) -> f32 {
    let mut wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Intersection points of two circles.
///
/// Returns `None` when the circles are separate (`d > r1 + r2`), when one
/// contains the other (`d < |r1 - r2|`) or when the centres coincide. Tangent
/// circles produce two identical points. Swapping the circles yields the same
/// pair of points in the opposite order.
pub fn circle_intersection(
    p1: Vector2D,
    p2: Vector2D,
    r1: f32,
    r2: f32,
) -> Option<[Vector2D; 2]> {
    let delta = p2 - p1;
    let d = delta.magnitude();

    if d <= EPSILON || d > r1 + r2 || d < (r1 - r2).abs() {
        return None;
    }

    // Distance from p1 to the chord's midpoint along the centre line
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let direction = delta / d;
    let mid = p1 + direction * a;
    let offset = direction.perpendicular() * h;

    Some([mid + offset, mid - offset])
}

/// Point on the quadratic Bezier curve `start -> control -> end` at `t`.
pub fn quadratic_point(start: Vector2D, control: Vector2D, end: Vector2D, t: f32) -> Vector2D {
    let u = 1.0 - t;
    start * (u * u) + control * (2.0 * u * t) + end * (t * t)
}

/// Samples a quadratic curve into `segments + 1` points, endpoints included.
pub fn sample_quadratic(
    start: Vector2D,
    control: Vector2D,
    end: Vector2D,
    segments: usize,
) -> Vec<Vector2D> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| quadratic_point(start, control, end, i as f32 / segments as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn close(a: Vector2D, b: Vector2D, eps: f32) -> bool {
        (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
    }

    fn same_set(a: [Vector2D; 2], b: [Vector2D; 2], eps: f32) -> bool {
        (close(a[0], b[0], eps) && close(a[1], b[1], eps))
            || (close(a[0], b[1], eps) && close(a[1], b[0], eps))
    }

    #[test]
    fn angles_wrap_into_half_open_range() {
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1.0e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1.0e-5);
        assert!((normalize_angle(0.25) - 0.25).abs() < 1.0e-6);
        assert!((wrap_degrees(270.0) + 90.0).abs() < 1.0e-4);
        assert!((wrap_degrees(-190.0) - 170.0).abs() < 1.0e-4);
        assert!((wrap_degrees(180.0) - 180.0).abs() < 1.0e-4);
    }

    #[test]
    fn separate_and_nested_circles_do_not_intersect() {
        let origin = Vector2D::ZERO;
        assert!(circle_intersection(origin, Vector2D::new(10.0, 0.0), 3.0, 3.0).is_none());
        assert!(circle_intersection(origin, Vector2D::new(1.0, 0.0), 10.0, 2.0).is_none());
        assert!(circle_intersection(origin, origin, 5.0, 5.0).is_none());
    }

    #[test]
    fn overlapping_circles_have_two_points_on_both_circles() {
        let p1 = Vector2D::new(0.0, 0.0);
        let p2 = Vector2D::new(6.0, 0.0);
        let points = circle_intersection(p1, p2, 5.0, 5.0).expect("circles overlap");
        for p in points {
            assert!((p.distance(p1) - 5.0).abs() < 1.0e-4);
            assert!((p.distance(p2) - 5.0).abs() < 1.0e-4);
        }
        assert!(same_set(points, [Vector2D::new(3.0, 4.0), Vector2D::new(3.0, -4.0)], 1.0e-3));
    }

    #[test]
    fn tangent_circles_return_a_degenerate_pair() {
        let points = circle_intersection(Vector2D::ZERO, Vector2D::new(4.0, 0.0), 2.0, 2.0)
            .expect("tangent circles touch");
        assert!(close(points[0], points[1], 1.0e-3));
        assert!(close(points[0], Vector2D::new(2.0, 0.0), 1.0e-3));
    }

    #[test]
    fn intersection_is_symmetric_under_swap() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let p1 = Vector2D::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            let p2 = Vector2D::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            let r1 = rng.gen_range(1.0..60.0);
            let r2 = rng.gen_range(1.0..60.0);

            let forward = circle_intersection(p1, p2, r1, r2);
            let backward = circle_intersection(p2, p1, r2, r1);
            let d = p1.distance(p2);

            if d > r1 + r2 || d < (r1 - r2).abs() {
                assert!(forward.is_none() && backward.is_none());
                continue;
            }
            match (forward, backward) {
                // near tangency the chord half-length is sensitive to rounding
                (Some(a), Some(b)) => assert!(same_set(a, b, 0.05)),
                (None, None) => {}
                _ => panic!("asymmetric result for {p1:?} {p2:?} {r1} {r2}"),
            }
        }
    }

    #[test]
    fn quadratic_samples_hit_the_endpoints() {
        let start = Vector2D::new(0.0, 0.0);
        let control = Vector2D::new(5.0, 10.0);
        let end = Vector2D::new(10.0, 0.0);
        let points = sample_quadratic(start, control, end, 8);
        assert_eq!(points.len(), 9);
        assert!(close(points[0], start, 1.0e-6));
        assert!(close(points[8], end, 1.0e-6));
        assert!(close(points[4], Vector2D::new(5.0, 5.0), 1.0e-4));
    }
}
