use nalgebra::{Point2, Vector2, Vector3};

const EPSILON: f32 = 1e-5;

/// 2D cross product (z component of the 3D cross product).
#[inline(always)]
pub fn cross_2d(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Twice the signed area of triangle (v0, v1, v2) in screen space.
///
/// Positive when the vertices run clockwise as displayed (screen +Y points down),
/// which is the front-face winding of the left-handed pipeline.
#[inline]
pub fn signed_area_x2(v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>) -> f32 {
    cross_2d(v1 - v0, v2 - v0)
}

/// Calculates the barycentric weights (W1, W2, W3) of point p
/// with respect to triangle (v0, v1, v2) from the three edge functions.
///
/// Each weight is the edge function of the edge opposite its vertex divided by
/// twice the signed triangle area.
///
/// Returns `None` if the triangle is degenerate (area is near zero).
pub fn barycentric_weights(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Option<Vector3<f32>> {
    let total_area_x2 = signed_area_x2(v0, v1, v2);
    if total_area_x2.abs() < EPSILON {
        return None;
    }

    let edge0 = cross_2d(v2 - v1, p - v1);
    let edge1 = cross_2d(v0 - v2, p - v2);
    let edge2 = cross_2d(v1 - v0, p - v0);

    let inv_total_area_x2 = 1.0 / total_area_x2;
    Some(Vector3::new(
        edge0 * inv_total_area_x2,
        edge1 * inv_total_area_x2,
        edge2 * inv_total_area_x2,
    ))
}

/// A pixel is covered only when all three weights are strictly positive.
/// Pixels exactly on an edge belong to neither neighbour.
#[inline(always)]
pub fn is_covered(bary: Vector3<f32>) -> bool {
    bary.x > 0.0 && bary.y > 0.0 && bary.z > 0.0
}

/// Reciprocal interpolation: `1 / (W1/a0 + W2/a1 + W3/a2)`.
///
/// Used for both the depth value (with NDC z) and the perspective-correct
/// `w` (with clip w). A zero input with a positive weight drives the result
/// to zero, which is the valid near-plane depth. Returns `None` only when the
/// result is not a finite number.
pub fn interpolate_reciprocal(bary: Vector3<f32>, values: [f32; 3]) -> Option<f32> {
    let sum = bary.x / values[0] + bary.y / values[1] + bary.z / values[2];
    let result = 1.0 / sum;
    result.is_finite().then_some(result)
}

/// Compute perspective-correct barycentric coordinates.
///
/// The corrected weights are `Wi / wi * w_interp` with
/// `w_interp = 1 / (W1/w0 + W2/w1 + W3/w2)`, so interpolating any attribute
/// with them equals summing `attribute / w` and rescaling by `w_interp`.
///
/// Returns `None` when numerical instability is detected.
pub fn perspective_correct_barycentric(bary: Vector3<f32>, w: [f32; 3]) -> Option<Vector3<f32>> {
    let w_interp = interpolate_reciprocal(bary, w)?;
    let corrected = Vector3::new(
        bary.x / w[0] * w_interp,
        bary.y / w[1] * w_interp,
        bary.z / w[2] * w_interp,
    );
    corrected.iter().all(|c| c.is_finite()).then_some(corrected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> [Point2<f32>; 3] {
        [
            Point2::new(10.0, 10.0),
            Point2::new(50.0, 10.0),
            Point2::new(10.0, 50.0),
        ]
    }

    #[test]
    fn test_weights_partition_unity_inside() {
        let [v0, v1, v2] = triangle();
        for p in [
            Point2::new(12.5, 12.5),
            Point2::new(20.0, 30.0),
            Point2::new(29.9, 19.9),
            Point2::new(11.0, 47.5),
        ] {
            let bary = barycentric_weights(p, v0, v1, v2).unwrap();
            assert!((bary.x + bary.y + bary.z - 1.0).abs() < 1e-5);
            assert!(is_covered(bary), "{:?} should be covered", p);
        }
    }

    #[test]
    fn test_weights_at_vertices() {
        let [v0, v1, v2] = triangle();
        let expected = [Vector3::x(), Vector3::y(), Vector3::z()];
        for (v, e) in [v0, v1, v2].into_iter().zip(expected) {
            let bary = barycentric_weights(v, v0, v1, v2).unwrap();
            assert!((bary - e).norm() < 1e-6, "{:?} != {:?}", bary, e);
        }
    }

    #[test]
    fn test_outside_point_not_covered() {
        let [v0, v1, v2] = triangle();
        let bary = barycentric_weights(Point2::new(45.0, 45.0), v0, v1, v2).unwrap();
        assert!(!is_covered(bary));
    }

    #[test]
    fn test_degenerate_triangle() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(5.0, 5.0);
        let c = Point2::new(10.0, 10.0);
        assert!(barycentric_weights(Point2::new(2.0, 3.0), a, b, c).is_none());
    }

    #[test]
    fn test_signed_area_winding() {
        let [v0, v1, v2] = triangle();
        assert!(signed_area_x2(v0, v1, v2) > 0.0);
        assert!(signed_area_x2(v0, v2, v1) < 0.0);
    }

    #[test]
    fn test_reciprocal_interpolation_of_constant() {
        let bary = Vector3::new(0.2, 0.3, 0.5);
        let z = interpolate_reciprocal(bary, [0.5, 0.5, 0.5]).unwrap();
        assert!((z - 0.5).abs() < 1e-6);
        assert_eq!(interpolate_reciprocal(bary, [0.5, 0.0, 0.5]), Some(0.0));
        assert!(interpolate_reciprocal(Vector3::zeros(), [0.5, 0.5, 0.5]).is_none());
    }

    #[test]
    fn test_perspective_correct_weights_sum_to_one() {
        let bary = Vector3::new(0.25, 0.25, 0.5);
        let corrected = perspective_correct_barycentric(bary, [1.0, 4.0, 2.0]).unwrap();
        assert!((corrected.sum() - 1.0).abs() < 1e-6);
        // Nearer vertices (smaller w) gain weight.
        assert!(corrected.x > bary.x);
        assert!(corrected.y < bary.y);
    }
}
