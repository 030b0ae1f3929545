use crate::core::pipeline::Interpolatable;
use nalgebra::{Point2, Vector3};

const EPSILON: f32 = 1e-5;

/// Signed edge function of point `p` against the directed edge `a -> b`.
///
/// Equals twice the signed area of triangle (a, b, p). With raster Y pointing
/// down, a triangle whose NDC vertices run counter-clockwise yields
/// non-negative values for every interior point.
#[inline(always)]
pub fn edge_function(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Raw (unnormalized) edge values for `p`, one per vertex.
///
/// - x: edge (v1, v2), the weight of v0
/// - y: edge (v2, v0), the weight of v1
/// - z: edge (v0, v1), the weight of v2
#[inline]
pub fn edge_values(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Vector3<f32> {
    Vector3::new(
        edge_function(v1, v2, p),
        edge_function(v2, v0, p),
        edge_function(v0, v1, p),
    )
}

/// Normalizes edge values by their sum into barycentric weights.
///
/// Returns `None` when the sum is near zero (degenerate triangle).
#[inline]
pub fn barycentric_weights(edges: Vector3<f32>) -> Option<Vector3<f32>> {
    let total = edges.x + edges.y + edges.z;
    if total.abs() < EPSILON {
        return None;
    }
    Some(edges / total)
}

/// Perspective-correct depth: `1 / Σ(w_i / z_i)`.
#[inline]
pub fn perspective_correct_depth(weights: Vector3<f32>, z: [f32; 3]) -> f32 {
    1.0 / (weights.x / z[0] + weights.y / z[1] + weights.z / z[2])
}

/// Perspective-correct attribute interpolation.
///
/// Every attribute is weighted by `w_i / original_w_i`, summed, and scaled by
/// `1 / Σ(w_i / original_w_i)`.
#[inline]
pub fn perspective_correct_interpolate<T: Interpolatable>(
    values: [T; 3],
    weights: Vector3<f32>,
    original_w: [f32; 3],
) -> T {
    let a = weights.x / original_w[0];
    let b = weights.y / original_w[1];
    let c = weights.z / original_w[2];
    let interpolated_w = 1.0 / (a + b + c);
    (values[0] * a + values[1] * b + values[2] * c) * interpolated_w
}
