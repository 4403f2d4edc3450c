//! Planar triangle geometry.
//!
//! All tests here work on the XY projection; z is carried but ignored.

use trek_core::Point;

/// Tolerance for point-in-triangle tests, so points on shared edges and
/// vertices count as inside every adjacent face.
pub const CONTAINS_EPSILON: f64 = 1e-9;

/// Twice the signed XY area of triangle `abc` (positive when counter-clockwise).
pub fn signed_area2(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Centroid of triangle `abc`.
pub fn centroid(a: Point, b: Point, c: Point) -> Point {
    (a + b + c) * (1.0 / 3.0)
}

/// Barycentric point-in-triangle test against the XY projection.
///
/// Returns `false` for degenerate (zero-area) triangles.
pub fn contains_xy(a: Point, b: Point, c: Point, p: Point) -> bool {
    let v0 = (b.x - a.x, b.y - a.y);
    let v1 = (c.x - a.x, c.y - a.y);
    let v2 = (p.x - a.x, p.y - a.y);

    let d00 = v0.0 * v0.0 + v0.1 * v0.1;
    let d01 = v0.0 * v1.0 + v0.1 * v1.1;
    let d11 = v1.0 * v1.0 + v1.1 * v1.1;
    let d20 = v2.0 * v0.0 + v2.1 * v0.1;
    let d21 = v2.0 * v1.0 + v2.1 * v1.1;

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < f64::EPSILON {
        return false;
    }
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;
    u >= -CONTAINS_EPSILON && v >= -CONTAINS_EPSILON && w >= -CONTAINS_EPSILON
}
